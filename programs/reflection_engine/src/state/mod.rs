pub mod config;
pub mod holder;

pub use config::*;
pub use holder::*;
