pub mod exclusion;
pub mod holder;
pub mod initialize;
pub mod supply;
pub mod transfer;

pub use exclusion::*;
pub use holder::*;
pub use initialize::*;
pub use supply::*;
pub use transfer::*;
