pub mod access;
pub mod initialize_manager;
pub mod lock;
pub mod lockdown;
pub mod owner;
pub mod unlock;

pub use access::*;
pub use initialize_manager::*;
pub use lock::*;
pub use lockdown::*;
pub use owner::*;
pub use unlock::*;
