pub mod ciphertext_record;
pub mod lock_state;
pub mod manager;
pub mod tier_lock;

pub use ciphertext_record::*;
pub use lock_state::*;
pub use manager::*;
pub use tier_lock::*;
