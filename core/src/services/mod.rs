//! Services containing stateful security logic.

pub mod account_denied;

// Re-export commonly used types
pub use account_denied::{
    AccessRecord, AccessRecordStore, AccountDeniedService, InMemoryAccessRecordStore, LockStatus,
};
