//! Domain layer containing the clock abstraction and value objects.

pub mod clock;
pub mod value_objects;

// Re-export commonly used domain types
pub use clock::{Clock, ManualClock, SystemClock};
pub use value_objects::*;
