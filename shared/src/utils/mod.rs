//! Common utility functions

pub mod logging;
pub mod validation;

// Re-export commonly used utilities
pub use logging::init_tracing;
pub use validation::*;
