// Public modules
pub mod build;
pub mod error;
pub mod invocation;
pub mod paths;
pub mod pipeline;
pub mod relocate;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
