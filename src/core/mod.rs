// Core data structures and error handling for memquery
pub mod error;
pub mod record;

// Re-exports for convenience
pub use error::{Error, Result};
pub use record::{records_from_json, FieldValue, Record};
