//! Music Catalog Shared Library
//!
//! Request/response types and input validation shared between the backend
//! and any client of the HTTP API.

pub mod types;
pub mod validation;

// Re-export commonly used items
pub use types::*;
pub use validation::ValidationError;
