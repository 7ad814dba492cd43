//! Domain layer for confcat.
//!
//! Holds the catalog's domain models, the repository traits the engine reads
//! through, and the category-to-query translation engine itself.

pub mod category;
pub mod config;
pub mod error;
pub mod query;
pub mod session;

// Re-export common error type
pub use error::{ConfcatError, Result};
