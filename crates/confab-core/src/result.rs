//! Result type aliases for Confab.

use crate::ConfabError;

/// A specialized `Result` type for Confab operations.
pub type ConfabResult<T> = Result<T, ConfabError>;
