//! # Confab Core
//!
//! Core types shared across the Confab cache service: the unified error
//! taxonomy, typed identifiers, and the closed set of domain events that
//! drive cache invalidation.

pub mod error;
pub mod events;
pub mod id;
pub mod result;

pub use error::*;
pub use events::*;
pub use id::*;
pub use result::*;
