//! # Confab REST
//!
//! HTTP route layer over the cache facade: per-domain cached read
//! endpoints, the invalidation webhook, and request middleware. The layer
//! itself is stateless; all state lives in the cache store and the backend.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
