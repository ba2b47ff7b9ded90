//! # Confab Config
//!
//! Layered configuration for the cache service: defaults, environment
//! files, local overrides, and `CONFAB_` environment variables.

pub mod app_config;
pub mod loader;

pub use app_config::*;
pub use loader::*;
