//! Client for the authoritative chat backend.
//!
//! The backend owns all domain entities; this crate treats their payloads
//! as opaque JSON and only knows which query belongs to which resource.

mod client;
mod http_client;

pub use client::BackendClient;
pub use http_client::HttpBackendClient;
