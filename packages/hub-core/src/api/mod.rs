//! API module
//!
//! Wire types and the HTTP client for the Agent Hub REST endpoints.

pub mod client;
pub mod types;
