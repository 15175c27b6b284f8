//! Shared types for the self-ordering backend
//!
//! Domain models exchanged between the HTTP API, the storage layer and the
//! frontend, plus small utilities (timestamps, fallback order ids).

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
