//! Ambient HTTP plumbing shared by the store service: health endpoints,
//! request-id propagation, tracing setup, and serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
