//! Adapter layer.
//!
//! - `inbound` drives the application (the CLI).
//! - `outbound` is driven by it (warehouse queries, snapshot files).

pub mod inbound;
pub mod outbound;
