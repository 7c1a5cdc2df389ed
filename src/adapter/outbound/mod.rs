//! Outbound adapters: the warehouse and the snapshot files.

pub mod snapshot;
pub mod warehouse;
