//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌─────────────────────────┐
//!                 │       Application       │
//!                 │   reports, dashboard    │
//!                 └────────────┬────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//!      ┌───────────────┐               ┌───────────────┐
//!      │   Warehouse   │               │   Snapshot    │
//!      │    Adapter    │               │     Store     │
//!      └───────────────┘               └───────────────┘
//! ```
//!
//! - [`WarehouseReader`] runs the aggregation queries against the analytics warehouse.
//! - [`SnapshotStore`] persists the last fetched result set for offline use.

pub mod outbound;

pub use outbound::snapshot::{SavedSnapshot, SnapshotStore};
pub use outbound::warehouse::{FetchRequest, QueryName, TableCount, WarehouseReader};
