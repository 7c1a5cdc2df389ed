//! Reporting domain: bots, token amounts, metric records and the overview join.
//!
//! Everything here is pure data and computation. Warehouse access lives in
//! [`crate::adapter::outbound::warehouse`].

pub mod bot;
pub mod horse;
pub mod insight;
pub mod metric;
pub mod money;
pub mod overview;
pub mod rating;
pub mod snapshot;

pub use bot::{Bot, Roster, UserId};
pub use insight::{FleetTotals, Insights};
pub use money::Iggt;
pub use overview::{MergeScope, Overview, OverviewRow};
pub use rating::{PerformanceRating, RatingThresholds};
pub use snapshot::{HorseTables, Snapshot};
