//! Paddock - performance reporting for the house racing bots.
//!
//! Reads bot activity from the analytics warehouse, renders plain-text
//! reports and a static HTML dashboard, and keeps a JSON snapshot of the
//! latest fetch so the dashboard can be rebuilt without a database.
//!
//! # Modules
//!
//! - [`domain`] - Bots, token amounts, metric records and the overview join
//! - [`port`] - Warehouse and snapshot traits
//! - [`adapter`] - The CLI, the diesel warehouse reader and snapshot files
//! - [`application`] - Report, dashboard and CSV rendering
//! - [`infrastructure`] - Configuration and logging setup
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `mysql` - Enable the MySQL warehouse backend (SQLite is always available)
//!
//! # Example
//!
//! ```no_run
//! use paddock::application::report::performance_report;
//! use paddock::domain::Overview;
//! use paddock::infrastructure::config::Config;
//! use paddock::port::WarehouseReader;
//!
//! fn main() -> paddock::error::Result<()> {
//!     let config = Config::load("paddock.toml")?;
//!     let snapshot = config.warehouse()?.fetch(&config.fetch_request(false))?;
//!     let overview = Overview::merge(&config.roster(), &snapshot, &config.thresholds());
//!     let now = chrono::Local::now().naive_local();
//!     print!("{}", performance_report(&overview, &config.thresholds(), now));
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
