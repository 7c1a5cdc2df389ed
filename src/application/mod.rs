//! Application services (use cases).
//!
//! Rendering of reports, the dashboard and the CSV export. Everything here
//! works on domain values and returns text; the CLI decides where it goes.

pub mod dashboard;
pub mod export;
pub mod report;
