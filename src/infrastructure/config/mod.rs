//! Infrastructure configuration modules.

pub mod database;
pub mod logging;
pub mod reporting;
pub mod roster;
pub mod settings;
pub mod snapshot;

pub use settings::Config;
