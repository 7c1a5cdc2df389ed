//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! reporting logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, environment overrides and validation

pub mod config;
