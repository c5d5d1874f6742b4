//! Configuration loading and management for the attendance engine.
//!
//! This module loads the attendance policy (late and punch-out thresholds,
//! regularization settings) and an optional seed roster from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/attendance").unwrap();
//! println!("Punch-out opens at {}", config.policy().punch_out_after());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceConfig, AttendancePolicy, PolicyFile, RegularizationSettings, RosterFile,
    SeedEmployee,
};
