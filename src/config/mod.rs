//! Configuration loading and management for the Leave Policy Allocation Engine.
//!
//! This module loads system settings, leave types, leave policies, leave
//! periods and employees from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Float precision: {}", config.settings().float_precision);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EmployeesConfig, LeaveConfig, LeavePeriodsConfig, LeavePoliciesConfig, LeaveTypesConfig,
    SystemSettings,
};
