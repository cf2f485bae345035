//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading leave
//! configurations from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, LeavePeriod, LeavePolicy, LeaveType, MAX_ANNUAL_ALLOCATION};
use crate::store::{InMemoryStore, LeaveTypeSource};

use super::types::{
    EmployeesConfig, LeaveConfig, LeavePeriodsConfig, LeavePoliciesConfig, LeaveTypesConfig,
    SystemSettings,
};

/// Loads and provides access to leave configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides lookups of leave types, policies, periods and employees.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml        # System settings (float precision)
/// ├── leave_types.yaml     # Leave type descriptors
/// ├── leave_policies.yaml  # Leave policies and annual allocations
/// ├── leave_periods.yaml   # Named leave periods
/// └── employees.yaml       # Employees and joining dates
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let policy = loader.get_leave_policy("Standard Policy").unwrap();
/// for detail in &policy.details {
///     println!("{}: {}", detail.leave_type, detail.annual_allocation);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: LeaveConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML, or if
    /// a policy names a leave type that is not configured.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use leave_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), leave_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<SystemSettings>(&path.join("settings.yaml"))?;
        let leave_types = Self::load_yaml::<LeaveTypesConfig>(&path.join("leave_types.yaml"))?;

        let policies_path = path.join("leave_policies.yaml");
        let leave_policies = Self::load_yaml::<LeavePoliciesConfig>(&policies_path)?;
        Self::check_policy_leave_types(
            &policies_path,
            &leave_types.leave_types,
            &leave_policies.leave_policies,
        )?;

        let periods_path = path.join("leave_periods.yaml");
        let leave_periods = Self::load_yaml::<LeavePeriodsConfig>(&periods_path)?;
        Self::check_periods(&periods_path, &leave_periods.leave_periods)?;

        let employees = Self::load_yaml::<EmployeesConfig>(&path.join("employees.yaml"))?;

        info!(
            path = %path.display(),
            leave_types = leave_types.leave_types.len(),
            leave_policies = leave_policies.leave_policies.len(),
            leave_periods = leave_periods.leave_periods.len(),
            employees = employees.employees.len(),
            "Loaded leave configuration"
        );

        let config = LeaveConfig::new(
            settings,
            leave_types.leave_types,
            leave_policies.leave_policies,
            leave_periods.leave_periods,
            employees.employees,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_policy_leave_types(
        path: &Path,
        leave_types: &[LeaveType],
        policies: &[LeavePolicy],
    ) -> EngineResult<()> {
        let known: HashSet<&str> = leave_types.iter().map(|t| t.name.as_str()).collect();

        for policy in policies {
            if let Some(unknown) = policy.leave_types().find(|name| !known.contains(name)) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!(
                        "policy '{}' references unknown leave type '{}'",
                        policy.name, unknown
                    ),
                });
            }
            if let Some(detail) = policy.invalid_allocation() {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!(
                        "policy '{}' allocates {} of '{}', expected 0 to {}",
                        policy.name,
                        detail.annual_allocation,
                        detail.leave_type,
                        MAX_ANNUAL_ALLOCATION
                    ),
                });
            }
        }
        Ok(())
    }

    fn check_periods(path: &Path, periods: &[LeavePeriod]) -> EngineResult<()> {
        match periods.iter().find(|p| p.from_date > p.to_date) {
            Some(period) => Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("leave period '{}' ends before it starts", period.name),
            }),
            None => Ok(()),
        }
    }

    /// Returns a reference to the complete configuration.
    pub fn config(&self) -> &LeaveConfig {
        &self.config
    }

    /// Returns the system settings.
    pub fn settings(&self) -> &SystemSettings {
        self.config.settings()
    }

    /// Gets a leave type descriptor by name.
    pub fn get_leave_type(&self, name: &str) -> EngineResult<&LeaveType> {
        self.config
            .leave_types()
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| EngineError::LeaveTypeNotFound {
                name: name.to_string(),
            })
    }

    /// Gets a leave policy by name.
    pub fn get_leave_policy(&self, name: &str) -> EngineResult<&LeavePolicy> {
        self.config
            .leave_policies()
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| EngineError::LeavePolicyNotFound {
                name: name.to_string(),
            })
    }

    /// Gets a leave period by name.
    pub fn get_leave_period(&self, name: &str) -> EngineResult<&LeavePeriod> {
        self.config
            .leave_periods()
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| EngineError::LeavePeriodNotFound {
                name: name.to_string(),
            })
    }

    /// Gets an employee by id.
    pub fn get_employee(&self, id: &str) -> EngineResult<&Employee> {
        self.config
            .employees()
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    /// Loads the configured policies, periods and employees into `store`.
    pub fn seed_store(&self, store: &InMemoryStore) -> EngineResult<()> {
        for policy in self.config.leave_policies() {
            store.insert_leave_policy(policy.clone())?;
        }
        for period in self.config.leave_periods() {
            store.insert_leave_period(period.clone())?;
        }
        for employee in self.config.employees() {
            store.insert_employee(employee.clone())?;
        }
        Ok(())
    }
}

impl LeaveTypeSource for ConfigLoader {
    fn fetch_leave_types(&self) -> EngineResult<Vec<LeaveType>> {
        Ok(self.config.leave_types().to_vec())
    }
}
