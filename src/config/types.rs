//! Configuration types for leave allocation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::calculation::DEFAULT_FLOAT_PRECISION;
use crate::models::{Employee, LeavePeriod, LeavePolicy, LeaveType};

/// System-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemSettings {
    /// Decimal digits kept in allocated leave quantities.
    #[serde(default = "default_float_precision")]
    pub float_precision: u32,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            float_precision: DEFAULT_FLOAT_PRECISION,
        }
    }
}

fn default_float_precision() -> u32 {
    DEFAULT_FLOAT_PRECISION
}

/// Leave types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// Every leave type descriptor.
    pub leave_types: Vec<LeaveType>,
}

/// Leave policies configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeavePoliciesConfig {
    /// Every leave policy.
    pub leave_policies: Vec<LeavePolicy>,
}

/// Leave periods configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeavePeriodsConfig {
    /// Every leave period.
    pub leave_periods: Vec<LeavePeriod>,
}

/// Employees configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    /// Every employee.
    pub employees: Vec<Employee>,
}

/// Complete leave configuration.
///
/// This is the top-level configuration structure that combines all
/// the individual configuration files.
#[derive(Debug, Clone)]
pub struct LeaveConfig {
    settings: SystemSettings,
    leave_types: Vec<LeaveType>,
    leave_policies: Vec<LeavePolicy>,
    leave_periods: Vec<LeavePeriod>,
    employees: Vec<Employee>,
}

impl LeaveConfig {
    /// Creates a new leave configuration.
    pub fn new(
        settings: SystemSettings,
        leave_types: Vec<LeaveType>,
        leave_policies: Vec<LeavePolicy>,
        leave_periods: Vec<LeavePeriod>,
        employees: Vec<Employee>,
    ) -> Self {
        Self {
            settings,
            leave_types,
            leave_policies,
            leave_periods,
            employees,
        }
    }

    /// Returns the system settings.
    pub fn settings(&self) -> &SystemSettings {
        &self.settings
    }

    /// Returns every leave type descriptor.
    pub fn leave_types(&self) -> &[LeaveType] {
        &self.leave_types
    }

    /// Returns every leave policy.
    pub fn leave_policies(&self) -> &[LeavePolicy] {
        &self.leave_policies
    }

    /// Returns every leave period.
    pub fn leave_periods(&self) -> &[LeavePeriod] {
        &self.leave_periods
    }

    /// Returns every employee.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}
