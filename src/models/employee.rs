//! Employee model.
//!
//! Only the fields leave allocation depends on are carried here; the rest of
//! the employee record lives in the external store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an employee leave policies can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    #[serde(default)]
    pub employee_name: String,
    /// The date the employee joined.
    pub date_of_joining: NaiveDate,
}
