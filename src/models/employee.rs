//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeStatus enum for
//! representing the persons payroll applies to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents the employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// The employee is currently employed and payable.
    Active,
    /// The employee is no longer active; existing records are retained.
    Inactive,
}

impl EmployeeStatus {
    /// Returns the opposite status, mirroring the status toggle the
    /// directory screens expose.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Represents an employee tracked by the payroll system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier assigned by the store.
    pub id: u64,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The employee's unique email address.
    pub email: String,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// The employee's job position.
    pub position: String,
    /// The employment status.
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns the employee's full name.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmployeeStatus};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     first_name: "Maria".to_string(),
    ///     last_name: "Santos".to_string(),
    ///     email: "maria.santos@example.com".to_string(),
    ///     hire_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    ///     position: "Clerk".to_string(),
    ///     status: EmployeeStatus::Active,
    /// };
    /// assert_eq!(employee.full_name(), "Maria Santos");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the employee is currently active.
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Employee fields as supplied by a caller; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The employee's unique email address.
    pub email: String,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// The employee's job position.
    pub position: String,
    /// The employment status; defaults to active.
    #[serde(default)]
    pub status: EmployeeStatus,
}
