//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod record;
mod summary;

pub use employee::{Employee, EmployeeStatus, NewEmployee};
pub use record::{NewPayrollRecord, PayrollRecord};
pub use summary::{PayrollSummary, RecordFilter, SummaryTotals};
