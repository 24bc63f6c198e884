//! Summary and filter models.
//!
//! This module contains the [`SummaryTotals`] produced by the aggregator,
//! the [`RecordFilter`] used to select records, and the [`PayrollSummary`]
//! payload handed to document exporters.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayrollRecord;

/// Aggregated totals over a set of payroll records.
///
/// An empty record set yields all-zero totals, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTotals {
    /// Sum of hours worked.
    pub total_hours_worked: Decimal,
    /// Sum of overtime pay.
    pub overtime_pay: Decimal,
    /// Sum of night-differential pay.
    pub night_differential_pay: Decimal,
    /// Sum of allowances.
    pub allowance: Decimal,
    /// Sum of deductions.
    pub deductions: Decimal,
    /// Sum of gross pay before deductions.
    pub subtotal: Decimal,
    /// Sum of net salary.
    pub net_salary: Decimal,
}

impl SummaryTotals {
    /// Returns the all-zero totals of an empty record set.
    pub fn zero() -> Self {
        Self {
            total_hours_worked: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            night_differential_pay: Decimal::ZERO,
            allowance: Decimal::ZERO,
            deductions: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            net_salary: Decimal::ZERO,
        }
    }
}

/// Selects records by employee and/or inclusive date range.
///
/// A `None` component leaves that dimension unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Restrict to one employee.
    pub employee_id: Option<u64>,
    /// Earliest work date to include.
    pub start_date: Option<NaiveDate>,
    /// Latest work date to include.
    pub end_date: Option<NaiveDate>,
}

impl RecordFilter {
    /// Returns true if the record falls inside every constrained dimension.
    pub fn matches(&self, record: &PayrollRecord) -> bool {
        if let Some(employee_id) = self.employee_id {
            if record.employee_id != employee_id {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if record.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if record.date > end {
                return false;
            }
        }
        true
    }

    /// Filter selecting every record of one employee.
    pub fn for_employee(employee_id: u64) -> Self {
        Self {
            employee_id: Some(employee_id),
            ..Self::default()
        }
    }
}

/// A computed summary plus the records it was computed from.
///
/// The records are in ascending-date order so a document exporter can
/// render them as a readable report without re-sorting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The filter the summary was computed for.
    pub filter: RecordFilter,
    /// Aggregated totals over the filtered records.
    pub totals: SummaryTotals,
    /// The filtered records, ascending by work date.
    pub records: Vec<PayrollRecord>,
}
