//! The summary aggregator.
//!
//! A stateless fold over a record set producing [`SummaryTotals`]. All
//! summation is exact decimal arithmetic; the fold holds no shared
//! accumulator, so calling it twice over the same records yields identical
//! totals.

use rust_decimal::Decimal;

use crate::models::{PayrollRecord, SummaryTotals};

/// Sums the reportable fields over a set of records.
///
/// The input order does not matter; an empty set yields all-zero totals.
///
/// # Examples
///
/// ```
/// use payroll_engine::aggregate::summarize;
/// use payroll_engine::models::SummaryTotals;
///
/// assert_eq!(summarize(&[]), SummaryTotals::zero());
/// ```
pub fn summarize(records: &[PayrollRecord]) -> SummaryTotals {
    records.iter().fold(SummaryTotals::zero(), |acc, record| {
        SummaryTotals {
            total_hours_worked: acc.total_hours_worked + record.total_hours_worked,
            overtime_pay: acc.overtime_pay + record.overtime_pay,
            night_differential_pay: acc.night_differential_pay + record.night_differential_pay,
            allowance: acc.allowance + record.allowance,
            deductions: acc.deductions + record.deductions,
            subtotal: acc.subtotal + record.subtotal,
            net_salary: acc.net_salary + record.net_salary,
        }
    })
}

/// Sums only the net salary column, the figure the dashboard headline uses.
pub fn total_net_salary(records: &[PayrollRecord]) -> Decimal {
    records.iter().map(|r| r.net_salary).sum()
}
