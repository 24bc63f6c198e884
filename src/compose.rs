//! The single-entry payroll composer.
//!
//! Builds one validated [`NewPayrollRecord`] from interactive input:
//! normalizes the clock-in/clock-out timestamps (which may arrive as text
//! from a form), derives the work date from `time_in`, and runs the
//! validator. Persistence is the caller's final step so that either
//! exactly one record is created or none.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::NewPayrollRecord;
use crate::validation::{normalize_money, validate_entry};

/// Timestamp formats accepted from textual input, tried in order.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A clock time supplied either as a structured timestamp or as text
/// still to be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimestampInput {
    /// An already-structured timestamp.
    Timestamp(NaiveDateTime),
    /// Text in `YYYY-MM-DD HH:MM:SS` form (a `T` separator also works).
    Text(String),
}

impl TimestampInput {
    /// Resolves the input to a timestamp, failing with a parse error that
    /// names `field` if the text form is unparseable.
    pub fn resolve(&self, field: &str) -> PayrollResult<NaiveDateTime> {
        match self {
            Self::Timestamp(ts) => Ok(*ts),
            Self::Text(text) => {
                let text = text.trim();
                TIMESTAMP_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                    .ok_or_else(|| PayrollError::parse(field, text))
            }
        }
    }
}

impl From<NaiveDateTime> for TimestampInput {
    fn from(ts: NaiveDateTime) -> Self {
        Self::Timestamp(ts)
    }
}

/// One set of interactive field values for a payroll entry.
///
/// There is deliberately no `net_salary` field here: the validator derives
/// it from `subtotal` and `deductions`, and nothing else is trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollDraft {
    /// The employee's rate for one working day.
    pub daily_rate: Decimal,
    /// Supplemental allowance paid for the day.
    #[serde(default)]
    pub allowance: Decimal,
    /// Total hours worked.
    pub total_hours_worked: Decimal,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hour: Decimal,
    /// Pay for the overtime hours.
    #[serde(default)]
    pub overtime_pay: Decimal,
    /// Hours worked during designated night hours.
    #[serde(default)]
    pub night_differential_hour: Decimal,
    /// Supplemental pay for the night hours.
    #[serde(default)]
    pub night_differential_pay: Decimal,
    /// Deductions applied to the subtotal.
    #[serde(default)]
    pub deductions: Decimal,
    /// Free-text explanation of the deductions.
    #[serde(default)]
    pub deduction_remarks: String,
    /// Gross pay before deductions.
    pub subtotal: Decimal,
    /// When the employee clocked in.
    pub time_in: TimestampInput,
    /// When the employee clocked out.
    pub time_out: TimestampInput,
    /// Optional project tag.
    #[serde(default)]
    pub project: Option<String>,
}

/// Composes one validated candidate record from a draft.
///
/// Steps:
/// 1. resolve `time_in`/`time_out`, failing with [`PayrollError::Parse`]
///    naming the field;
/// 2. derive the work date from `time_in`'s calendar date;
/// 3. run the validator, returning [`PayrollError::Validation`] with every
///    collected violation;
/// 4. hand back the candidate for the store to persist.
///
/// No side effects happen here; duplicate detection is the store's job at
/// insert time.
pub fn compose_entry(employee_id: u64, draft: PayrollDraft) -> PayrollResult<NewPayrollRecord> {
    let time_in = draft.time_in.resolve("time_in")?;
    let time_out = draft.time_out.resolve("time_out")?;

    // The work date is always taken from the clock-in, never supplied
    // independently.
    let date = time_in.date();

    let amounts = validate_entry(draft.subtotal, draft.deductions, time_in, time_out)
        .map_err(PayrollError::Validation)?;

    Ok(NewPayrollRecord {
        employee_id,
        date,
        daily_rate: normalize_money(draft.daily_rate),
        allowance: normalize_money(draft.allowance),
        total_hours_worked: normalize_money(draft.total_hours_worked),
        overtime_hour: normalize_money(draft.overtime_hour),
        overtime_pay: normalize_money(draft.overtime_pay),
        night_differential_hour: normalize_money(draft.night_differential_hour),
        night_differential_pay: normalize_money(draft.night_differential_pay),
        deductions: amounts.deductions,
        deduction_remarks: draft.deduction_remarks,
        subtotal: amounts.subtotal,
        net_salary: amounts.net_salary,
        time_in,
        time_out,
        project: draft.project,
    })
}
