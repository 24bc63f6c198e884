//! Payroll record model.
//!
//! This module defines the PayrollRecord struct, the unit of computed pay
//! for one employee for one calendar date, and the write-side
//! NewPayrollRecord the store turns into a persisted record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The unit of computed pay for one employee for one calendar date.
///
/// At most one record may exist per `(employee_id, date)` pair; the store
/// enforces this. All money and hour fields are fixed-point decimals with
/// two decimal places so repeated aggregation never drifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier assigned by the store.
    pub id: u64,
    /// The employee this record belongs to.
    pub employee_id: u64,
    /// The work date, derived from `time_in`'s calendar date.
    pub date: NaiveDate,
    /// The employee's rate for one working day.
    pub daily_rate: Decimal,
    /// Supplemental allowance paid for the day.
    pub allowance: Decimal,
    /// Total hours worked.
    pub total_hours_worked: Decimal,
    /// Overtime hours worked.
    pub overtime_hour: Decimal,
    /// Pay for the overtime hours.
    pub overtime_pay: Decimal,
    /// Hours worked during designated night hours.
    pub night_differential_hour: Decimal,
    /// Supplemental pay for the night hours.
    pub night_differential_pay: Decimal,
    /// Deductions applied to the subtotal.
    pub deductions: Decimal,
    /// Free-text explanation of the deductions; may be empty.
    #[serde(default)]
    pub deduction_remarks: String,
    /// Gross pay before deductions.
    pub subtotal: Decimal,
    /// Pay actually payable: `subtotal - deductions`.
    pub net_salary: Decimal,
    /// When the employee clocked in.
    pub time_in: NaiveDateTime,
    /// When the employee clocked out.
    pub time_out: NaiveDateTime,
    /// Optional project tag for the day's work.
    #[serde(default)]
    pub project: Option<String>,
    /// When the record was created. Assigned by the store, never edited.
    pub created_at: DateTime<Utc>,
}

/// A fully validated candidate record, ready to persist.
///
/// Produced only by the composer or the batch ingestion engine; the store
/// assigns `id` and `created_at` when it accepts one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayrollRecord {
    /// The employee this record belongs to.
    pub employee_id: u64,
    /// The work date.
    pub date: NaiveDate,
    /// The employee's rate for one working day.
    pub daily_rate: Decimal,
    /// Supplemental allowance paid for the day.
    pub allowance: Decimal,
    /// Total hours worked.
    pub total_hours_worked: Decimal,
    /// Overtime hours worked.
    pub overtime_hour: Decimal,
    /// Pay for the overtime hours.
    pub overtime_pay: Decimal,
    /// Hours worked during designated night hours.
    pub night_differential_hour: Decimal,
    /// Supplemental pay for the night hours.
    pub night_differential_pay: Decimal,
    /// Deductions applied to the subtotal.
    pub deductions: Decimal,
    /// Free-text explanation of the deductions; may be empty.
    #[serde(default)]
    pub deduction_remarks: String,
    /// Gross pay before deductions.
    pub subtotal: Decimal,
    /// Pay actually payable: `subtotal - deductions`.
    pub net_salary: Decimal,
    /// When the employee clocked in.
    pub time_in: NaiveDateTime,
    /// When the employee clocked out.
    pub time_out: NaiveDateTime,
    /// Optional project tag for the day's work.
    #[serde(default)]
    pub project: Option<String>,
}

impl NewPayrollRecord {
    /// Turns the candidate into a persisted record with the given identity.
    pub(crate) fn into_record(self, id: u64, created_at: DateTime<Utc>) -> PayrollRecord {
        PayrollRecord {
            id,
            employee_id: self.employee_id,
            date: self.date,
            daily_rate: self.daily_rate,
            allowance: self.allowance,
            total_hours_worked: self.total_hours_worked,
            overtime_hour: self.overtime_hour,
            overtime_pay: self.overtime_pay,
            night_differential_hour: self.night_differential_hour,
            night_differential_pay: self.night_differential_pay,
            deductions: self.deductions,
            deduction_remarks: self.deduction_remarks,
            subtotal: self.subtotal,
            net_salary: self.net_salary,
            time_in: self.time_in,
            time_out: self.time_out,
            project: self.project,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn sample_new_record() -> NewPayrollRecord {
        NewPayrollRecord {
            employee_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            daily_rate: dec("1000.00"),
            allowance: dec("0.00"),
            total_hours_worked: dec("9.00"),
            overtime_hour: dec("0.00"),
            overtime_pay: dec("0.00"),
            night_differential_hour: dec("0.00"),
            night_differential_pay: dec("0.00"),
            deductions: dec("50.00"),
            deduction_remarks: "SSS contribution".to_string(),
            subtotal: dec("1000.00"),
            net_salary: dec("950.00"),
            time_in: make_datetime("2025-01-10 08:00:00"),
            time_out: make_datetime("2025-01-10 17:00:00"),
            project: Some("Site A".to_string()),
        }
    }

    #[test]
    fn test_into_record_preserves_fields() {
        let created_at = Utc::now();
        let record = sample_new_record().into_record(17, created_at);

        assert_eq!(record.id, 17);
        assert_eq!(record.employee_id, 1);
        assert_eq!(record.net_salary, dec("950.00"));
        assert_eq!(record.subtotal - record.deductions, record.net_salary);
        assert_eq!(record.created_at, created_at);
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let record = sample_new_record().into_record(1, Utc::now());
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: PayrollRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_record_deserialization_defaults() {
        let json = r#"{
            "id": 3,
            "employee_id": 1,
            "date": "2025-01-10",
            "daily_rate": "1000.00",
            "allowance": "0",
            "total_hours_worked": "9",
            "overtime_hour": "0",
            "overtime_pay": "0",
            "night_differential_hour": "0",
            "night_differential_pay": "0",
            "deductions": "50.00",
            "subtotal": "1000.00",
            "net_salary": "950.00",
            "time_in": "2025-01-10T08:00:00",
            "time_out": "2025-01-10T17:00:00",
            "created_at": "2025-01-10T17:05:00Z"
        }"#;

        let record: PayrollRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.deduction_remarks, "");
        assert_eq!(record.project, None);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
    }

    #[test]
    fn test_decimal_fields_keep_two_places() {
        let record = sample_new_record().into_record(1, Utc::now());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"net_salary\":\"950.00\""));
        assert!(json.contains("\"deductions\":\"50.00\""));
    }
}
