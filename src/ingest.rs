//! The batch ingestion engine.
//!
//! Parses a CSV upload where each row is a candidate payroll record keyed
//! by an employee id, validates the file schema up front, normalizes
//! sparse cells leniently, and commits every successfully built row in one
//! all-or-nothing store call.
//!
//! Batch mode trusts the spreadsheet's computed columns (including
//! `net_salary`); only structural and parse correctness is enforced per
//! row. The interactive composer is the path that re-derives amounts.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{NewPayrollRecord, PayrollRecord};
use crate::store::{EmployeeDirectory, PayrollStore};

/// The fixed column list of the upload template, in order.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    "employee_id",
    "daily_rate",
    "allowance",
    "total_hours_worked",
    "overtime_pay",
    "overtime_hour",
    "night_differential_pay",
    "night_differential_hour",
    "deductions",
    "deduction_remarks",
    "subtotal",
    "net_salary",
    "date",
    "time_in",
    "time_out",
    "project",
];

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// What to do when a row references an employee id that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingEmployeePolicy {
    /// Abort the entire batch at the first unresolvable id. This mirrors
    /// the original system's behavior and is the default.
    #[default]
    FailFast,
    /// Skip the offending row, report it, and keep processing.
    SkipRow,
}

/// Tunable behavior for one ingestion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Policy for rows whose employee id cannot be resolved.
    pub missing_employee: MissingEmployeePolicy,
}

/// A row that was skipped under [`MissingEmployeePolicy::SkipRow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// The 1-based data row (the header is row zero).
    pub row: usize,
    /// The employee id that could not be resolved.
    pub employee_id: u64,
}

/// The outcome of a successfully committed batch.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// Correlation id for tracing this batch through the logs.
    pub batch_id: Uuid,
    /// Number of records inserted.
    pub inserted: usize,
    /// Rows skipped under the skip policy; empty under fail-fast.
    pub skipped: Vec<SkippedRow>,
}

/// Ingests a CSV batch with the default options (fail fast on an unknown
/// employee id).
pub fn ingest_batch<S>(store: &S, bytes: &[u8]) -> PayrollResult<IngestReport>
where
    S: PayrollStore + EmployeeDirectory,
{
    ingest_batch_with_options(store, bytes, IngestOptions::default())
}

/// Ingests a CSV batch.
///
/// Steps:
/// 1. Schema check: every [`REQUIRED_COLUMNS`] entry must be present in
///    the header, otherwise the batch aborts with
///    [`PayrollError::Schema`] before any row is examined.
/// 2. Per row: resolve the employee id (per the configured policy),
///    normalize empty cells (numeric to zero, text to empty), and parse
///    the date and clock times into timestamps. Any parse failure aborts
///    the batch with the row and column named.
/// 3. Commit every built row in one all-or-nothing store call; a
///    uniqueness collision anywhere commits nothing.
pub fn ingest_batch_with_options<S>(
    store: &S,
    bytes: &[u8],
    options: IngestOptions,
) -> PayrollResult<IngestReport>
where
    S: PayrollStore + EmployeeDirectory,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| PayrollError::parse("header", e.to_string()))?
        .clone();

    let columns = check_schema(&headers)?;

    let mut rows: Vec<NewPayrollRecord> = Vec::new();
    let mut skipped: Vec<SkippedRow> = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let row = index + 1;
        let record = result.map_err(|e| PayrollError::parse(format!("row {row}"), e.to_string()))?;

        let employee_id = parse_u64(&record, &columns, "employee_id", row)?;
        if !store.employee_exists(employee_id) {
            match options.missing_employee {
                MissingEmployeePolicy::FailFast => {
                    return Err(PayrollError::EmployeeNotFound { employee_id, row });
                }
                MissingEmployeePolicy::SkipRow => {
                    skipped.push(SkippedRow { row, employee_id });
                    continue;
                }
            }
        }

        let date = parse_date(&record, &columns, row)?;
        let time_in = parse_time(&record, &columns, "time_in", date, row)?;
        let time_out = parse_time(&record, &columns, "time_out", date, row)?;

        rows.push(NewPayrollRecord {
            employee_id,
            date,
            daily_rate: parse_decimal(&record, &columns, "daily_rate", row)?,
            allowance: parse_decimal(&record, &columns, "allowance", row)?,
            total_hours_worked: parse_decimal(&record, &columns, "total_hours_worked", row)?,
            overtime_hour: parse_decimal(&record, &columns, "overtime_hour", row)?,
            overtime_pay: parse_decimal(&record, &columns, "overtime_pay", row)?,
            night_differential_hour: parse_decimal(
                &record,
                &columns,
                "night_differential_hour",
                row,
            )?,
            night_differential_pay: parse_decimal(
                &record,
                &columns,
                "night_differential_pay",
                row,
            )?,
            deductions: parse_decimal(&record, &columns, "deductions", row)?,
            deduction_remarks: cell(&record, &columns, "deduction_remarks").to_string(),
            subtotal: parse_decimal(&record, &columns, "subtotal", row)?,
            net_salary: parse_decimal(&record, &columns, "net_salary", row)?,
            time_in,
            time_out,
            project: match cell(&record, &columns, "project") {
                "" => None,
                text => Some(text.to_string()),
            },
        });
    }

    let inserted = store.create_batch(rows)?;

    Ok(IngestReport {
        batch_id: Uuid::new_v4(),
        inserted,
        skipped,
    })
}

/// Renders the upload template: the header row alone, in the fixed order.
pub fn template_csv() -> String {
    let mut line = REQUIRED_COLUMNS.join(",");
    line.push('\n');
    line
}

/// Renders records to CSV in the template's column order, dates as
/// `YYYY-MM-DD` and clock times as `HH:MM:SS`.
pub fn export_csv(records: &[PayrollRecord]) -> PayrollResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(REQUIRED_COLUMNS)
        .map_err(storage_error)?;

    for record in records {
        writer
            .write_record(&[
                record.employee_id.to_string(),
                record.daily_rate.to_string(),
                record.allowance.to_string(),
                record.total_hours_worked.to_string(),
                record.overtime_pay.to_string(),
                record.overtime_hour.to_string(),
                record.night_differential_pay.to_string(),
                record.night_differential_hour.to_string(),
                record.deductions.to_string(),
                record.deduction_remarks.clone(),
                record.subtotal.to_string(),
                record.net_salary.to_string(),
                record.date.format(DATE_FORMAT).to_string(),
                record.time_in.format(TIME_FORMAT).to_string(),
                record.time_out.format(TIME_FORMAT).to_string(),
                record.project.clone().unwrap_or_default(),
            ])
            .map_err(storage_error)?;
    }

    writer.into_inner().map_err(|e| PayrollError::Storage {
        message: e.to_string(),
    })
}

fn storage_error(e: csv::Error) -> PayrollError {
    PayrollError::Storage {
        message: e.to_string(),
    }
}

/// Resolved header positions for the required columns.
struct Columns {
    indices: [usize; REQUIRED_COLUMNS.len()],
}

impl Columns {
    fn index_of(&self, name: &str) -> usize {
        // The name always comes from REQUIRED_COLUMNS, so the lookup
        // cannot miss.
        let position = REQUIRED_COLUMNS
            .iter()
            .position(|c| *c == name)
            .unwrap_or_default();
        self.indices[position]
    }
}

/// Verifies every required column is present, before any row is touched.
fn check_schema(headers: &csv::StringRecord) -> PayrollResult<Columns> {
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (position, column) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h == *column) {
            Some(index) => indices[position] = index,
            None => {
                return Err(PayrollError::Schema {
                    column: (*column).to_string(),
                });
            }
        }
    }
    Ok(Columns { indices })
}

/// Fetches a cell by column name; a short row reads as empty.
fn cell<'a>(record: &'a csv::StringRecord, columns: &Columns, name: &str) -> &'a str {
    record.get(columns.index_of(name)).unwrap_or("")
}

/// Parses a numeric cell; empty normalizes to zero.
fn parse_decimal(
    record: &csv::StringRecord,
    columns: &Columns,
    name: &str,
    row: usize,
) -> PayrollResult<Decimal> {
    let text = cell(record, columns, name);
    if text.is_empty() {
        return Ok(Decimal::ZERO);
    }
    text.parse::<Decimal>()
        .map(|d| d.round_dp(crate::validation::MONEY_SCALE))
        .map_err(|_| PayrollError::parse(format!("{name} (row {row})"), text))
}

/// Parses an id cell; empty normalizes to zero, which no employee carries.
fn parse_u64(
    record: &csv::StringRecord,
    columns: &Columns,
    name: &str,
    row: usize,
) -> PayrollResult<u64> {
    let text = cell(record, columns, name);
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<u64>()
        .map_err(|_| PayrollError::parse(format!("{name} (row {row})"), text))
}

fn parse_date(
    record: &csv::StringRecord,
    columns: &Columns,
    row: usize,
) -> PayrollResult<NaiveDate> {
    let text = cell(record, columns, "date");
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| PayrollError::parse(format!("date (row {row})"), text))
}

/// Parses a clock-time cell and combines it with the row's date.
fn parse_time(
    record: &csv::StringRecord,
    columns: &Columns,
    name: &str,
    date: NaiveDate,
    row: usize,
) -> PayrollResult<NaiveDateTime> {
    let text = cell(record, columns, name);
    NaiveTime::parse_from_str(text, TIME_FORMAT)
        .map(|time| NaiveDateTime::new(date, time))
        .map_err(|_| PayrollError::parse(format!("{name} (row {row})"), text))
}
