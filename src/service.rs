//! The service facade.
//!
//! Ties the composer, batch engine, aggregator, and store together into
//! the operations a front end would call, and emits structured log events
//! with correlation ids so a batch or an edit can be traced end to end.

use tracing::{info, warn};
use uuid::Uuid;

use crate::aggregate;
use crate::compose::{compose_entry, PayrollDraft};
use crate::error::{PayrollError, PayrollResult};
use crate::ingest::{self, IngestOptions, IngestReport};
use crate::models::{
    Employee, NewEmployee, PayrollRecord, PayrollSummary, RecordFilter, SummaryTotals,
};
use crate::store::{EmployeeDirectory, PayrollStore};

/// Payroll operations over a store.
///
/// # Examples
///
/// ```
/// use payroll_engine::service::PayrollService;
/// use payroll_engine::store::MemoryStore;
///
/// let service = PayrollService::new(MemoryStore::new());
/// assert!(service.list_employees().is_empty());
/// ```
pub struct PayrollService<S> {
    store: S,
}

impl<S> PayrollService<S>
where
    S: PayrollStore + EmployeeDirectory,
{
    /// Wraps a store in the service facade.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates one payroll entry interactively.
    ///
    /// The employee must exist, the draft must pass validation, and the
    /// employee must not already have an entry for the derived work date.
    pub fn compose_single_payroll(
        &self,
        employee_id: u64,
        draft: PayrollDraft,
    ) -> PayrollResult<PayrollRecord> {
        let correlation_id = Uuid::new_v4();

        if !self.store.employee_exists(employee_id) {
            warn!(
                correlation_id = %correlation_id,
                employee_id = employee_id,
                "Payroll entry rejected: employee not found"
            );
            return Err(PayrollError::EmployeeNotFound {
                employee_id,
                row: 0,
            });
        }

        let candidate = compose_entry(employee_id, draft).inspect_err(|err| {
            warn!(
                correlation_id = %correlation_id,
                employee_id = employee_id,
                error = %err,
                "Payroll entry rejected"
            );
        })?;

        let record = self.store.create(candidate).inspect_err(|err| {
            warn!(
                correlation_id = %correlation_id,
                employee_id = employee_id,
                error = %err,
                "Payroll entry rejected at insert"
            );
        })?;

        info!(
            correlation_id = %correlation_id,
            record_id = record.id,
            employee_id = employee_id,
            date = %record.date,
            net_salary = %record.net_salary,
            "Payroll entry created"
        );
        Ok(record)
    }

    /// Ingests a CSV batch with the default options.
    pub fn ingest_batch(&self, bytes: &[u8]) -> PayrollResult<IngestReport> {
        self.ingest_batch_with_options(bytes, IngestOptions::default())
    }

    /// Ingests a CSV batch, committing all rows or none.
    pub fn ingest_batch_with_options(
        &self,
        bytes: &[u8],
        options: IngestOptions,
    ) -> PayrollResult<IngestReport> {
        match ingest::ingest_batch_with_options(&self.store, bytes, options) {
            Ok(report) => {
                info!(
                    batch_id = %report.batch_id,
                    inserted = report.inserted,
                    skipped = report.skipped.len(),
                    "Batch ingested"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(error = %err, "Batch rejected");
                Err(err)
            }
        }
    }

    /// Fetches one payroll record.
    pub fn get_payroll(&self, id: u64) -> PayrollResult<PayrollRecord> {
        self.store.get(id).ok_or(PayrollError::NotFound { id })
    }

    /// Lists records matching the filter, ascending by work date.
    pub fn list_payrolls(&self, filter: &RecordFilter) -> Vec<PayrollRecord> {
        self.store.query(filter)
    }

    /// Re-composes and replaces an existing record from a fresh draft.
    ///
    /// The record keeps its id and creation timestamp; every derived field
    /// (work date, net salary) is recomputed from the draft.
    pub fn edit_payroll(&self, id: u64, draft: PayrollDraft) -> PayrollResult<PayrollRecord> {
        let existing = self.store.get(id).ok_or(PayrollError::NotFound { id })?;
        let candidate = compose_entry(existing.employee_id, draft)?;
        let updated = self.store.update(id, candidate)?;

        info!(
            record_id = id,
            employee_id = updated.employee_id,
            date = %updated.date,
            "Payroll entry updated"
        );
        Ok(updated)
    }

    /// Deletes one payroll record.
    pub fn delete_payroll(&self, id: u64) -> PayrollResult<()> {
        self.store.delete(id)?;
        info!(record_id = id, "Payroll entry deleted");
        Ok(())
    }

    /// Summarizes the records matching the filter.
    ///
    /// An empty match yields all-zero totals, never an error.
    pub fn summarize(&self, filter: RecordFilter) -> PayrollSummary {
        let records = self.store.query(&filter);
        let totals = aggregate::summarize(&records);
        PayrollSummary {
            filter,
            totals,
            records,
        }
    }

    /// Summarizes without retaining the record list.
    pub fn summarize_totals(&self, filter: &RecordFilter) -> SummaryTotals {
        aggregate::summarize(&self.store.query(filter))
    }

    /// Renders the records matching the filter as a CSV export.
    pub fn export_csv(&self, filter: &RecordFilter) -> PayrollResult<Vec<u8>> {
        ingest::export_csv(&self.store.query(filter))
    }

    /// Registers an employee.
    pub fn add_employee(&self, new: NewEmployee) -> PayrollResult<Employee> {
        let employee = self.store.add_employee(new)?;
        info!(
            employee_id = employee.id,
            name = %employee.full_name(),
            "Employee registered"
        );
        Ok(employee)
    }

    /// Fetches one employee.
    pub fn get_employee(&self, id: u64) -> Option<Employee> {
        self.store.get_employee(id)
    }

    /// Looks up an employee by email address.
    pub fn find_employee_by_email(&self, email: &str) -> Option<Employee> {
        self.store.find_by_email(email)
    }

    /// Lists all employees.
    pub fn list_employees(&self) -> Vec<Employee> {
        self.store.list_employees()
    }

    /// Replaces an employee's details.
    pub fn update_employee(&self, id: u64, new: NewEmployee) -> Option<Employee> {
        self.store.update_employee(id, new)
    }

    /// Flips an employee between active and inactive.
    pub fn toggle_employee_status(&self, id: u64) -> Option<Employee> {
        self.store.toggle_employee_status(id)
    }

    /// Removes an employee and every payroll record that references them.
    ///
    /// Returns the number of cascaded records, or `None` if the employee
    /// did not exist.
    pub fn delete_employee(&self, id: u64) -> Option<usize> {
        let cascaded = self.store.delete_employee(id)?;
        info!(
            employee_id = id,
            cascaded_records = cascaded,
            "Employee deleted with cascade"
        );
        Some(cascaded)
    }
}
