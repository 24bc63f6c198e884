//! Storage contracts and the in-memory reference store.
//!
//! The `(employee_id, date)` uniqueness invariant lives at this layer, not
//! in the callers: whichever insert commits first wins and the loser
//! observes [`crate::error::PayrollError::DuplicateEntry`].

mod memory;

pub use memory::MemoryStore;

use crate::error::PayrollResult;
use crate::models::{Employee, NewEmployee, NewPayrollRecord, PayrollRecord, RecordFilter};

/// The durable ledger of payroll records.
///
/// Implementations enforce the `(employee_id, date)` uniqueness constraint
/// on every insert and keep `created_at` immutable across updates.
pub trait PayrollStore {
    /// Persists one record, assigning its id and creation timestamp.
    ///
    /// Fails with `DuplicateEntry` if a record for the same employee and
    /// date already exists.
    fn create(&self, new: NewPayrollRecord) -> PayrollResult<PayrollRecord>;

    /// Persists a batch of records in one all-or-nothing step.
    ///
    /// If any row collides with an existing record, or two rows in the
    /// batch collide with each other, nothing is inserted and the first
    /// collision is reported as `DuplicateEntry`.
    fn create_batch(&self, rows: Vec<NewPayrollRecord>) -> PayrollResult<usize>;

    /// Fetches one record by id.
    fn get(&self, id: u64) -> Option<PayrollRecord>;

    /// Replaces every editable field of an existing record.
    ///
    /// Fails with `NotFound` if the id does not exist, or with
    /// `DuplicateEntry` if the replacement would collide with another
    /// record's `(employee_id, date)` pair. The original creation
    /// timestamp is preserved.
    fn update(&self, id: u64, new: NewPayrollRecord) -> PayrollResult<PayrollRecord>;

    /// Deletes one record by id. Fails with `NotFound` if absent.
    fn delete(&self, id: u64) -> PayrollResult<()>;

    /// Returns the records matching the filter, ascending by work date
    /// (id breaks ties) so reports read chronologically.
    fn query(&self, filter: &RecordFilter) -> Vec<PayrollRecord>;
}

/// Identity and status of the persons payroll applies to.
pub trait EmployeeDirectory {
    /// Registers an employee, assigning an id.
    ///
    /// The email address is unique across the directory; a conflict is
    /// reported as a validation violation on the `email` field.
    fn add_employee(&self, new: NewEmployee) -> PayrollResult<Employee>;

    /// Fetches one employee by id.
    fn get_employee(&self, id: u64) -> Option<Employee>;

    /// Looks up an employee by email address.
    fn find_by_email(&self, email: &str) -> Option<Employee>;

    /// Returns true if the employee id exists.
    fn employee_exists(&self, id: u64) -> bool {
        self.get_employee(id).is_some()
    }

    /// Lists all employees.
    fn list_employees(&self) -> Vec<Employee>;

    /// Replaces an employee's details; `None` if the id does not exist.
    fn update_employee(&self, id: u64, new: NewEmployee) -> Option<Employee>;

    /// Flips the employee between active and inactive; `None` if absent.
    fn toggle_employee_status(&self, id: u64) -> Option<Employee>;

    /// Removes an employee and, by explicit policy, every payroll record
    /// that references them. Returns the number of cascaded records, or
    /// `None` if the employee did not exist.
    fn delete_employee(&self, id: u64) -> Option<usize>;
}
