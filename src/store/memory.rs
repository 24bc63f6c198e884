//! In-memory store implementation.
//!
//! A single `RwLock`-guarded table set backing both the employee directory
//! and the payroll ledger. The `(employee_id, date)` pairs live in a key
//! set that is checked while the write lock is held, which makes
//! constraint-checked inserts atomic without any further coordination.

use std::collections::{BTreeMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, Utc};

use crate::error::{FieldViolation, PayrollError, PayrollResult};
use crate::models::{Employee, NewEmployee, NewPayrollRecord, PayrollRecord, RecordFilter};
use crate::store::{EmployeeDirectory, PayrollStore};

#[derive(Debug, Default)]
struct Inner {
    employees: BTreeMap<u64, Employee>,
    records: BTreeMap<u64, PayrollRecord>,
    /// One entry per persisted `(employee_id, date)` pair.
    day_keys: HashSet<(u64, NaiveDate)>,
    next_employee_id: u64,
    next_record_id: u64,
}

/// In-memory employee directory and payroll record store.
///
/// Suitable as the reference implementation for tests and for embedding
/// the engine without an external database. Cheap to share behind an
/// `Arc`; all methods take `&self`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn insert_record(&mut self, new: NewPayrollRecord) -> PayrollRecord {
        self.next_record_id += 1;
        let record = new.into_record(self.next_record_id, Utc::now());
        self.day_keys.insert((record.employee_id, record.date));
        self.records.insert(record.id, record.clone());
        record
    }
}

impl PayrollStore for MemoryStore {
    fn create(&self, new: NewPayrollRecord) -> PayrollResult<PayrollRecord> {
        let mut inner = self.write();

        if inner.day_keys.contains(&(new.employee_id, new.date)) {
            return Err(PayrollError::DuplicateEntry {
                employee_id: new.employee_id,
                date: new.date,
            });
        }

        Ok(inner.insert_record(new))
    }

    fn create_batch(&self, rows: Vec<NewPayrollRecord>) -> PayrollResult<usize> {
        let mut inner = self.write();

        // Check the whole batch, against the table and against itself,
        // before inserting anything.
        let mut batch_keys: HashSet<(u64, NaiveDate)> = HashSet::new();
        for row in &rows {
            let key = (row.employee_id, row.date);
            if inner.day_keys.contains(&key) || !batch_keys.insert(key) {
                return Err(PayrollError::DuplicateEntry {
                    employee_id: row.employee_id,
                    date: row.date,
                });
            }
        }

        let inserted = rows.len();
        for row in rows {
            inner.insert_record(row);
        }
        Ok(inserted)
    }

    fn get(&self, id: u64) -> Option<PayrollRecord> {
        self.read().records.get(&id).cloned()
    }

    fn update(&self, id: u64, new: NewPayrollRecord) -> PayrollResult<PayrollRecord> {
        let mut inner = self.write();

        let Some(existing) = inner.records.get(&id).cloned() else {
            return Err(PayrollError::NotFound { id });
        };

        let old_key = (existing.employee_id, existing.date);
        let new_key = (new.employee_id, new.date);
        if new_key != old_key && inner.day_keys.contains(&new_key) {
            return Err(PayrollError::DuplicateEntry {
                employee_id: new.employee_id,
                date: new.date,
            });
        }

        // Full field replacement; identity and creation timestamp survive.
        let updated = new.into_record(id, existing.created_at);
        inner.day_keys.remove(&old_key);
        inner.day_keys.insert(new_key);
        inner.records.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete(&self, id: u64) -> PayrollResult<()> {
        let mut inner = self.write();

        match inner.records.remove(&id) {
            Some(record) => {
                inner.day_keys.remove(&(record.employee_id, record.date));
                Ok(())
            }
            None => Err(PayrollError::NotFound { id }),
        }
    }

    fn query(&self, filter: &RecordFilter) -> Vec<PayrollRecord> {
        let inner = self.read();
        let mut records: Vec<PayrollRecord> = inner
            .records
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.date, r.id));
        records
    }
}

impl EmployeeDirectory for MemoryStore {
    fn add_employee(&self, new: NewEmployee) -> PayrollResult<Employee> {
        let mut inner = self.write();

        if inner.employees.values().any(|e| e.email == new.email) {
            return Err(PayrollError::Validation(vec![FieldViolation::new(
                "email",
                format!("email '{}' is already in use", new.email),
            )]));
        }

        inner.next_employee_id += 1;
        let employee = Employee {
            id: inner.next_employee_id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            hire_date: new.hire_date,
            position: new.position,
            status: new.status,
        };
        inner.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    fn get_employee(&self, id: u64) -> Option<Employee> {
        self.read().employees.get(&id).cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<Employee> {
        self.read()
            .employees
            .values()
            .find(|e| e.email == email)
            .cloned()
    }

    fn list_employees(&self) -> Vec<Employee> {
        self.read().employees.values().cloned().collect()
    }

    fn update_employee(&self, id: u64, new: NewEmployee) -> Option<Employee> {
        let mut inner = self.write();

        if !inner.employees.contains_key(&id) {
            return None;
        }
        let employee = Employee {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            hire_date: new.hire_date,
            position: new.position,
            status: new.status,
        };
        inner.employees.insert(id, employee.clone());
        Some(employee)
    }

    fn toggle_employee_status(&self, id: u64) -> Option<Employee> {
        let mut inner = self.write();
        let employee = inner.employees.get_mut(&id)?;
        employee.status = employee.status.toggled();
        Some(employee.clone())
    }

    fn delete_employee(&self, id: u64) -> Option<usize> {
        let mut inner = self.write();

        inner.employees.remove(&id)?;

        // Explicit referential-integrity rule: payroll history goes with
        // the employee.
        let doomed: Vec<u64> = inner
            .records
            .values()
            .filter(|r| r.employee_id == id)
            .map(|r| r.id)
            .collect();
        for record_id in &doomed {
            if let Some(record) = inner.records.remove(record_id) {
                inner.day_keys.remove(&(record.employee_id, record.date));
            }
        }
        Some(doomed.len())
    }
}
