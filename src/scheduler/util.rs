use crate::model::{Employee, EmployeeId};
use chrono::NaiveDate;

pub(super) fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut current = start;
    while current <= end {
        out.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    out
}

pub(super) fn find_employee<'a>(employees: &'a [Employee], id: &EmployeeId) -> Option<&'a Employee> {
    employees.iter().find(|e| &e.id == id)
}
