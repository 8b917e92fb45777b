use super::{util, Finding, FindingKind};
use crate::model::{Employee, EmployeeId, Mission, ShiftRecord};
use chrono::NaiveDate;
use std::collections::HashMap;

pub(super) fn audit(
    schedule: &[ShiftRecord],
    missions: &[Mission],
    employees: &[Employee],
) -> Vec<Finding> {
    let mut out = Vec::new();
    let mut first_of_day: HashMap<(&EmployeeId, NaiveDate), &ShiftRecord> = HashMap::new();

    for record in schedule {
        if !missions.iter().any(|m| m.id == record.mission_id) {
            out.push(finding(FindingKind::UnknownMission, record, None));
        }

        let Some(employee_id) = record.employee_id.as_ref() else {
            out.push(finding(FindingKind::Unfilled, record, None));
            continue;
        };

        match util::find_employee(employees, employee_id) {
            None => out.push(finding(FindingKind::UnknownEmployee, record, None)),
            Some(employee) => {
                if !employee.has_role(&record.role) {
                    out.push(finding(FindingKind::MissingRole, record, None));
                }
                if !employee.is_available_on(record.date) {
                    out.push(finding(FindingKind::NotAvailable, record, None));
                }
            }
        }

        match first_of_day.get(&(employee_id, record.date)) {
            Some(first) => out.push(finding(FindingKind::DoubleBooking, first, Some(record))),
            None => {
                first_of_day.insert((employee_id, record.date), record);
            }
        }
    }

    out
}

fn finding(kind: FindingKind, record: &ShiftRecord, other: Option<&ShiftRecord>) -> Finding {
    Finding {
        kind,
        date: record.date,
        shift: record.id.clone(),
        other: other.map(|o| o.id.clone()),
        employee: record.employee_id.clone(),
    }
}
