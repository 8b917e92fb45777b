use crate::model::{Employee, EmployeeId, Mission, Role, ShiftRecord};
use crate::scheduler::DateRange;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Employés disponibles un jour donné, et décompte par rôle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub employees: Vec<EmployeeId>,
    pub by_role: BTreeMap<Role, usize>,
}

impl DayAvailability {
    pub fn count(&self) -> usize {
        self.employees.len()
    }
}

pub fn availability_on(employees: &[Employee], date: NaiveDate) -> DayAvailability {
    let mut by_role = BTreeMap::new();
    let mut ids = Vec::new();
    for employee in employees.iter().filter(|e| e.is_available_on(date)) {
        ids.push(employee.id.clone());
        for role in &employee.roles {
            *by_role.entry(role.clone()).or_insert(0) += 1;
        }
    }
    DayAvailability {
        date,
        employees: ids,
        by_role,
    }
}

pub fn availability_calendar(employees: &[Employee], range: DateRange) -> Vec<DayAvailability> {
    range
        .days()
        .into_iter()
        .map(|day| availability_on(employees, day))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayCoverage {
    pub assigned: usize,
    pub unassigned: usize,
}

/// Bilan d'un planning : remplissage global, par jour, charge par employé.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    pub total: usize,
    pub assigned: usize,
    pub unassigned: usize,
    pub per_day: BTreeMap<NaiveDate, DayCoverage>,
    pub load: BTreeMap<EmployeeId, usize>,
}

impl Coverage {
    /// Part de créneaux non pourvus (0.0 pour un planning vide).
    pub fn unassigned_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.unassigned as f64 / self.total as f64
    }
}

pub fn coverage(schedule: &[ShiftRecord]) -> Coverage {
    let mut out = Coverage {
        total: schedule.len(),
        ..Coverage::default()
    };
    for record in schedule {
        let day = out.per_day.entry(record.date).or_default();
        match &record.employee_id {
            Some(id) => {
                out.assigned += 1;
                day.assigned += 1;
                *out.load.entry(id.clone()).or_insert(0) += 1;
            }
            None => {
                out.unassigned += 1;
                day.unassigned += 1;
            }
        }
    }
    out
}

/// Vue tabulaire : une ligne par employé ou par mission, une colonne par jour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// Rendu texte `a | b | c`, une ligne par rangée, en-tête compris.
    pub fn to_text(&self) -> String {
        std::iter::once(&self.header)
            .chain(self.rows.iter())
            .map(|row| row.join(" | "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn day_columns(range: DateRange) -> (Vec<NaiveDate>, Vec<String>) {
    let days = range.days();
    let labels = days.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
    (days, labels)
}

pub fn employee_grid(schedule: &[ShiftRecord], employees: &[Employee], range: DateRange) -> Grid {
    let (days, labels) = day_columns(range);
    let mut header = vec!["name".to_string(), "roles".to_string()];
    header.extend(labels);

    let mut rows: Vec<Vec<String>> = employees
        .iter()
        .map(|employee| {
            let roles: Vec<&str> = employee.roles.iter().map(Role::as_str).collect();
            let mut row = vec![employee.name.clone(), roles.join(", ")];
            row.extend(days.iter().map(|day| {
                schedule
                    .iter()
                    .find(|r| r.employee_id.as_ref() == Some(&employee.id) && r.date == *day)
                    .map(ShiftRecord::label)
                    .unwrap_or_default()
            }));
            row
        })
        .collect();

    if schedule.iter().any(|r| !r.is_assigned()) {
        let mut row = vec![UNASSIGNED_LABEL.to_string(), String::new()];
        row.extend(days.iter().map(|day| {
            schedule
                .iter()
                .filter(|r| !r.is_assigned() && r.date == *day)
                .map(ShiftRecord::label)
                .collect::<Vec<_>>()
                .join(", ")
        }));
        rows.push(row);
    }

    Grid { header, rows }
}

pub fn mission_grid(
    schedule: &[ShiftRecord],
    missions: &[Mission],
    employees: &[Employee],
    range: DateRange,
) -> Grid {
    let (days, labels) = day_columns(range);
    let mut header = vec!["mission".to_string()];
    header.extend(labels);

    let mut active: Vec<&Mission> = missions.iter().filter(|m| m.enabled).collect();
    active.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let rows = active
        .into_iter()
        .map(|mission| {
            let mut row = vec![format!("{} ({})", mission.name, mission.window_label())];
            row.extend(days.iter().map(|day| {
                schedule
                    .iter()
                    .filter(|r| r.mission_id == mission.id && r.date == *day)
                    .map(|r| {
                        let who = r
                            .employee_id
                            .as_ref()
                            .and_then(|id| employees.iter().find(|e| &e.id == id))
                            .map(|e| e.name.as_str())
                            .unwrap_or(UNASSIGNED_LABEL);
                        format!("{} ({})", who, r.role)
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            }));
            row
        })
        .collect();

    Grid { header, rows }
}
