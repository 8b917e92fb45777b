use super::load::LoadTable;
use super::{DateRange, TieBreak};
use crate::model::{Employee, EmployeeId, Mission, Role, ShiftRecord};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Passe gloutonne unique : jour, mission, besoin, créneau.
pub(super) fn assign_greedy<T: TieBreak + ?Sized>(
    missions: &[Mission],
    employees: &[Employee],
    range: DateRange,
    prior: &[ShiftRecord],
    tie_break: &mut T,
) -> Vec<ShiftRecord> {
    let days = range.days();
    let mut load = LoadTable::seed(employees, prior);
    let active: Vec<&Mission> = missions.iter().filter(|m| m.enabled).collect();

    let mut out = Vec::new();

    for day in days {
        // une seule affectation par personne et par jour, toutes missions confondues
        let mut busy: HashSet<&EmployeeId> = HashSet::new();

        for mission in active.iter().copied() {
            for requirement in &mission.requirements {
                for _ in 0..requirement.slots() {
                    let candidates: Vec<&Employee> = employees
                        .iter()
                        .filter(|e| is_candidate(e, &requirement.role, day, &busy))
                        .collect();

                    let chosen = least_loaded(&candidates, &load, tie_break);

                    let employee_id = chosen.map(|e| {
                        busy.insert(&e.id);
                        load.bump(&e.id);
                        e.id.clone()
                    });

                    out.push(ShiftRecord::for_slot(
                        mission,
                        day,
                        &requirement.role,
                        employee_id,
                    ));
                }
            }
        }
    }

    out
}

fn is_candidate(
    employee: &Employee,
    role: &Role,
    day: NaiveDate,
    busy: &HashSet<&EmployeeId>,
) -> bool {
    employee.has_role(role) && employee.is_available_on(day) && !busy.contains(&employee.id)
}

fn least_loaded<'a, T: TieBreak + ?Sized>(
    candidates: &[&'a Employee],
    load: &LoadTable<'_>,
    tie_break: &mut T,
) -> Option<&'a Employee> {
    let min = candidates.iter().map(|e| load.get(&e.id)).min()?;
    let tied: Vec<&'a Employee> = candidates
        .iter()
        .copied()
        .filter(|e| load.get(&e.id) == min)
        .collect();

    let idx = tie_break.pick(&tied) % tied.len();
    Some(tied[idx])
}
