use crate::model::{Employee, EmployeeId, ShiftRecord};
use std::collections::HashMap;

/// Compteurs de charge par employé, locaux à une génération.
#[derive(Debug)]
pub(super) struct LoadTable<'a> {
    counts: HashMap<&'a EmployeeId, usize>,
}

impl<'a> LoadTable<'a> {
    /// Amorce avec tout l'historique `prior`, sans filtre de date.
    /// Les créneaux vides ou d'employés inconnus sont ignorés.
    pub(super) fn seed(employees: &'a [Employee], prior: &[ShiftRecord]) -> Self {
        let mut counts: HashMap<&'a EmployeeId, usize> =
            employees.iter().map(|e| (&e.id, 0)).collect();
        for id in prior.iter().filter_map(|r| r.employee_id.as_ref()) {
            if let Some(count) = counts.get_mut(id) {
                *count += 1;
            }
        }
        Self { counts }
    }

    pub(super) fn get(&self, id: &EmployeeId) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub(super) fn bump(&mut self, id: &EmployeeId) {
        if let Some(count) = self.counts.get_mut(id) {
            *count += 1;
        }
    }
}
