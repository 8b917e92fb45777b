use crate::model::{Availability, Employee, EmployeeId, Mission, MissionId, Role, ShiftRecord, Workspace};
use crate::scheduler::{self, DateRange, TieBreak};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("role label cannot be empty")]
    EmptyRole,
    #[error("unknown mission: {0}")]
    UnknownMission(String),
    #[error("unknown employee: {0}")]
    UnknownEmployee(String),
    #[error("duplicate id: {0}")]
    DuplicateId(String),
    #[error("name already in use: {0}")]
    DuplicateName(String),
}

// Les recherches par nom (CLI) exigent des noms uniques.
fn same_name(a: &str, b: &str) -> bool {
    a.trim() == b.trim()
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute un rôle au référentiel (sans effet s'il existe déjà).
    pub fn add_role<R: Into<Role>>(&mut self, role: R) -> Result<(), CatalogError> {
        let role = role.into();
        if role.as_str().trim().is_empty() {
            return Err(CatalogError::EmptyRole);
        }
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        Ok(())
    }

    /// Retire l'étiquette du référentiel uniquement ; employés et missions
    /// qui la portent restent inchangés.
    pub fn remove_role(&mut self, role: &Role) -> bool {
        let before = self.roles.len();
        self.roles.retain(|r| r != role);
        self.roles.len() != before
    }

    pub fn add_mission(&mut self, mission: Mission) -> Result<MissionId, CatalogError> {
        if mission.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.find_mission(&mission.id).is_some() {
            return Err(CatalogError::DuplicateId(mission.id.to_string()));
        }
        if self.missions.iter().any(|m| same_name(&m.name, &mission.name)) {
            return Err(CatalogError::DuplicateName(mission.name));
        }
        let id = mission.id.clone();
        self.missions.push(mission);
        Ok(id)
    }

    /// Applique `f` sur une copie ; la mission stockée n'est remplacée que
    /// si le résultat reste valide.
    pub fn update_mission<F>(&mut self, id: &MissionId, f: F) -> Result<(), CatalogError>
    where
        F: FnOnce(&mut Mission),
    {
        let pos = self
            .missions
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| CatalogError::UnknownMission(id.to_string()))?;
        let mut draft = self.missions[pos].clone();
        f(&mut draft);
        draft.id = id.clone();
        if draft.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self
            .missions
            .iter()
            .any(|m| &m.id != id && same_name(&m.name, &draft.name))
        {
            return Err(CatalogError::DuplicateName(draft.name));
        }
        self.missions[pos] = draft;
        Ok(())
    }

    /// Copie d'une mission sous un nouvel id, nommée `<nom> (Copy)`
    /// (`(Copy 2)`, `(Copy 3)`… si déjà pris).
    pub fn duplicate_mission(&mut self, id: &MissionId) -> Result<MissionId, CatalogError> {
        let source = self
            .find_mission(id)
            .ok_or_else(|| CatalogError::UnknownMission(id.to_string()))?;
        let base = source.name.trim().to_string();
        let mut copy = source.clone();
        copy.id = MissionId::random();
        copy.name = format!("{base} (Copy)");
        let mut n = 2;
        while self.find_mission_by_name(&copy.name).is_some() {
            copy.name = format!("{base} (Copy {n})");
            n += 1;
        }
        self.add_mission(copy)
    }

    pub fn set_mission_enabled(&mut self, id: &MissionId, enabled: bool) -> Result<(), CatalogError> {
        self.update_mission(id, |m| m.enabled = enabled)
    }

    pub fn remove_mission(&mut self, id: &MissionId) -> Result<Mission, CatalogError> {
        let pos = self
            .missions
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| CatalogError::UnknownMission(id.to_string()))?;
        Ok(self.missions.remove(pos))
    }

    pub fn add_employee(&mut self, employee: Employee) -> Result<EmployeeId, CatalogError> {
        if employee.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.find_employee(&employee.id).is_some() {
            return Err(CatalogError::DuplicateId(employee.id.to_string()));
        }
        if self.employees.iter().any(|e| same_name(&e.name, &employee.name)) {
            return Err(CatalogError::DuplicateName(employee.name));
        }
        let id = employee.id.clone();
        self.employees.push(employee);
        Ok(id)
    }

    /// Même contrat que [`Workspace::update_mission`].
    pub fn update_employee<F>(&mut self, id: &EmployeeId, f: F) -> Result<(), CatalogError>
    where
        F: FnOnce(&mut Employee),
    {
        let pos = self
            .employees
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| CatalogError::UnknownEmployee(id.to_string()))?;
        let mut draft = self.employees[pos].clone();
        f(&mut draft);
        draft.id = id.clone();
        if draft.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self
            .employees
            .iter()
            .any(|e| &e.id != id && same_name(&e.name, &draft.name))
        {
            return Err(CatalogError::DuplicateName(draft.name));
        }
        self.employees[pos] = draft;
        Ok(())
    }

    pub fn remove_employee(&mut self, id: &EmployeeId) -> Result<Employee, CatalogError> {
        let pos = self
            .employees
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| CatalogError::UnknownEmployee(id.to_string()))?;
        Ok(self.employees.remove(pos))
    }

    /// Au plus une entrée par date : remplace l'existante le cas échéant.
    pub fn set_availability(
        &mut self,
        id: &EmployeeId,
        entry: Availability,
    ) -> Result<(), CatalogError> {
        let employee = self
            .find_employee_mut(id)
            .ok_or_else(|| CatalogError::UnknownEmployee(id.to_string()))?;
        employee.availability.retain(|a| a.date != entry.date);
        employee.availability.push(entry);
        Ok(())
    }

    pub fn remove_availability(
        &mut self,
        id: &EmployeeId,
        date: NaiveDate,
    ) -> Result<bool, CatalogError> {
        let employee = self
            .find_employee_mut(id)
            .ok_or_else(|| CatalogError::UnknownEmployee(id.to_string()))?;
        let before = employee.availability.len();
        employee.availability.retain(|a| a.date != date);
        Ok(employee.availability.len() != before)
    }

    /// Régénère le planning sur `range` et remplace le planning actif.
    /// Le planning courant sert d'historique de charge.
    pub fn regenerate<T: TieBreak + ?Sized>(
        &mut self,
        range: DateRange,
        tie_break: &mut T,
    ) -> &[ShiftRecord] {
        let fresh = scheduler::generate_with(
            &self.missions,
            &self.employees,
            range,
            &self.schedule,
            tie_break,
        );
        #[cfg(feature = "logging")]
        tracing::info!(
            start = %range.start,
            end = %range.end,
            records = fresh.len(),
            unassigned = fresh.iter().filter(|r| !r.is_assigned()).count(),
            "schedule regenerated"
        );
        self.replace_schedule(fresh);
        &self.schedule
    }

    pub fn replace_schedule(&mut self, records: Vec<ShiftRecord>) {
        self.schedule = records;
    }

    pub fn clear_schedule(&mut self) {
        self.schedule.clear();
    }
}
