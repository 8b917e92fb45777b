use super::util;
use crate::model::{EmployeeId, ShiftId};
use chrono::NaiveDate;

/// Période de génération, bornes incluses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    /// Jours de la période dans l'ordre ; vide si `end < start`.
    pub fn days(&self) -> Vec<NaiveDate> {
        util::days_between(self.start, self.end)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    DoubleBooking,    // deux créneaux le même jour pour la même personne
    MissingRole,      // la personne ne tient pas le rôle du créneau
    NotAvailable,     // aucune disponibilité déclarée ce jour-là
    UnknownEmployee,  // employé absent du catalogue
    UnknownMission,   // mission absente du catalogue
    Unfilled,         // créneau non pourvu
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::DoubleBooking => "double",
            FindingKind::MissingRole => "role",
            FindingKind::NotAvailable => "availability",
            FindingKind::UnknownEmployee => "unknown-employee",
            FindingKind::UnknownMission => "unknown-mission",
            FindingKind::Unfilled => "unfilled",
        }
    }

    /// Tout sauf `Unfilled` : le moteur ne produit jamais ces cas.
    pub fn is_violation(&self) -> bool {
        !matches!(self, FindingKind::Unfilled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: FindingKind,
    pub date: NaiveDate,
    pub shift: ShiftId,
    pub other: Option<ShiftId>,
    pub employee: Option<EmployeeId>,
}
