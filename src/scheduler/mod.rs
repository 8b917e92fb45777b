//! Moteur d'affectation : missions × employés × période → planning.
//!
//! Calcul pur, sans E/S ni journalisation ; les entrées ne sont jamais
//! modifiées. L'infaisabilité est représentée par des créneaux vides
//! (`employee_id == None`), jamais par une erreur.

mod assignment;
mod inspect;
mod load;
mod tiebreak;
mod types;
mod util;

pub use tiebreak::{FirstListed, RandomTieBreak, TieBreak};
pub use types::{DateRange, Finding, FindingKind};

use crate::model::{Employee, Mission, ShiftRecord};
use rand::rngs::ThreadRng;

/// Moteur d'affectation paramétré par sa stratégie de départage.
#[derive(Debug, Default)]
pub struct Engine<T = RandomTieBreak<ThreadRng>> {
    tie_break: T,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            tie_break: RandomTieBreak::thread(),
        }
    }
}

impl<T: TieBreak> Engine<T> {
    pub fn with_tie_break(tie_break: T) -> Self {
        Self { tie_break }
    }

    /// Produit un planning neuf pour `range`.
    ///
    /// `prior` ne sert qu'à amorcer les compteurs de charge, toutes dates
    /// confondues. Ordre de sortie : jour, mission, besoin, créneau.
    pub fn generate(
        &mut self,
        missions: &[Mission],
        employees: &[Employee],
        range: DateRange,
        prior: &[ShiftRecord],
    ) -> Vec<ShiftRecord> {
        generate_with(missions, employees, range, prior, &mut self.tie_break)
    }
}

/// Génération avec départage aléatoire (générateur du thread).
pub fn generate(
    missions: &[Mission],
    employees: &[Employee],
    range: DateRange,
    prior: &[ShiftRecord],
) -> Vec<ShiftRecord> {
    Engine::new().generate(missions, employees, range, prior)
}

pub fn generate_with<T: TieBreak + ?Sized>(
    missions: &[Mission],
    employees: &[Employee],
    range: DateRange,
    prior: &[ShiftRecord],
    tie_break: &mut T,
) -> Vec<ShiftRecord> {
    assignment::assign_greedy(missions, employees, range, prior, tie_break)
}

/// Contrôle d'un planning existant (édité à la main ou relu du disque).
pub fn audit(
    schedule: &[ShiftRecord],
    missions: &[Mission],
    employees: &[Employee],
) -> Vec<Finding> {
    inspect::audit(schedule, missions, employees)
}
