#![forbid(unsafe_code)]
//! Relève — répartition d'employés sur des missions récurrentes (sans BD).
//!
//! - Missions quotidiennes avec besoins par rôle, employés avec rôles et
//!   disponibilités datées.
//! - Moteur glouton : charge croissante, une affectation par jour et par
//!   personne, créneaux non pourvus conservés.
//! - Stockage fichier (JSON), import/export CSV, vues tabulaires.

pub mod catalog;
pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use catalog::CatalogError;
pub use model::{
    Availability, Employee, EmployeeId, Mission, MissionId, Requirement, Role, ShiftId,
    ShiftRecord, Workspace,
};
pub use report::{
    availability_calendar, availability_on, coverage, employee_grid, mission_grid, Coverage,
    DayAvailability, DayCoverage, Grid,
};
pub use scheduler::{
    audit, generate, generate_with, DateRange, Engine, Finding, FindingKind, FirstListed,
    RandomTieBreak, TieBreak,
};
pub use storage::{JsonStorage, Storage};
