use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new<S: AsRef<str>>(s: S) -> Self {
                Self(s.as_ref().to_owned())
            }
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifiant fort pour Employee
    EmployeeId
);
string_id!(
    /// Identifiant fort pour Mission
    MissionId
);
string_id!(
    /// Identifiant fort pour ShiftRecord
    ShiftId
);

/// Étiquette de rôle libre (ex. "Driver", "Medic").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Heures au format `HH:MM` (les secondes sont acceptées en lecture).
pub mod clock {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
    }
}

/// Disponibilité déclarée pour une journée. `00:00`–`00:00` = toute la journée.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub start: NaiveTime,
    #[serde(with = "clock")]
    pub end: NaiveTime,
}

impl Availability {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self { date, start, end }
    }

    pub fn all_day(date: NaiveDate) -> Self {
        Self {
            date,
            start: NaiveTime::default(),
            end: NaiveTime::default(),
        }
    }

    pub fn is_all_day(&self) -> bool {
        self.start == NaiveTime::default() && self.end == NaiveTime::default()
    }
}

/// Employé : rôles tenus et calendrier de disponibilités.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    /// Ordre de saisie conservé, sans doublon.
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub availability: Vec<Availability>,
}

impl Employee {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            id: EmployeeId::random(),
            name: name.into(),
            roles: Vec::new(),
            availability: Vec::new(),
        }
    }

    pub fn with_role<R: Into<Role>>(mut self, role: R) -> Self {
        self.add_role(role);
        self
    }

    /// Ajoute le rôle en fin de liste s'il n'est pas déjà tenu.
    pub fn add_role<R: Into<Role>>(&mut self, role: R) -> bool {
        let role = role.into();
        if self.roles.contains(&role) {
            return false;
        }
        self.roles.push(role);
        true
    }

    /// Remplace les rôles ; les doublons sont ignorés.
    pub fn set_roles<I, R>(&mut self, roles: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        self.roles.clear();
        for role in roles {
            self.add_role(role);
        }
    }

    pub fn with_availability(mut self, entry: Availability) -> Self {
        self.availability.push(entry);
        self
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// Test de présence sur la date ; la plage horaire n'est pas consultée.
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.availability.iter().any(|a| a.date == date)
    }

    pub fn availability_on(&self, date: NaiveDate) -> Option<&Availability> {
        self.availability.iter().find(|a| a.date == date)
    }
}

/// Besoin en effectif d'une mission pour un rôle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub role: Role,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: i64,
}

// Un compteur nul ou absent vaut 0 créneau.
fn lenient_count<'de, D: serde::Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(d)?.unwrap_or(0))
}

impl Requirement {
    pub fn new<R: Into<Role>>(role: R, count: i64) -> Self {
        Self {
            role: role.into(),
            count,
        }
    }

    /// Nombre de créneaux générés par jour (0 si `count <= 0`).
    pub fn slots(&self) -> usize {
        usize::try_from(self.count).unwrap_or(0)
    }
}

fn enabled_by_default() -> bool {
    true
}

/// Mission récurrente quotidienne.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub name: String,
    #[serde(with = "clock")]
    pub start: NaiveTime,
    #[serde(with = "clock")]
    pub end: NaiveTime,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

impl Mission {
    pub fn new<N: Into<String>>(name: N, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            id: MissionId::random(),
            name: name.into(),
            start,
            end,
            enabled: true,
            requirements: Vec::new(),
        }
    }

    pub fn require<R: Into<Role>>(mut self, role: R, count: i64) -> Self {
        self.requirements.push(Requirement::new(role, count));
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Libellé `HH:MM-HH:MM`.
    pub fn window_label(&self) -> String {
        format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Affectation concrète (éventuellement vide) d'un créneau de mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    pub id: ShiftId,
    pub date: NaiveDate,
    pub mission_id: MissionId,
    pub employee_id: Option<EmployeeId>,
    pub role: Role,
    pub mission_name: String,
    #[serde(with = "clock")]
    pub start: NaiveTime,
    #[serde(with = "clock")]
    pub end: NaiveTime,
}

impl ShiftRecord {
    pub(crate) fn for_slot(
        mission: &Mission,
        date: NaiveDate,
        role: &Role,
        employee_id: Option<EmployeeId>,
    ) -> Self {
        Self {
            id: ShiftId::random(),
            date,
            mission_id: mission.id.clone(),
            employee_id,
            role: role.clone(),
            mission_name: mission.name.clone(),
            start: mission.start,
            end: mission.end,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.employee_id.is_some()
    }

    /// Libellé `Mission (Role)` utilisé par les vues tabulaires.
    pub fn label(&self) -> String {
        format!("{} ({})", self.mission_name, self.role)
    }
}

pub const DEFAULT_ROLES: [&str; 4] = ["Manager", "Driver", "Medic", "Regular"];

/// Espace de travail complet : catalogues + planning actif.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub missions: Vec<Mission>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default = "default_roles")]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub schedule: Vec<ShiftRecord>,
}

fn default_roles() -> Vec<Role> {
    DEFAULT_ROLES.iter().copied().map(Role::new).collect()
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            missions: Vec::new(),
            employees: Vec::new(),
            roles: default_roles(),
            schedule: Vec::new(),
        }
    }
}

impl Workspace {
    pub fn find_mission<'a>(&'a self, id: &MissionId) -> Option<&'a Mission> {
        self.missions.iter().find(|m| &m.id == id)
    }
    pub fn find_mission_by_name<'a>(&'a self, name: &str) -> Option<&'a Mission> {
        self.missions.iter().find(|m| m.name.trim() == name.trim())
    }
    pub fn find_mission_mut(&mut self, id: &MissionId) -> Option<&mut Mission> {
        self.missions.iter_mut().find(|m| &m.id == id)
    }
    pub fn find_employee<'a>(&'a self, id: &EmployeeId) -> Option<&'a Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }
    pub fn find_employee_by_name<'a>(&'a self, name: &str) -> Option<&'a Employee> {
        self.employees.iter().find(|e| e.name.trim() == name.trim())
    }
    pub fn find_employee_mut(&mut self, id: &EmployeeId) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| &e.id == id)
    }
}
