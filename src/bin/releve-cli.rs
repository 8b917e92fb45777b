#![forbid(unsafe_code)]
use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use releve::{
    io,
    model::{Availability, Employee, EmployeeId, Mission, MissionId, Role, Workspace},
    report,
    scheduler::{self, DateRange, FindingKind, RandomTieBreak},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition d'employés sur des missions (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de l'espace de travail
    #[arg(long, global = true, default_value = "planning.json")]
    workspace: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum View {
    /// Une ligne par créneau
    Flat,
    /// Une ligne par employé, une colonne par jour
    Employee,
    /// Une ligne par mission, une colonne par jour
    Mission,
    /// Espace de travail complet (JSON)
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Déclarer un rôle
    AddRole { name: String },

    /// Retirer un rôle du référentiel
    RemoveRole { name: String },

    /// Créer une mission quotidienne
    AddMission {
        #[arg(long)]
        name: String,
        /// HH:MM
        #[arg(long)]
        start: String,
        /// HH:MM
        #[arg(long)]
        end: String,
        /// besoin "Role:count", répétable
        #[arg(long = "require")]
        requirements: Vec<String>,
        #[arg(long)]
        disabled: bool,
    },

    /// Modifier une mission (seuls les champs fournis changent)
    EditMission {
        name: String,
        #[arg(long)]
        rename: Option<String>,
        /// HH:MM
        #[arg(long)]
        start: Option<String>,
        /// HH:MM
        #[arg(long)]
        end: Option<String>,
        /// remplace tous les besoins, "Role:count", répétable
        #[arg(long = "require")]
        requirements: Vec<String>,
    },

    /// Copier une mission sous le nom "<nom> (Copy)"
    DuplicateMission { name: String },

    /// Réactiver une mission
    EnableMission { name: String },

    /// Désactiver une mission (plus aucun créneau généré)
    DisableMission { name: String },

    /// Supprimer une mission
    RemoveMission { name: String },

    /// Créer un employé
    AddEmployee {
        #[arg(long)]
        name: String,
        /// liste "Role1,Role2,..."
        #[arg(long)]
        roles: Option<String>,
    },

    /// Modifier un employé (seuls les champs fournis changent)
    EditEmployee {
        name: String,
        #[arg(long)]
        rename: Option<String>,
        /// remplace les rôles, liste "Role1,Role2,..."
        #[arg(long)]
        roles: Option<String>,
    },

    /// Supprimer un employé
    RemoveEmployee { name: String },

    /// Déclarer une disponibilité (journée entière par défaut)
    Available {
        #[arg(long)]
        employee: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long, requires = "end")]
        start: Option<String>,
        #[arg(long, requires = "start")]
        end: Option<String>,
    },

    /// Retirer une disponibilité
    Unavailable {
        #[arg(long)]
        employee: String,
        #[arg(long)]
        date: String,
    },

    /// Importer des employés depuis un CSV
    ImportEmployees {
        #[arg(long)]
        csv: String,
    },

    /// Importer des missions depuis un CSV
    ImportMissions {
        #[arg(long)]
        csv: String,
    },

    /// Générer le planning sur une période (remplace le planning actif)
    Generate {
        /// YYYY-MM-DD
        #[arg(long)]
        from: String,
        /// YYYY-MM-DD
        #[arg(long)]
        to: String,
        /// Graine du départage (tirage reproductible)
        #[arg(long)]
        seed: Option<u64>,
        /// Part de créneaux vides au-delà de laquelle on sort en code 2
        #[arg(long, default_value_t = 0.25)]
        warn_ratio: f64,
    },

    /// Lister le planning actif
    List,

    /// Disponibilités agrégées par jour et par rôle
    Calendar {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },

    /// Exporter le planning
    Export {
        #[arg(long, value_enum, default_value_t = View::Flat)]
        view: View,
        #[arg(long)]
        out: String,
        /// Début des colonnes (défaut : premier jour du planning)
        #[arg(long)]
        from: Option<String>,
        /// Fin des colonnes (défaut : dernier jour du planning)
        #[arg(long)]
        to: Option<String>,
    },

    /// Vider le planning actif
    Clear,

    /// Vérifier le planning actif
    Check {
        /// Export CSV des anomalies (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.workspace)?;
    let mut ws = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::AddRole { name } => {
            ws.add_role(name.trim())?;
            storage.save(&ws)?;
            0
        }
        Commands::RemoveRole { name } => {
            if !ws.remove_role(&Role::new(name.trim())) {
                bail!("unknown role: {name}");
            }
            storage.save(&ws)?;
            0
        }
        Commands::AddMission {
            name,
            start,
            end,
            requirements,
            disabled,
        } => {
            let mut mission = Mission::new(name, io::parse_time(&start)?, io::parse_time(&end)?);
            for raw in &requirements {
                let req = io::parse_requirement(raw)?;
                ws.add_role(req.role.clone())?;
                mission.requirements.push(req);
            }
            mission.enabled = !disabled;
            let id = ws.add_mission(mission)?;
            storage.save(&ws)?;
            println!("{id}");
            0
        }
        Commands::EditMission {
            name,
            rename,
            start,
            end,
            requirements,
        } => {
            let id = mission_id(&ws, &name)?;
            let start = start.as_deref().map(io::parse_time).transpose()?;
            let end = end.as_deref().map(io::parse_time).transpose()?;
            let requirements = requirements
                .iter()
                .map(|raw| io::parse_requirement(raw))
                .collect::<Result<Vec<_>>>()?;
            for req in &requirements {
                ws.add_role(req.role.clone())?;
            }
            ws.update_mission(&id, |m| {
                if let Some(new_name) = rename {
                    m.name = new_name;
                }
                if let Some(t) = start {
                    m.start = t;
                }
                if let Some(t) = end {
                    m.end = t;
                }
                if !requirements.is_empty() {
                    m.requirements = requirements;
                }
            })?;
            storage.save(&ws)?;
            0
        }
        Commands::DuplicateMission { name } => {
            let id = mission_id(&ws, &name)?;
            let copy = ws.duplicate_mission(&id)?;
            storage.save(&ws)?;
            println!("{copy}");
            0
        }
        Commands::EnableMission { name } => {
            let id = mission_id(&ws, &name)?;
            ws.set_mission_enabled(&id, true)?;
            storage.save(&ws)?;
            0
        }
        Commands::DisableMission { name } => {
            let id = mission_id(&ws, &name)?;
            ws.set_mission_enabled(&id, false)?;
            storage.save(&ws)?;
            0
        }
        Commands::RemoveMission { name } => {
            let id = mission_id(&ws, &name)?;
            ws.remove_mission(&id)?;
            storage.save(&ws)?;
            0
        }
        Commands::AddEmployee { name, roles } => {
            let mut employee = Employee::new(name);
            if let Some(list) = roles {
                let list = role_list(&list);
                for role in &list {
                    ws.add_role(role.clone())?;
                }
                employee.set_roles(list);
            }
            let id = ws.add_employee(employee)?;
            storage.save(&ws)?;
            println!("{id}");
            0
        }
        Commands::EditEmployee {
            name,
            rename,
            roles,
        } => {
            let id = employee_id(&ws, &name)?;
            let roles = roles.as_deref().map(role_list);
            for role in roles.iter().flatten() {
                ws.add_role(role.clone())?;
            }
            ws.update_employee(&id, |e| {
                if let Some(new_name) = rename {
                    e.name = new_name;
                }
                if let Some(list) = roles {
                    e.set_roles(list);
                }
            })?;
            storage.save(&ws)?;
            0
        }
        Commands::RemoveEmployee { name } => {
            let id = employee_id(&ws, &name)?;
            ws.remove_employee(&id)?;
            storage.save(&ws)?;
            0
        }
        Commands::Available {
            employee,
            date,
            start,
            end,
        } => {
            let id = employee_id(&ws, &employee)?;
            let date = io::parse_date(&date)?;
            let entry = match (start, end) {
                (Some(s), Some(e)) => {
                    Availability::new(date, io::parse_time(&s)?, io::parse_time(&e)?)
                }
                _ => Availability::all_day(date),
            };
            ws.set_availability(&id, entry)?;
            storage.save(&ws)?;
            0
        }
        Commands::Unavailable { employee, date } => {
            let id = employee_id(&ws, &employee)?;
            let date = io::parse_date(&date)?;
            if !ws.remove_availability(&id, date)? {
                eprintln!("no availability for {employee} on {date}");
            }
            storage.save(&ws)?;
            0
        }
        Commands::ImportEmployees { csv } => {
            let employees = io::import_employees_csv(csv)?;
            for employee in employees {
                for role in &employee.roles {
                    ws.add_role(role.clone())?;
                }
                ws.add_employee(employee)?;
            }
            storage.save(&ws)?;
            0
        }
        Commands::ImportMissions { csv } => {
            let missions = io::import_missions_csv(csv)?;
            for mission in missions {
                for req in &mission.requirements {
                    ws.add_role(req.role.clone())?;
                }
                ws.add_mission(mission)?;
            }
            storage.save(&ws)?;
            0
        }
        Commands::Generate {
            from,
            to,
            seed,
            warn_ratio,
        } => {
            let range = DateRange::new(io::parse_date(&from)?, io::parse_date(&to)?);
            if range.end < range.start {
                bail!("--to must not be before --from");
            }
            match seed {
                Some(seed) => ws.regenerate(range, &mut RandomTieBreak::seeded(seed)),
                None => ws.regenerate(range, &mut RandomTieBreak::thread()),
            };
            storage.save(&ws)?;

            let cov = report::coverage(&ws.schedule);
            println!(
                "{} shift(s): {} assigned, {} unassigned",
                cov.total, cov.assigned, cov.unassigned
            );
            // Code 2 = WARNING/INCOMPLETE
            if cov.unassigned > 0 && cov.unassigned_ratio() > warn_ratio {
                eprintln!(
                    "Warning: {:.0}% of shifts are unassigned",
                    cov.unassigned_ratio() * 100.0
                );
                2
            } else {
                0
            }
        }
        Commands::List => {
            for s in &ws.schedule {
                println!(
                    "{} | {} | {} {}-{} | {} | {}",
                    s.id,
                    s.date,
                    s.mission_name,
                    s.start.format("%H:%M"),
                    s.end.format("%H:%M"),
                    s.role,
                    io::describe_assignee(&ws, s.employee_id.as_ref())
                );
            }
            0
        }
        Commands::Calendar { from, to } => {
            let range = DateRange::new(io::parse_date(&from)?, io::parse_date(&to)?);
            for day in report::availability_calendar(&ws.employees, range) {
                let roles: Vec<String> = day
                    .by_role
                    .iter()
                    .map(|(role, n)| format!("{n} {role}"))
                    .collect();
                println!("{} | {} available | {}", day.date, day.count(), roles.join(", "));
            }
            0
        }
        Commands::Export { view, out, from, to } => {
            match view {
                View::Flat => io::export_schedule_csv(&out, &ws)?,
                View::Json => io::export_workspace_json(&out, &ws)?,
                View::Employee => {
                    let range = export_range(&ws, from.as_deref(), to.as_deref())?;
                    let grid = report::employee_grid(&ws.schedule, &ws.employees, range);
                    io::export_grid_csv(&out, &grid)?
                }
                View::Mission => {
                    let range = export_range(&ws, from.as_deref(), to.as_deref())?;
                    let grid =
                        report::mission_grid(&ws.schedule, &ws.missions, &ws.employees, range);
                    io::export_grid_csv(&out, &grid)?
                }
            }
            0
        }
        Commands::Clear => {
            ws.clear_schedule();
            storage.save(&ws)?;
            0
        }
        Commands::Check { report } => {
            let findings = scheduler::audit(&ws.schedule, &ws.missions, &ws.employees);
            let violations = findings.iter().filter(|f| f.kind.is_violation()).count();
            let unfilled = findings
                .iter()
                .filter(|f| f.kind == FindingKind::Unfilled)
                .count();
            if let Some(path) = report {
                let mut w = csv::Writer::from_path(path)?;
                w.write_record(["kind", "date", "shift", "other", "employee"])?;
                for f in &findings {
                    let date = f.date.to_string();
                    w.write_record([
                        f.kind.as_str(),
                        date.as_str(),
                        f.shift.as_str(),
                        f.other.as_ref().map(|s| s.as_str()).unwrap_or(""),
                        f.employee.as_ref().map(EmployeeId::as_str).unwrap_or(""),
                    ])?;
                }
                w.flush()?;
            }
            if findings.is_empty() {
                println!("OK: every shift is filled");
                0
            } else {
                eprintln!("Found {violations} violation(s), {unfilled} unfilled shift(s)");
                2
            }
        }
    };

    std::process::exit(code);
}

fn mission_id(ws: &Workspace, name: &str) -> Result<MissionId> {
    ws.find_mission_by_name(name)
        .map(|m| m.id.clone())
        .ok_or_else(|| anyhow!("unknown mission: {name}"))
}

fn employee_id(ws: &Workspace, name: &str) -> Result<EmployeeId> {
    ws.find_employee_by_name(name)
        .map(|e| e.id.clone())
        .ok_or_else(|| anyhow!("unknown employee: {name}"))
}

fn role_list(raw: &str) -> Vec<Role> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Role::new)
        .collect()
}

fn export_range(ws: &Workspace, from: Option<&str>, to: Option<&str>) -> Result<DateRange> {
    let first = ws.schedule.iter().map(|s| s.date).min();
    let last = ws.schedule.iter().map(|s| s.date).max();
    let start = match from {
        Some(raw) => io::parse_date(raw)?,
        None => first.ok_or_else(|| anyhow!("empty schedule: pass --from"))?,
    };
    let end = match to {
        Some(raw) => io::parse_date(raw)?,
        None => last.ok_or_else(|| anyhow!("empty schedule: pass --to"))?,
    };
    Ok(DateRange::new(start, end))
}
