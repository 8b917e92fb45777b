use crate::model::{clock, Availability, Employee, EmployeeId, Mission, Requirement, Workspace};
use crate::report::{Grid, UNASSIGNED_LABEL};
use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import d'employés depuis CSV: header `name,roles[,availability]`
///
/// `roles` : étiquettes séparées par `;`.
/// `availability` : entrées séparées par `;`, chacune `YYYY-MM-DD` (journée
/// entière) ou `YYYY-MM-DD@HH:MM-HH:MM`.
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid employee row (empty name)");
        }
        let mut employee = Employee::new(name);
        if let Some(roles) = rec.get(1) {
            employee.set_roles(split_list(roles));
        }
        if let Some(raw) = rec.get(2) {
            employee.availability = parse_availability(raw)
                .with_context(|| format!("invalid availability for {name}"))?;
        }
        #[cfg(feature = "logging")]
        tracing::debug!(name, roles = employee.roles.len(), "employee imported");
        out.push(employee);
    }
    Ok(out)
}

/// Import de missions: header `name,start,end[,enabled][,requirements]`
///
/// `requirements` : `Role:count` séparés par `;`.
pub fn import_missions_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Mission>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid mission row (empty name)");
        }
        let start = parse_time(rec.get(1).context("missing start")?)
            .with_context(|| format!("invalid start for mission {name}"))?;
        let end = parse_time(rec.get(2).context("missing end")?)
            .with_context(|| format!("invalid end for mission {name}"))?;
        let mut mission = Mission::new(name, start, end);
        if let Some(flag) = rec.get(3) {
            let flag = flag.trim();
            if !flag.is_empty() {
                mission.enabled = parse_bool(flag)
                    .with_context(|| format!("invalid enabled value for mission {name}"))?;
            }
        }
        if let Some(raw) = rec.get(4) {
            mission.requirements = split_list(raw)
                .map(parse_requirement)
                .collect::<anyhow::Result<_>>()
                .with_context(|| format!("invalid requirements for mission {name}"))?;
        }
        out.push(mission);
    }
    Ok(out)
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(';').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

pub fn parse_time(raw: &str) -> anyhow::Result<NaiveTime> {
    clock::parse(raw).with_context(|| format!("invalid time: {}", raw.trim()))
}

pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date: {}", raw.trim()))
}

pub fn parse_requirement(chunk: &str) -> anyhow::Result<Requirement> {
    let (role, count) = chunk
        .rsplit_once(':')
        .with_context(|| format!("expected Role:count, got {chunk}"))?;
    let role = role.trim();
    if role.is_empty() {
        bail!("empty role in {chunk}");
    }
    let count: i64 = count
        .trim()
        .parse()
        .with_context(|| format!("invalid count in {chunk}"))?;
    Ok(Requirement::new(role, count))
}

fn parse_availability(raw: &str) -> anyhow::Result<Vec<Availability>> {
    let mut out: Vec<Availability> = Vec::new();
    for chunk in split_list(raw) {
        let entry = parse_availability_chunk(chunk)?;
        // une seule entrée par date, la dernière l'emporte
        out.retain(|a| a.date != entry.date);
        out.push(entry);
    }
    Ok(out)
}

fn parse_availability_chunk(chunk: &str) -> anyhow::Result<Availability> {
    match chunk.split_once('@') {
        None => Ok(Availability::all_day(parse_date(chunk)?)),
        Some((date, window)) => {
            let date = parse_date(date)?;
            let (start, end) = window
                .split_once('-')
                .with_context(|| format!("expected HH:MM-HH:MM, got {window}"))?;
            Ok(Availability::new(date, parse_time(start)?, parse_time(end)?))
        }
    }
}

/// Export JSON de l'espace de travail (jolie mise en forme)
pub fn export_workspace_json<P: AsRef<Path>>(path: P, workspace: &Workspace) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(workspace)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du planning: header `id,date,mission,role,employee,start,end`
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, workspace: &Workspace) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "date", "mission", "role", "employee", "start", "end"])?;
    for s in &workspace.schedule {
        let employee = s
            .employee_id
            .as_ref()
            .and_then(|id| workspace.find_employee(id))
            .map(|e| e.name.as_str())
            .unwrap_or("");
        let date = s.date.format("%Y-%m-%d").to_string();
        let start = s.start.format("%H:%M").to_string();
        let end = s.end.format("%H:%M").to_string();
        w.write_record([
            s.id.as_str(),
            date.as_str(),
            s.mission_name.as_str(),
            s.role.as_str(),
            employee,
            start.as_str(),
            end.as_str(),
        ])?;
    }
    w.flush()?;
    #[cfg(feature = "logging")]
    tracing::debug!(records = workspace.schedule.len(), "schedule exported");
    Ok(())
}

/// Export CSV d'une vue tabulaire (par employé ou par mission).
pub fn export_grid_csv<P: AsRef<Path>>(path: P, grid: &Grid) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(&grid.header)?;
    for row in &grid.rows {
        w.write_record(row)?;
    }
    w.flush()?;
    Ok(())
}

/// Libellé d'affichage d'un créneau pour la sortie console.
pub fn describe_assignee(workspace: &Workspace, id: Option<&EmployeeId>) -> String {
    id.and_then(|id| workspace.find_employee(id))
        .map(|e| e.name.clone())
        .unwrap_or_else(|| UNASSIGNED_LABEL.to_string())
}
