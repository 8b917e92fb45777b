#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime};
use releve::{
    audit, availability_on, coverage, employee_grid, io, mission_grid, Availability, DateRange,
    Employee, EmployeeId, Engine, FindingKind, FirstListed, Mission, MissionId, Role, ShiftRecord,
    Workspace,
};
use std::fs;
use tempfile::tempdir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

struct Fixture {
    missions: Vec<Mission>,
    employees: Vec<Employee>,
    schedule: Vec<ShiftRecord>,
    range: DateRange,
}

fn fixture() -> Fixture {
    let missions = vec![
        Mission::new("Night", hm(20, 0), hm(6, 0)).require("Medic", 1),
        Mission::new("Spare", hm(7, 0), hm(8, 0))
            .require("Driver", 1)
            .disabled(),
        Mission::new("Patrol", hm(8, 0), hm(16, 0)).require("Driver", 1),
    ];
    let employees = vec![
        Employee::new("Ana")
            .with_role("Driver")
            .with_role("Medic")
            .with_availability(Availability::all_day(day(1)))
            .with_availability(Availability::all_day(day(2))),
        Employee::new("Bo")
            .with_role("Driver")
            .with_availability(Availability::all_day(day(1))),
    ];
    let range = DateRange::new(day(1), day(2));
    let schedule = Engine::with_tie_break(FirstListed).generate(&missions, &employees, range, &[]);
    Fixture {
        missions,
        employees,
        schedule,
        range,
    }
}

#[test]
fn fixture_schedule_shape() {
    let f = fixture();
    // Night passe avant Patrol dans l'ordre fourni : Ana prend Medic, Bo Driver le 1er
    let who: Vec<Option<&str>> = f
        .schedule
        .iter()
        .map(|r| {
            r.employee_id
                .as_ref()
                .and_then(|id| f.employees.iter().find(|e| &e.id == id))
                .map(|e| e.name.as_str())
        })
        .collect();
    assert_eq!(who, vec![Some("Ana"), Some("Bo"), Some("Ana"), None]);
}

#[test]
fn employee_grid_lists_each_day_and_unassigned_row() {
    let f = fixture();
    let grid = employee_grid(&f.schedule, &f.employees, f.range);

    assert_eq!(grid.header, ["name", "roles", "2024-01-01", "2024-01-02"]);
    assert_eq!(grid.rows.len(), 3);
    assert_eq!(grid.rows[0], ["Ana", "Driver, Medic", "Night (Medic)", "Night (Medic)"]);
    assert_eq!(grid.rows[1], ["Bo", "Driver", "Patrol (Driver)", ""]);
    assert_eq!(grid.rows[2], ["Unassigned", "", "", "Patrol (Driver)"]);
}

#[test]
fn mission_grid_sorts_by_window_and_skips_disabled() {
    let f = fixture();
    let grid = mission_grid(&f.schedule, &f.missions, &f.employees, f.range);

    insta::assert_snapshot!(grid.to_text(), @r"
    mission | 2024-01-01 | 2024-01-02
    Patrol (08:00-16:00) | Bo (Driver) | Unassigned (Driver)
    Night (20:00-06:00) | Ana (Medic) | Ana (Medic)
    ");
}

#[test]
fn coverage_counts_fill_rate_and_load() {
    let f = fixture();
    let cov = coverage(&f.schedule);

    assert_eq!(cov.total, 4);
    assert_eq!(cov.assigned, 3);
    assert_eq!(cov.unassigned, 1);
    assert!((cov.unassigned_ratio() - 0.25).abs() < f64::EPSILON);
    assert_eq!(cov.per_day[&day(1)].assigned, 2);
    assert_eq!(cov.per_day[&day(2)].unassigned, 1);
    assert_eq!(cov.load[&f.employees[0].id], 2);
    assert_eq!(cov.load[&f.employees[1].id], 1);

    assert_eq!(coverage(&[]).unassigned_ratio(), 0.0);
}

#[test]
fn availability_aggregates_by_role() {
    let f = fixture();
    let first = availability_on(&f.employees, day(1));
    assert_eq!(first.count(), 2);
    assert_eq!(first.by_role[&Role::new("Driver")], 2);
    assert_eq!(first.by_role[&Role::new("Medic")], 1);

    let second = availability_on(&f.employees, day(2));
    assert_eq!(second.employees, vec![f.employees[0].id.clone()]);

    assert_eq!(availability_on(&f.employees, day(9)).count(), 0);
}

#[test]
fn audit_flags_only_unfilled_on_engine_output() {
    let f = fixture();
    let findings = audit(&f.schedule, &f.missions, &f.employees);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, FindingKind::Unfilled);
    assert!(!findings[0].kind.is_violation());
}

#[test]
fn audit_flags_hand_edits() {
    let f = fixture();
    let mut schedule = f.schedule.clone();
    let ana = f.employees[0].id.clone();
    let bo = f.employees[1].id.clone();

    // Bo le 2 : ni Medic ni disponible
    schedule[2].employee_id = Some(bo);
    // Ana deux fois le 1er
    schedule[1].employee_id = Some(ana);
    schedule[3].employee_id = Some(EmployeeId::new("ghost"));
    schedule[3].mission_id = MissionId::new("gone");

    let kinds: Vec<FindingKind> = audit(&schedule, &f.missions, &f.employees)
        .into_iter()
        .map(|finding| finding.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            FindingKind::DoubleBooking,
            FindingKind::MissingRole,
            FindingKind::NotAvailable,
            FindingKind::UnknownMission,
            FindingKind::UnknownEmployee,
        ]
    );
}

#[test]
fn csv_import_parses_roles_availability_and_requirements() {
    let dir = tempdir().unwrap();
    let people = dir.path().join("employees.csv");
    fs::write(
        &people,
        "name,roles,availability\n\
         Ana,Driver;Medic,2024-01-01;2024-01-02@09:00-12:00;2024-01-01@10:00-11:00\n\
         Bo,Driver\n",
    )
    .unwrap();
    let missions = dir.path().join("missions.csv");
    fs::write(
        &missions,
        "name,start,end,enabled,requirements\n\
         Patrol,08:00,16:00,,Driver:2;Medic:1\n\
         Spare,10:00,11:00,no,\n",
    )
    .unwrap();

    let employees = io::import_employees_csv(&people).unwrap();
    assert_eq!(employees.len(), 2);
    assert!(employees[0].has_role(&Role::new("Medic")));
    assert_eq!(employees[0].availability.len(), 2);
    assert_eq!(employees[0].availability_on(day(1)).unwrap().start, hm(10, 0));
    assert!(employees[1].availability.is_empty());

    let missions = io::import_missions_csv(&missions).unwrap();
    assert!(missions[0].enabled);
    assert_eq!(missions[0].requirements.len(), 2);
    assert_eq!(missions[0].requirements[0].count, 2);
    assert!(!missions[1].enabled);
    assert!(missions[1].requirements.is_empty());
}

#[test]
fn csv_import_rejects_bad_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");

    fs::write(&path, "name,start,end\nGate,25:00,10:00\n").unwrap();
    assert!(io::import_missions_csv(&path).is_err());

    fs::write(&path, "name,start,end,enabled,requirements\nGate,08:00,10:00,yes,Driver\n").unwrap();
    assert!(io::import_missions_csv(&path).is_err());

    fs::write(&path, "name,start,end,enabled\nGate,08:00,10:00,oui\n").unwrap();
    assert!(io::import_missions_csv(&path).is_err());

    fs::write(&path, "name,roles,availability\nAna,Driver,2024-13-01\n").unwrap();
    assert!(io::import_employees_csv(&path).is_err());
}

#[test]
fn grid_and_schedule_exports_write_csv() {
    let f = fixture();
    let dir = tempdir().unwrap();

    let grid_path = dir.path().join("grid.csv");
    io::export_grid_csv(&grid_path, &employee_grid(&f.schedule, &f.employees, f.range)).unwrap();
    let raw = fs::read_to_string(&grid_path).unwrap();
    assert_eq!(raw.lines().next(), Some("name,roles,2024-01-01,2024-01-02"));
    assert!(raw.contains("Ana,\"Driver, Medic\",Night (Medic),Night (Medic)"));

    let mut ws = Workspace::new();
    ws.missions = f.missions.clone();
    ws.employees = f.employees.clone();
    ws.replace_schedule(f.schedule.clone());
    let flat_path = dir.path().join("flat.csv");
    io::export_schedule_csv(&flat_path, &ws).unwrap();
    let raw = fs::read_to_string(&flat_path).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines[0], "id,date,mission,role,employee,start,end");
    assert_eq!(lines.len(), 5);
    assert!(lines[1].ends_with(",2024-01-01,Night,Medic,Ana,20:00,06:00"));
    assert!(lines[4].ends_with(",2024-01-02,Patrol,Driver,,08:00,16:00"));
}
