#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn releve(workspace: &Path) -> Command {
    let mut cmd = Command::cargo_bin("releve-cli").unwrap();
    cmd.arg("--workspace").arg(workspace);
    cmd
}

#[test]
fn generate_check_export_clear_flow() {
    let dir = tempdir().unwrap();
    let ws = dir.path().join("planning.json");

    releve(&ws)
        .args(["add-employee", "--name", "Ana", "--roles", "Driver"])
        .assert()
        .success();
    releve(&ws)
        .args(["available", "--employee", "Ana", "--date", "2024-01-01"])
        .assert()
        .success();
    releve(&ws)
        .args(["add-mission", "--name", "Patrol", "--start", "08:00", "--end", "16:00"])
        .args(["--require", "Driver:1"])
        .assert()
        .success();

    // 1 créneau sur 2 vide : au-delà du seuil par défaut
    releve(&ws)
        .args(["generate", "--from", "2024-01-01", "--to", "2024-01-02", "--seed", "7"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("2 shift(s): 1 assigned, 1 unassigned"));

    releve(&ws)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Patrol 08:00-16:00 | Driver | Ana"))
        .stdout(predicate::str::contains("| Unassigned"));

    releve(&ws)
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("0 violation(s), 1 unfilled"));

    let grid = dir.path().join("grid.csv");
    releve(&ws)
        .args(["export", "--view", "employee", "--out"])
        .arg(&grid)
        .assert()
        .success();
    let raw = std::fs::read_to_string(&grid).unwrap();
    assert!(raw.contains("Ana,Driver,Patrol (Driver),"));

    releve(&ws).arg("clear").assert().success();
    releve(&ws)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn unknown_names_and_inverted_ranges_fail() {
    let dir = tempdir().unwrap();
    let ws = dir.path().join("planning.json");

    releve(&ws)
        .args(["available", "--employee", "Nobody", "--date", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown employee"));

    releve(&ws)
        .args(["generate", "--from", "2024-01-05", "--to", "2024-01-01"])
        .assert()
        .failure();
}

#[test]
fn duplicate_names_are_rejected() {
    let dir = tempdir().unwrap();
    let ws = dir.path().join("planning.json");

    releve(&ws).args(["add-employee", "--name", "Ana"]).assert().success();
    releve(&ws)
        .args(["add-employee", "--name", "Ana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("name already in use: Ana"));

    releve(&ws)
        .args(["add-mission", "--name", "Gate", "--start", "07:00", "--end", "15:00"])
        .assert()
        .success();
    releve(&ws)
        .args(["add-mission", "--name", "Gate", "--start", "09:00", "--end", "10:00"])
        .assert()
        .failure();

    let raw = std::fs::read_to_string(&ws).unwrap();
    assert_eq!(raw.matches("\"name\": \"Ana\"").count(), 1);
    assert_eq!(raw.matches("\"name\": \"Gate\"").count(), 1);
}

#[test]
fn edit_and_duplicate_flows() {
    let dir = tempdir().unwrap();
    let ws = dir.path().join("planning.json");

    releve(&ws)
        .args(["add-employee", "--name", "Ana", "--roles", "Driver"])
        .assert()
        .success();
    releve(&ws)
        .args(["edit-employee", "Ana", "--roles", "Medic,Driver,Medic"])
        .assert()
        .success();
    releve(&ws)
        .args(["available", "--employee", "Ana", "--date", "2024-01-01"])
        .assert()
        .success();

    releve(&ws)
        .args(["add-mission", "--name", "Patrol", "--start", "08:00", "--end", "16:00"])
        .args(["--require", "Driver:1"])
        .assert()
        .success();
    releve(&ws)
        .args(["edit-mission", "Patrol", "--rename", "Night", "--start", "20:00"])
        .args(["--end", "06:00", "--require", "Medic:1"])
        .assert()
        .success();
    releve(&ws)
        .args(["duplicate-mission", "Night"])
        .assert()
        .success();
    releve(&ws).args(["disable-mission", "Night (Copy)"]).assert().success();

    // un nom pris ou vide est refusé, la mission garde son nom
    releve(&ws)
        .args(["edit-mission", "Night", "--rename", "Night (Copy)"])
        .assert()
        .failure();
    releve(&ws)
        .args(["edit-mission", "Night", "--rename", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("name cannot be empty"));

    releve(&ws)
        .args(["generate", "--from", "2024-01-01", "--to", "2024-01-01", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 shift(s): 1 assigned, 0 unassigned"));
    releve(&ws)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Night 20:00-06:00 | Medic | Ana"));

    let grid = dir.path().join("grid.csv");
    releve(&ws)
        .args(["export", "--view", "employee", "--out"])
        .arg(&grid)
        .assert()
        .success();
    let raw = std::fs::read_to_string(&grid).unwrap();
    assert!(raw.contains("Ana,\"Medic, Driver\",Night (Medic)"));
}
