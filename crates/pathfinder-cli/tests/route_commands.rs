use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/campus_map.json")
        .canonicalize()
        .expect("fixture map present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("pathfinder");
    cmd.env("RUST_LOG", "error").env_remove("PATHFINDER_MAP");
    cmd
}

fn prepare_command() -> Command {
    let mut cmd = cli();
    cmd.arg("--map").arg(fixture_path());
    cmd
}

#[test]
fn route_prints_each_stop() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "Quad", "--to", "Stadium"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Route: Quad -> Stadium (3 hops, distance: 7.50)",
        ))
        .stdout(predicate::str::contains("  1: Library (+1.50, total 1.50)"))
        .stdout(predicate::str::contains("  3: Stadium (+4.00, total 7.50)"));
}

#[test]
fn compact_format_renders_arrow_path() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "compact", "route", "--from", "Stadium", "--to", "Tresidder"]);

    cmd.assert()
        .success()
        .stdout("Stadium->Gates->Tresidder (5.25)\n");
}

#[test]
fn json_format_is_machine_readable() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "json", "route", "--from", "Quad", "--to", "Gates"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["route"], "Quad->Library->Gates");
    assert_eq!(value["distance"], 3.5);
    assert_eq!(value["hops"], 2);
    assert_eq!(value["steps"][1]["position"]["x"], 200.0);
}

#[test]
fn map_can_come_from_environment() {
    let mut cmd = cli();
    cmd.env("PATHFINDER_MAP", fixture_path())
        .args(["--format", "compact", "route", "--from", "Quad", "--to", "Quad"]);

    cmd.assert().success().stdout("Quad (0.00)\n");
}

#[test]
fn unknown_node_error_suggests_names() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "Quadd", "--to", "Gates"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown node name: Quadd"))
        .stderr(predicate::str::contains("Did you mean 'Quad'?"));
}

#[test]
fn disconnected_nodes_report_no_path() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "Quad", "--to", "Lake"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No path found between Quad and Lake."));
}

#[test]
fn missing_map_is_reported() {
    let mut cmd = cli();
    cmd.args(["route", "--from", "A", "--to", "B"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no map given"));
}

#[test]
fn malformed_map_names_the_problem() {
    let temp = tempdir().expect("create temp dir");
    let map_path = temp.path().join("broken.json");
    fs::write(
        &map_path,
        r#"{"nodes": [{"name": "A", "x": 0, "y": 0}],
            "arcs": [{"start": "A", "finish": "Nowhere", "distance": 1}]}"#,
    )
    .expect("write map");

    let mut cmd = cli();
    cmd.arg("--map")
        .arg(&map_path)
        .args(["route", "--from", "A", "--to", "A"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to build graph"))
        .stderr(predicate::str::contains("arc A - Nowhere"));
}
