use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const NODES_CSV: &str = "osmid,x,y,score\n1,0.0,0.0,3.5\n2,10.0,0.0,\n3,10.0,10.0,8.0\n";
const EDGES_CSV: &str = "u,v,key,travel_time,flat,geometry\n\
1,2,0,12.0,1.0,\"LINESTRING (0 0, 5 1, 10 0)\"\n\
2,3,0,,1.0,\n\
3,1,0,30.5,1.0,\n";

fn cmd() -> Command {
    Command::cargo_bin("osmnx-mapping").unwrap()
}

fn write_tables() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().unwrap();
    let nodes = dir.path().join("nodes.csv");
    let edges = dir.path().join("edges.csv");
    fs::write(&nodes, NODES_CSV).unwrap();
    fs::write(&edges, EDGES_CSV).unwrap();
    (dir, nodes, edges)
}

fn render_cmd(nodes: &Path, edges: &Path, out: &Path) -> Command {
    let mut cmd = cmd();
    cmd.args([
        "render",
        "--nodes",
        nodes.to_str().unwrap(),
        "--edges",
        edges.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);
    cmd
}

#[test]
fn version_flag_prints_name_and_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "osmnx-mapping {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn short_version_flag() {
    cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains("osmnx-mapping"));
}

#[test]
fn debug_info_exits_before_printing_options() {
    cmd()
        .arg("--debug-info")
        .assert()
        .success()
        .stdout(predicate::str::contains("__System__"))
        .stdout(predicate::str::contains("osmnx-mapping-core"))
        .stdout(predicate::str::contains("Cli {").not());
}

#[test]
fn debug_info_ignores_later_arguments() {
    cmd()
        .args(["--debug-info", "--no-such-flag"])
        .assert()
        .success()
        .stdout(predicate::str::contains("__Components__"));
}

#[test]
fn help_lists_debug_info() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--debug-info"))
        .stdout(predicate::str::contains("Print debug information"));
}

#[test]
fn no_arguments_prints_parsed_options() {
    cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Cli {"))
        .stdout(predicate::str::contains("debug_info: false"))
        .stdout(predicate::str::contains("command: None"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    cmd()
        .arg("--no-such-flag")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--no-such-flag"));
}

#[test]
fn render_writes_svg() {
    let (dir, nodes, edges) = write_tables();
    let out = dir.path().join("map.svg");
    render_cmd(&nodes, &edges, &out)
        .args(["--column", "travel_time", "--colorbar-label", "Travel time"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Figure written to"));
    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Travel time"));
    assert!(svg.contains("30.5"));
}

#[test]
fn render_writes_png() {
    let (dir, nodes, edges) = write_tables();
    let out = dir.path().join("map.png");
    render_cmd(&nodes, &edges, &out)
        .args(["--column", "score", "--target", "nodes", "--scale", "0.5"])
        .assert()
        .success();
    let bytes = fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn both_target_needs_column_in_node_table() {
    let (dir, nodes, edges) = write_tables();
    let out = dir.path().join("both.svg");
    render_cmd(&nodes, &edges, &out)
        .args(["--column", "flat", "--target", "both"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("column 'flat' not found in nodes table"));
    assert!(!out.exists());
}

#[test]
fn render_both_targets_to_svg() {
    let dir = tempdir().unwrap();
    let nodes = dir.path().join("nodes.csv");
    let edges = dir.path().join("edges.csv");
    fs::write(&nodes, "osmid,x,y,score\n1,0,0,-2.0\n2,1,0,4.0\n").unwrap();
    fs::write(&edges, "u,v,score\n1,2,6.0\n2,1,1.0\n").unwrap();
    let out = dir.path().join("both.svg");
    render_cmd(&nodes, &edges, &out)
        .args(["--column", "score", "--target", "both", "--colormap", "viridis"])
        .assert()
        .success();
    let svg = fs::read_to_string(&out).unwrap();
    assert_eq!(svg.matches("<circle").count(), 2);
    assert_eq!(svg.matches("<polyline").count(), 2);
    assert!(svg.contains(">-2<"));
    assert!(svg.contains(">6<"));
}

#[test]
fn render_constant_column_succeeds() {
    let (dir, nodes, edges) = write_tables();
    let out = dir.path().join("flat.svg");
    render_cmd(&nodes, &edges, &out)
        .args(["--column", "flat"])
        .assert()
        .success();
    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(">0<"));
    assert!(svg.contains(">1<"));
}

#[test]
fn two_columns_are_rejected() {
    let (dir, nodes, edges) = write_tables();
    let out = dir.path().join("map.svg");
    render_cmd(&nodes, &edges, &out)
        .args(["--column", "travel_time", "--column", "flat"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("single result column"));
    assert!(!out.exists());
}

#[test]
fn invalid_target_names_valid_choices() {
    let (dir, nodes, edges) = write_tables();
    let out = dir.path().join("map.svg");
    render_cmd(&nodes, &edges, &out)
        .args(["--column", "score", "--target", "streets"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("'nodes', 'edges', or 'both'"));
}

#[test]
fn unknown_extension_is_rejected() {
    let (dir, nodes, edges) = write_tables();
    let out = dir.path().join("map.gif");
    render_cmd(&nodes, &edges, &out)
        .args(["--column", "travel_time"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gif"));
}

#[test]
fn config_file_sets_defaults() {
    let (dir, nodes, edges) = write_tables();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[render]\ncolorbar_label = \"From config\"\n").unwrap();
    let out = dir.path().join("map.svg");
    let mut cmd = cmd();
    cmd.args(["--config", config.to_str().unwrap()]);
    cmd.args([
        "render",
        "--nodes",
        nodes.to_str().unwrap(),
        "--edges",
        edges.to_str().unwrap(),
        "--column",
        "travel_time",
        "--out",
        out.to_str().unwrap(),
    ])
    .assert()
    .success();
    assert!(fs::read_to_string(&out).unwrap().contains("From config"));
}

#[test]
fn bad_config_key_fails() {
    let (dir, nodes, edges) = write_tables();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[render]\ncolour = \"red\"\n").unwrap();
    let out = dir.path().join("map.svg");
    let mut cmd = cmd();
    cmd.args(["--config", config.to_str().unwrap()]);
    cmd.args([
        "render",
        "--nodes",
        nodes.to_str().unwrap(),
        "--edges",
        edges.to_str().unwrap(),
        "--column",
        "travel_time",
        "--out",
        out.to_str().unwrap(),
    ])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("config"));
}
