use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

const GRAPH: &str = r#"{
    "nodes": [
        {"name": "A", "properties": {"x": 0, "y": 0, "zone": "west"}},
        {"name": "B", "properties": {"x": 1, "y": 0, "zone": "west"}},
        {"name": "C", "properties": {"x": 2, "y": 0}},
        {"name": "D", "properties": {"x": 9, "y": 9}}
    ],
    "edges": [
        {"from": "A", "to": "B", "label": "road", "properties": {"weight": 1}},
        {"from": "B", "to": "C", "label": "road", "properties": {"weight": 1}},
        {"from": "A", "to": "C", "label": "ferry", "properties": {"weight": 5}}
    ]
}"#;

struct Fixture {
    dir: TempDir,
    graph: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let graph = dir.path().join("graph.json");
        std::fs::write(&graph, GRAPH).unwrap();
        Self { dir, graph }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn wayfind(&self) -> Command {
        let mut cmd = Command::cargo_bin("wayfind").unwrap();
        cmd.env("WAYFIND_CONFIG", self.config_path());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn graph(&self) -> &Path {
        &self.graph
    }
}

#[test]
fn test_path_text_output() {
    let fx = Fixture::new();
    fx.wayfind()
        .arg("path")
        .arg(fx.graph())
        .args(["A", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A -> B -> C"))
        .stdout(predicate::str::contains("cost: 2"));
}

#[test]
fn test_quiet_keeps_the_report() {
    let fx = Fixture::new();
    fx.wayfind()
        .args(["-q", "-f", "json", "path"])
        .arg(fx.graph())
        .args(["A", "C", "--options", r#"{"colour":"blue"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\": \"found\""))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_path_json_output_for_every_algorithm() {
    let fx = Fixture::new();
    for algorithm in ["astar", "idastar", "lrtastar"] {
        let output = fx
            .wayfind()
            .args(["--format", "json", "path"])
            .arg(fx.graph())
            .args(["A", "C", "--algorithm", algorithm, "--axis", "x,y"])
            .output()
            .unwrap();
        assert!(output.status.success(), "{}", algorithm);

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["algorithm"], algorithm);
        assert_eq!(value["nodes"], serde_json::json!(["A", "B", "C"]));
        assert_eq!(value["cost"], 2.0);
        assert_eq!(value["outcome"], "found");
    }
}

#[test]
fn test_edge_type_filter() {
    let fx = Fixture::new();
    fx.wayfind()
        .arg("path")
        .arg(fx.graph())
        .args(["A", "C", "--edge-type", "ferry"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A -> C"))
        .stdout(predicate::str::contains("cost: 5"));
}

#[test]
fn test_no_path_is_not_an_error() {
    let fx = Fixture::new();
    fx.wayfind()
        .arg("path")
        .arg(fx.graph())
        .args(["A", "D"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No path from A to D (exhausted)"));
}

#[test]
fn test_depth_bound_with_empty_policy() {
    let fx = Fixture::new();
    fx.wayfind()
        .arg("path")
        .arg(fx.graph())
        .args(["A", "C", "--max-depth", "0", "--empty-if-max-depth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("depth_cutoff"));
}

#[test]
fn test_ambiguous_selector_fails() {
    let fx = Fixture::new();
    fx.wayfind()
        .arg("path")
        .arg(fx.graph())
        .args(["zone=west", "C"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Only one source node is allowed"));
}

#[test]
fn test_unknown_node_fails() {
    let fx = Fixture::new();
    fx.wayfind()
        .arg("path")
        .arg(fx.graph())
        .args(["A", "Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No destination node matched"));
}

#[test]
fn test_invalid_options_fail() {
    let fx = Fixture::new();
    fx.wayfind()
        .arg("path")
        .arg(fx.graph())
        .args(["A", "C", "--options", r#"{"heuristicFormula":"warp"}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown heuristic formula"));

    fx.wayfind()
        .arg("path")
        .arg(fx.graph())
        .args(["A", "C", "--formula", "custom", "--axis", "x,y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing capability"));
}

#[test]
fn test_lrta_with_deadline_and_timeout() {
    let fx = Fixture::new();
    fx.wayfind()
        .arg("path")
        .arg(fx.graph())
        .args([
            "A",
            "C",
            "--algorithm",
            "lrtastar",
            "--timeout-ms",
            "2000",
            "--deadline-ms",
            "10000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("A -> B -> C"));
}

#[test]
fn test_deadline_stops_a_search_that_never_settles() {
    // Unweighted edges cost next to nothing, so LRTA* learns the A-B loop
    // away in tiny increments
    let fx = Fixture::new();
    let graph = fx.dir.path().join("loop.json");
    std::fs::write(
        &graph,
        r#"{
            "nodes": [{"name": "A"}, {"name": "B"}, {"name": "G"}],
            "edges": [
                {"from": "A", "to": "B"},
                {"from": "B", "to": "A"},
                {"from": "A", "to": "G", "properties": {"weight": 1}}
            ]
        }"#,
    )
    .unwrap();

    fx.wayfind()
        .arg("path")
        .arg(&graph)
        .args(["A", "G", "--algorithm", "lrtastar", "--deadline-ms", "200"])
        .timeout(Duration::from_secs(20))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Search exceeded deadline of 200 ms"));
}

#[test]
fn test_info() {
    let fx = Fixture::new();
    fx.wayfind()
        .arg("info")
        .arg(fx.graph())
        .assert()
        .success()
        .stdout(predicate::str::contains("nodes: 4"))
        .stdout(predicate::str::contains("edges: 3"))
        .stdout(predicate::str::contains("edge labels: ferry, road"));
}

#[test]
fn test_missing_graph_file() {
    let fx = Fixture::new();
    fx.wayfind()
        .args(["info", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load graph"));
}

#[test]
fn test_config_roundtrip() {
    let fx = Fixture::new();

    fx.wayfind()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    fx.wayfind()
        .args(["config", "set", "default_algorithm", "IDA*"])
        .assert()
        .success();
    fx.wayfind()
        .args(["config", "get", "default_algorithm"])
        .assert()
        .success()
        .stdout(predicate::str::diff("idastar\n"));

    fx.wayfind()
        .args(["config", "set", "format", "json"])
        .assert()
        .success();
    fx.wayfind()
        .arg("path")
        .arg(fx.graph())
        .args(["A", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"algorithm\": \"idastar\""));

    fx.wayfind()
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_algorithm  idastar  (changed)"))
        .stdout(predicate::str::contains("options            -\n"));

    fx.wayfind()
        .args(["config", "unset", "format"])
        .assert()
        .success();
    fx.wayfind()
        .args(["config", "get", "format"])
        .assert()
        .success()
        .stdout(predicate::str::diff("text\n"));

    fx.wayfind()
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure();
    fx.wayfind()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_options_feed_searches() {
    let fx = Fixture::new();
    fx.wayfind()
        .args(["config", "set", "options", r#"{"edgeTypeNames":"ferry"}"#])
        .assert()
        .success();
    fx.wayfind()
        .arg("path")
        .arg(fx.graph())
        .args(["A", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cost: 5"));
}

#[test]
fn test_completions() {
    let fx = Fixture::new();
    fx.wayfind()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wayfind"));
}
