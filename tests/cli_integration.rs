//! Integration tests for the `stitch` binary.
//!
//! Each test runs the real CLI against pattern files in a temp directory,
//! with HOME pointed at that directory so no user config leaks in.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn stitch(&self) -> Command {
        let mut cmd = Command::cargo_bin("stitch").unwrap();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("STITCHWORK_CONFIG");
        cmd
    }

    /// Pattern with a sentinel at (400, 300) and one chain at (450, 300).
    fn with_chain(&self) -> PathBuf {
        self.stitch().args(["new", "p.json"]).assert().success();
        self.stitch()
            .args(["add", "p.json", "--at", "450,300"])
            .assert()
            .success();
        self.path("p.json")
    }
}

fn read(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn new_writes_sentinel_at_canvas_center() {
    let ws = Workspace::new();
    ws.stitch()
        .args(["new", "p.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sentinel at (400, 300)"));

    let json = read(&ws.path("p.json"));
    assert_eq!(
        json,
        serde_json::json!([{"x": 400.0, "y": 300.0, "parent": null, "base": null, "type": 6}])
    );
}

#[test]
fn new_refuses_to_overwrite_without_force() {
    let ws = Workspace::new();
    ws.stitch().args(["new", "p.json"]).assert().success();
    ws.stitch()
        .args(["new", "p.json", "--at", "0,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    ws.stitch()
        .args(["new", "p.json", "--at", "-10,5", "--force"])
        .assert()
        .success();

    assert_eq!(read(&ws.path("p.json"))[0]["x"], -10.0);
}

#[test]
fn add_appends_after_cursor() {
    let ws = Workspace::new();
    let file = ws.with_chain();

    ws.stitch()
        .args(["add", "p.json", "--at", "450,250", "--type", "dc", "--base", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added dc 2"));

    let json = read(&file);
    assert_eq!(json[1], serde_json::json!({"x": 450.0, "y": 300.0, "parent": 0, "base": null, "type": 0}));
    assert_eq!(json[2], serde_json::json!({"x": 450.0, "y": 250.0, "parent": 1, "base": 1, "type": 3}));
}

#[test]
fn add_post_stitch_without_base_warns() {
    let ws = Workspace::new();
    ws.with_chain();

    ws.stitch()
        .args(["add", "p.json", "--at", "500,250", "--type", "sc"])
        .assert()
        .success()
        .stderr(predicate::str::contains("has no base"));
}

#[test]
fn show_lists_stitches_and_marks_cursor() {
    let ws = Workspace::new();
    ws.with_chain();

    ws.stitch()
        .args(["show", "p.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("parent   base"))
        .stdout(predicate::str::contains("  1*  ch      450.0    300.0      0      -"));
}

#[test]
fn show_json_prints_the_file_format() {
    let ws = Workspace::new();
    ws.with_chain();

    let output = ws.stitch().args(["show", "p.json", "--json"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[test]
fn delete_rejects_sentinel() {
    let ws = Workspace::new();
    let file = ws.with_chain();

    ws.stitch()
        .args(["delete", "p.json", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sentinel"));
    assert_eq!(read(&file).as_array().map(Vec::len), Some(2));
}

#[test]
fn delete_reattaches_followers() {
    let ws = Workspace::new();
    let file = ws.with_chain();
    ws.stitch()
        .args(["add", "p.json", "--at", "500,300"])
        .assert()
        .success();

    ws.stitch().args(["delete", "p.json", "1"]).assert().success();

    let json = read(&file);
    assert_eq!(json.as_array().map(Vec::len), Some(2));
    assert_eq!(json[1]["x"], 500.0);
    assert_eq!(json[1]["parent"], 0);
}

#[test]
fn unknown_index_reports_pattern_size() {
    let ws = Workspace::new();
    ws.with_chain();

    ws.stitch()
        .args(["delete", "p.json", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no stitch at index 7 (pattern has 2 stitches)"));
}

#[test]
fn rebase_and_align() {
    let ws = Workspace::new();
    let file = ws.with_chain();
    ws.stitch()
        .args(["add", "p.json", "--at", "500,300"])
        .assert()
        .success();
    ws.stitch()
        .args(["add", "p.json", "--at", "470,250", "--type", "hdc", "--base", "1"])
        .assert()
        .success();

    ws.stitch()
        .args(["rebase", "p.json", "3", "--onto", "2"])
        .assert()
        .success();
    ws.stitch()
        .args(["rebase", "p.json", "2", "--onto", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not worked into a base"));
    ws.stitch()
        .args(["align", "p.json", "--horizontal", "1", "3"])
        .assert()
        .success();

    let json = read(&file);
    assert_eq!(json[3]["base"], 2);
    assert_eq!(json[1]["y"], 275.0);
    assert_eq!(json[3]["y"], 275.0);
}

#[test]
fn move_translates_listed_stitches() {
    let ws = Workspace::new();
    let file = ws.with_chain();

    ws.stitch()
        .args(["move", "p.json", "--by", "-5,10", "1"])
        .assert()
        .success();

    let json = read(&file);
    assert_eq!(json[1]["x"], 445.0);
    assert_eq!(json[1]["y"], 310.0);
}

#[test]
fn validate_reports_broken_files() {
    let ws = Workspace::new();
    ws.with_chain();
    ws.stitch()
        .args(["validate", "p.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid (2 stitches)"));

    fs::write(
        ws.path("bad.json"),
        r#"[{"x": 1, "y": 2, "parent": null, "base": null, "type": 6}, {"x": 3, "parent": 0, "base": null, "type": 0}]"#,
    )
    .unwrap();
    ws.stitch()
        .args(["validate", "bad.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("stitch 1 has invalid y: missing"));
}

#[test]
fn replay_drives_the_editor() {
    let ws = Workspace::new();
    ws.stitch().args(["new", "p.json"]).assert().success();
    fs::write(
        ws.path("drag.jsonl"),
        "# drag a chain out of the sentinel\n\
         {\"event\": \"down\", \"x\": 400, \"y\": 300}\n\
         {\"event\": \"move\", \"x\": 430, \"y\": 300}\n\
         {\"event\": \"up\", \"x\": 450, \"y\": 300}\n\
         {\"event\": \"key\", \"key\": \"e\"}\n",
    )
    .unwrap();

    ws.stitch()
        .args(["replay", "p.json", "drag.jsonl", "--out", "q.json", "--export-dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 added"))
        .stdout(predicate::str::contains("1 exports"));

    assert_eq!(read(&ws.path("p.json")).as_array().map(Vec::len), Some(1));
    assert_eq!(read(&ws.path("q.json"))[1]["x"], 450.0);

    let exported: Vec<_> = fs::read_dir(ws.path("out")).unwrap().collect();
    assert_eq!(exported.len(), 1);
}

#[test]
fn replay_rejects_malformed_scripts() {
    let ws = Workspace::new();
    ws.stitch().args(["new", "p.json"]).assert().success();
    fs::write(ws.path("bad.jsonl"), "{\"event\": \"frame\"}\n{\"event\": \"jump\"}\n").unwrap();

    ws.stitch()
        .args(["replay", "p.json", "bad.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn export_writes_timestamped_copy() {
    let ws = Workspace::new();
    ws.with_chain();

    ws.stitch()
        .args(["export", "p.json", "--dir", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("exported pattern - "));
}

#[test]
fn config_uses_explicit_file() {
    let ws = Workspace::new();
    fs::write(ws.path("config.toml"), "[canvas]\nwidth = 1000\n\n[export]\nprefix = \"swatch\"\n").unwrap();

    ws.stitch()
        .args(["--config", "config.toml", "config", "get", "export.prefix"])
        .assert()
        .success()
        .stdout("swatch\n");
    ws.stitch()
        .args(["--config", "config.toml", "new", "p.json"])
        .assert()
        .success();
    assert_eq!(read(&ws.path("p.json"))[0]["x"], 500.0);
}

#[test]
fn config_get_rejects_unknown_key() {
    let ws = Workspace::new();
    ws.stitch()
        .args(["config", "get", "canvas.depth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("canvas.depth"));
}

#[test]
fn completion_generates_script() {
    let ws = Workspace::new();
    ws.stitch()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stitch"));
}
