//! CLI integration tests driving the skelrig binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

const RIG: &str = r#"{
  "bones": [
    { "position": [0, 0, 0], "endpoint": [0, 1, 0] },
    { "parent": 0, "position": [0, 1, 0], "endpoint": [0, 2, 0] },
    { "parent": 1, "position": [0, 2, 0], "endpoint": [1, 2, 0] },
    { "parent": 1, "position": [0, 2, 0], "endpoint": [-1, 2, 0] }
  ]
}"#;

const SCRIPT: &str = r#"[
  { "op": "capture" },
  { "op": "rotate", "bone": 1, "angle": 0.5, "axis": [0, 0, 1] },
  { "op": "ik", "bone": 2, "target": [1.0, 2.5, 0.0] },
  { "op": "capture" },
  { "op": "pick", "origin": [0, 0.5, 5], "direction": [0, 0, -1] }
]"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn skelrig() -> Command {
    Command::cargo_bin("skelrig").unwrap()
}

#[test]
fn test_rig_info() {
    let dir = TempDir::new().unwrap();
    let rig = write(dir.path(), "rig.json", RIG);

    skelrig()
        .args(["rig", "info"])
        .arg(&rig)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rig Information"))
        .stdout(predicate::str::contains("Bones: 4"))
        .stdout(predicate::str::contains("Branch points: 1"));
}

#[test]
fn test_rig_validate_rejects_cycle() {
    let dir = TempDir::new().unwrap();
    let rig = write(
        dir.path(),
        "cycle.json",
        r#"{ "bones": [
            { "parent": 1, "position": [0, 0, 0], "endpoint": [0, 1, 0] },
            { "parent": 0, "position": [0, 1, 0], "endpoint": [0, 2, 0] }
        ] }"#,
    );

    skelrig()
        .args(["rig", "validate"])
        .arg(&rig)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cycle"));
}

#[test]
fn test_rig_tree() {
    let dir = TempDir::new().unwrap();
    let rig = write(dir.path(), "rig.json", RIG);

    skelrig()
        .args(["rig", "tree", "--no-color", "--compact"])
        .arg(&rig)
        .assert()
        .success()
        .stdout(predicate::str::contains("rig.json"))
        .stdout(predicate::str::contains("├── ○ bone 2"))
        .stdout(predicate::str::contains("└── ○ bone 3"));
}

#[test]
fn test_rig_pick_hit_and_miss() {
    let dir = TempDir::new().unwrap();
    let rig = write(dir.path(), "rig.json", RIG);

    skelrig()
        .args(["rig", "pick"])
        .arg(&rig)
        .args(["--origin", "0.5,2,5", "--direction", "0,0,-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bone 2"));

    skelrig()
        .args(["rig", "pick"])
        .arg(&rig)
        .args(["--origin", "-3,-3,5", "--direction", "0,0,-1"])
        .assert()
        .success()
        .stdout(predicate::str::diff("none\n"));
}

#[test]
fn test_anim_pose_json() {
    let dir = TempDir::new().unwrap();
    let rig = write(dir.path(), "rig.json", RIG);
    let script = write(dir.path(), "ops.json", SCRIPT);

    let output = skelrig()
        .args(["anim", "pose"])
        .arg(&rig)
        .arg("--script")
        .arg(&script)
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["translations"].as_array().unwrap().len(), 12);
    assert_eq!(value["rotations"].as_array().unwrap().len(), 16);
    assert_eq!(value["highlighted"], 0);
}

#[test]
fn test_anim_pose_reports_failing_step() {
    let dir = TempDir::new().unwrap();
    let rig = write(dir.path(), "rig.json", RIG);
    let script = write(
        dir.path(),
        "bad.json",
        r#"[{ "op": "rotate", "bone": 9, "angle": 1.0, "axis": [0, 0, 1] }]"#,
    );

    skelrig()
        .args(["anim", "pose"])
        .arg(&rig)
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step 0 (rotate) failed"));
}

#[test]
fn test_anim_animate_to_file() {
    let dir = TempDir::new().unwrap();
    let rig = write(dir.path(), "rig.json", RIG);
    let script = write(dir.path(), "ops.json", SCRIPT);
    let out = dir.path().join("frames.json");

    skelrig()
        .args(["anim", "animate"])
        .arg(&rig)
        .arg("--script")
        .arg(&script)
        .args(["--fps", "4", "--easing", "smooth-step", "--output"])
        .arg(&out)
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["easing"], "smooth_step");
    assert_eq!(value["keyframes"], 2);
    let frames = value["frames"].as_array().unwrap();
    assert_eq!(frames.len(), 4);
    assert_eq!(frames[0]["time"], 0.0);
    assert_eq!(frames[3]["time"], 0.75);
}

#[test]
fn test_anim_animate_needs_two_keyframes() {
    let dir = TempDir::new().unwrap();
    let rig = write(dir.path(), "rig.json", RIG);
    let script = write(dir.path(), "one.json", r#"[{ "op": "capture" }]"#);

    skelrig()
        .args(["anim", "animate"])
        .arg(&rig)
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 keyframes"));
}

#[test]
fn test_anim_animate_rejects_step_below_time_resolution() {
    let dir = TempDir::new().unwrap();
    let rig = write(dir.path(), "rig.json", RIG);
    let script = write(dir.path(), "ops.json", SCRIPT);
    let out = dir.path().join("frames.json");

    skelrig()
        .args(["anim", "animate"])
        .arg(&rig)
        .arg("--script")
        .arg(&script)
        .args(["--fps", "1e8", "--output"])
        .arg(&out)
        .timeout(Duration::from_secs(30))
        .assert()
        .failure()
        .stderr(predicate::str::contains("too fine"));
    assert!(!out.exists());
}

#[test]
fn test_anim_animate_high_fps_terminates() {
    let dir = TempDir::new().unwrap();
    let rig = write(dir.path(), "rig.json", RIG);
    let script = write(dir.path(), "ops.json", SCRIPT);
    let out = dir.path().join("frames.json");

    skelrig()
        .args(["anim", "animate"])
        .arg(&rig)
        .arg("--script")
        .arg(&script)
        .args(["--fps", "1000", "--output"])
        .arg(&out)
        .timeout(Duration::from_secs(60))
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let frames = value["frames"].as_array().unwrap();
    assert_eq!(frames.len(), 1000);
    assert!(frames[999]["time"].as_f64().unwrap() < 1.0);
}

#[test]
fn test_completions() {
    skelrig()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skelrig"));
}
