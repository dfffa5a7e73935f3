//! End-to-end tests of the `tale` binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tale() -> Command {
    let mut cmd = Command::cargo_bin("tale").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("TALE_LOG");
    cmd
}

/// Generate a three-objective physics activity into a temp directory.
fn generated_activity() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("forces.json");
    tale()
        .args([
            "generate",
            "Forces",
            "--objective",
            "forces",
            "--objective",
            "energy",
            "--objective",
            "momentum",
            "--duration",
            "25",
            "-o",
        ])
        .arg(&path)
        .assert()
        .success();
    (dir, path)
}

const BROKEN: &str = r#"{
    "id": "broken",
    "title": "Broken",
    "startingSceneId": "missing",
    "availableScenes": [
        { "id": "a", "title": "A", "description": "", "choices": [
            { "id": "go", "text": "Go", "nextSceneId": "nowhere" }
        ] },
        { "id": "a", "title": "A again", "description": "" }
    ]
}"#;

// -- generate --

#[test]
fn generate_writes_activity_json() {
    let (_dir, path) = generated_activity();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["startingSceneId"], "scene_1");
    assert_eq!(json["maxChoices"], 10);
    assert_eq!(json["availableScenes"].as_array().unwrap().len(), 7);
    assert!(json["id"].as_str().unwrap().starts_with("narrative_"));
}

#[test]
fn generate_prints_to_stdout() {
    tale()
        .args(["generate", "Cells", "--subject", "biology", "--objective", "mitosis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"subject\": \"biology\""))
        .stdout(predicate::str::contains("Rainforest Research Station"));
}

#[test]
fn generate_rejects_unknown_difficulty() {
    tale()
        .args(["generate", "X", "--difficulty", "brutal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn generate_uses_builder_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("builder.json");
    fs::write(&config, r#"{ "challengeThreshold": 5, "minutesPerChoice": 5.0 }"#).unwrap();
    tale()
        .args(["generate", "X", "--duration", "20", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"maxChoices\": 4"))
        .stdout(predicate::str::contains("\"value\": 5"));
}

// -- check --

#[test]
fn check_generated_activity_passes() {
    let (_dir, path) = generated_activity();
    tale()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stdout(predicate::str::contains("7 scenes"));
}

#[test]
fn check_reports_graph_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, BROKEN).unwrap();
    tale()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate scene id 'a'"))
        .stderr(predicate::str::contains("starting scene 'missing' does not exist"))
        .stderr(predicate::str::contains("leads to unknown scene 'nowhere'"));
}

#[test]
fn check_missing_file_fails() {
    tale()
        .args(["check", "/nonexistent/activity.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// -- show --

#[test]
fn show_lists_scenes() {
    let (_dir, path) = generated_activity();
    tale()
        .arg("show")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Forces"))
        .stdout(predicate::str::contains("scene_7"))
        .stdout(predicate::str::contains("choice limit: 10"))
        .stdout(predicate::str::contains("visited:scene_2"));
}

// -- play --

#[test]
fn play_scripted_to_success() {
    let (_dir, path) = generated_activity();
    tale()
        .arg("play")
        .arg(&path)
        .args(["--choices", "1,1,1,1,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mission Accomplished"))
        .stdout(predicate::str::contains("Physics Investigator"))
        .stdout(predicate::str::contains("# Forces: Results"))
        .stdout(predicate::str::contains("- Points: 90"));
}

#[test]
fn play_reads_stdin_until_quit() {
    let (_dir, path) = generated_activity();
    tale()
        .arg("play")
        .arg(&path)
        .write_stdin("choice_1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Story paused after 1 choices (10 points)"));
}

#[test]
fn play_unknown_scripted_choice_fails() {
    let (_dir, path) = generated_activity();
    tale()
        .arg("play")
        .arg(&path)
        .args(["--choices", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown choice: \"9\""));
}

#[test]
fn play_save_and_resume() {
    let (dir, path) = generated_activity();
    let save = dir.path().join("save.json");

    tale()
        .arg("play")
        .arg(&path)
        .args(["--choices", "1,1"])
        .arg("--save")
        .arg(&save)
        .assert()
        .success()
        .stdout(predicate::str::contains("Story paused after 2 choices (20 points)"));

    let snapshot = fs::read_to_string(&save).unwrap();
    assert!(snapshot.contains("\"currentSceneId\": \"scene_3\""));

    tale()
        .arg("play")
        .arg(&path)
        .args(["--choices", "1,1,1"])
        .arg("--resume")
        .arg(&save)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mission Accomplished"))
        .stdout(predicate::str::contains("- Points: 90"));
}

#[test]
fn play_refuses_missing_start() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, BROKEN).unwrap();
    tale()
        .arg("play")
        .arg(&path)
        .args(["--choices", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scene not found: \"missing\""));
}
