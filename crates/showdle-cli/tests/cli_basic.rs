//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory
//! and pins the clock with `--now`.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_showdle-cli"))
        .args(args)
        .env("SHOWDLE_DATA_DIR", data_dir)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = args.to_vec();
    full.push("--json");
    serde_json::from_str(&run_ok(data_dir, &full)).expect("Failed to parse JSON output")
}

const DAY1: &str = "2024-05-01T16:00:00Z";
const DAY2: &str = "2024-05-02T16:00:00Z";

#[test]
fn test_user_create_and_list() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["user", "create", "rory"]);
    assert!(out.contains("User created: rory"));

    let users = run_json(dir.path(), &["user", "list"]);
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["name"], "rory");
}

#[test]
fn test_duplicate_user_fails() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["user", "create", "luke"]);
    let (_, stderr, code) = run_cli(dir.path(), &["user", "create", "luke"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("already taken"));
}

#[test]
fn test_partial_then_full_day() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["user", "create", "lorelai"]);

    let first = run_json(
        dir.path(),
        &["play", "record", "lorelai", "classic", "--incorrect", "2", "--now", DAY1],
    );
    assert_eq!(first["kind"], "partial");
    assert_eq!(first["daily_score"], serde_json::json!([3, 0, 0]));

    run_ok(dir.path(), &["play", "record", "lorelai", "quote", "--now", DAY1]);
    let last = run_json(
        dir.path(),
        &["play", "record", "lorelai", "image", "--incorrect", "1", "--now", DAY1],
    );
    assert_eq!(last["kind"], "full");
    assert_eq!(last["streak"], 1);
    assert_eq!(last["recent_scores"], serde_json::json!([3, 1, 2]));

    let history = run_json(dir.path(), &["score", "recent", "lorelai"]);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["played_on"], "2024-05-01");
}

#[test]
fn test_duplicate_record_is_rejected() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["user", "create", "emily"]);
    run_ok(dir.path(), &["play", "record", "emily", "quote", "--now", DAY1]);

    let (_, stderr, code) = run_cli(
        dir.path(),
        &["play", "record", "emily", "quote", "--now", DAY1],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("already been played today"));
}

#[test]
fn test_check_reopens_next_day_and_streak_continues() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["user", "create", "richard"]);
    for mode in ["classic", "quote", "image"] {
        run_ok(dir.path(), &["play", "record", "richard", mode, "--now", DAY1]);
    }

    let check = run_json(dir.path(), &["play", "check", "richard", "image", "--now", DAY1]);
    assert_eq!(check["played"], true);
    let check = run_json(dir.path(), &["play", "check", "richard", "image", "--now", DAY2]);
    assert_eq!(check["played"], false);

    for mode in ["classic", "quote", "image"] {
        run_ok(dir.path(), &["play", "record", "richard", mode, "--now", DAY2]);
    }
    let score = run_json(dir.path(), &["score", "show", "richard"]);
    assert_eq!(score["streak"], 2);
    assert_eq!(score["longest_streak"], 2);
}

#[test]
fn test_score_show_starts_fresh_on_new_day() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["user", "create", "taylor"]);
    for mode in ["classic", "quote", "image"] {
        run_ok(
            dir.path(),
            &["play", "record", "taylor", mode, "--incorrect", "2", "--now", DAY1],
        );
    }

    let same_day = run_json(dir.path(), &["score", "show", "taylor", "--now", DAY1]);
    assert_eq!(same_day["scores"], serde_json::json!([3, 3, 3]));

    let next_day = run_json(dir.path(), &["score", "show", "taylor", "--now", DAY2]);
    assert_eq!(next_day["day"], "2024-05-02");
    assert_eq!(next_day["scores"], serde_json::json!([0, 0, 0]));
    assert_eq!(next_day["streak"], 1);
    assert_eq!(next_day["progress"]["state"], "not_started");

    let out = run_ok(dir.path(), &["score", "show", "taylor", "--now", DAY2]);
    assert!(out.contains("2024-05-02: classic: -  quote: -  image: -"));

    let user = run_json(dir.path(), &["user", "show", "taylor", "--now", DAY2]);
    assert_eq!(user["status"]["scores"], serde_json::json!([0, 0, 0]));
}

#[test]
fn test_status_reports_progress() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["user", "create", "sookie"]);
    run_ok(dir.path(), &["play", "record", "sookie", "1", "--now", DAY1]);

    let status = run_json(dir.path(), &["play", "status", "sookie", "--now", DAY1]);
    assert_eq!(status["progress"]["state"], "in_progress");
    assert_eq!(status["progress"]["completed"], 1);
}

#[test]
fn test_invalid_mode_is_rejected() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["user", "create", "kirk"]);
    let (_, _, code) = run_cli(dir.path(), &["play", "record", "kirk", "5"]);
    assert_ne!(code, 0);
}

#[test]
fn test_leaderboard_and_delete() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["user", "create", "paris"]);
    run_ok(dir.path(), &["user", "create", "doyle"]);
    for mode in ["classic", "quote", "image"] {
        run_ok(dir.path(), &["play", "record", "paris", mode, "--now", DAY1]);
    }

    let board = run_json(dir.path(), &["score", "leaderboard"]);
    assert_eq!(board[0]["name"], "paris");
    assert_eq!(board[0]["streak"], 1);

    run_ok(dir.path(), &["user", "delete", "paris"]);
    let board = run_json(dir.path(), &["score", "leaderboard"]);
    assert_eq!(board.as_array().unwrap().len(), 1);
    assert_eq!(board[0]["name"], "doyle");
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["config", "get", "game.reference_zone"]);
    assert_eq!(out.trim(), "America/New_York");

    run_ok(dir.path(), &["config", "set", "game.reference_zone", "Europe/Berlin"]);
    let out = run_ok(dir.path(), &["config", "get", "game.reference_zone"]);
    assert_eq!(out.trim(), "Europe/Berlin");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "game.reference_zone", "Nope/Nowhere"]);
    assert_ne!(code, 0);
    let (_, _, code) = run_cli(dir.path(), &["config", "get", "game.nothing"]);
    assert_ne!(code, 0);
}

#[test]
fn test_reference_zone_changes_day_boundary() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["config", "set", "game.reference_zone", "Asia/Tokyo"]);
    run_ok(dir.path(), &["user", "create", "jess"]);

    // 14:00 and 16:00 UTC straddle midnight in Tokyo (UTC+9).
    run_ok(
        dir.path(),
        &["play", "record", "jess", "classic", "--now", "2024-05-01T14:00:00Z"],
    );
    let check = run_json(
        dir.path(),
        &["play", "check", "jess", "classic", "--now", "2024-05-01T16:00:00Z"],
    );
    assert_eq!(check["played"], false);
}

#[test]
fn test_character_daily() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["character", "add", "Luke", "--quote", "No cell phones."]);
    run_ok(dir.path(), &["character", "add", "Kirk", "--image", "kirk.png"]);

    let answers = run_json(dir.path(), &["character", "daily", "--now", DAY1]);
    let answers = answers.as_array().unwrap();
    assert_eq!(answers.len(), 3);
    assert_eq!(answers[1]["mode"], "quote");
    assert_eq!(answers[1]["character"]["name"], "Luke");
    assert_eq!(answers[2]["character"]["name"], "Kirk");

    let again = run_json(dir.path(), &["character", "daily", "--mode", "classic", "--now", DAY1]);
    assert_eq!(again[0]["character"], answers[0]["character"]);
}
