//! End-to-end CLI tests against a fixture data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use rusqlite::Connection;
use std::path::Path;
use tempfile::TempDir;

fn create_event_db(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE event (
            title TEXT NOT NULL, subtitle TEXT,
            begin_time INTEGER NOT NULL, end_time INTEGER NOT NULL,
            main_color TEXT, update_file_url TEXT
        );
        CREATE TABLE days (id INTEGER PRIMARY KEY, title TEXT, begin_time INTEGER, end_time INTEGER);
        CREATE TABLE sessions (
            id INTEGER PRIMARY KEY, title TEXT, begin_time INTEGER, end_time INTEGER,
            fk_speaker INTEGER, fk_track INTEGER, fk_location INTEGER
        );
        CREATE TABLE speakers (id INTEGER PRIMARY KEY, name TEXT, twitter TEXT, url TEXT, bio TEXT);
        CREATE TABLE tracks (id INTEGER PRIMARY KEY, name TEXT);
        CREATE TABLE locations (id INTEGER PRIMARY KEY, name TEXT);

        INSERT INTO event VALUES ('RustConf', 'All things Rust', 1000, 100000, '#B7410E', NULL);
        INSERT INTO days VALUES (1, 'Day 1', 1000, 100000);
        INSERT INTO speakers VALUES
            (1, 'Ada Lovelace', 'adal', NULL, NULL),
            (2, 'Grace Hopper', NULL, NULL, NULL),
            (3, 'Barbara Liskov', NULL, NULL, NULL),
            (4, 'Donald Knuth', NULL, NULL, NULL);
        INSERT INTO tracks VALUES (1, 'Main');
        INSERT INTO locations VALUES (1, 'Hall A');
        INSERT INTO sessions VALUES
            (10, 'Opening Keynote', 2000, 3000, 1, 1, 1),
            (11, 'Parallel Talk', 2000, 3000, 2, 1, 1),
            (12, 'Closing', 5000, 6000, 3, 1, 1),
            (13, 'Broken Row', 7000, 8000, 42, 1, 1);
        "#,
    )
    .unwrap();
}

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    create_event_db(&dir.path().join("event.db"));
    dir
}

fn confab(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("confab").unwrap();
    cmd.arg("--data-dir").arg(dir.path());
    cmd
}

#[test]
fn info_shows_event_summary() {
    let dir = setup();
    confab(&dir)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("RustConf"))
        .stdout(predicate::str::contains("Days: 1"));
}

#[test]
fn schedule_marks_live_and_up_next_sections() {
    let dir = setup();
    confab(&dir)
        .args(["schedule", "--at", "3500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(LIVE now)"))
        .stdout(predicate::str::contains("(coming up next)"))
        .stdout(predicate::str::contains("Opening Keynote"))
        .stdout(predicate::str::contains("Closing"));
}

#[test]
fn schedule_warns_about_broken_rows_on_stderr() {
    let dir = setup();
    confab(&dir)
        .args(["schedule", "--at", "100"])
        .assert()
        .success()
        .stderr(predicate::str::contains("missing speaker 42"))
        .stdout(predicate::str::contains("Broken Row").not());
}

#[test]
fn schedule_favorites_filter_starts_empty() {
    let dir = setup();
    confab(&dir)
        .args(["schedule", "--favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions match your current filter"));
}

#[test]
fn favoriting_a_speaker_pulls_their_sessions_into_the_filter() {
    let dir = setup();
    confab(&dir)
        .args(["favorites", "add", "speaker", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Favorited speaker 2"));

    confab(&dir)
        .args(["schedule", "--favorites", "--at", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parallel Talk"))
        .stdout(predicate::str::contains("Opening Keynote").not());

    confab(&dir)
        .args(["favorites", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Favorite speakers: 2"));

    confab(&dir)
        .args(["favorites", "remove", "speaker", "2"])
        .assert()
        .success();

    confab(&dir)
        .args(["favorites", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Favorite speakers: (none)"));
}

#[test]
fn speakers_search_is_case_insensitive() {
    let dir = setup();
    confab(&dir)
        .args(["speakers", "--search", "hopper"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grace Hopper"))
        .stdout(predicate::str::contains("Ada Lovelace").not());
}

#[test]
fn speakers_index_appears_with_four_sections() {
    let dir = setup();
    confab(&dir)
        .arg("speakers")
        .assert()
        .success()
        .stdout(predicate::str::contains("Index: A B D G"));
}

#[test]
fn schedule_json_output_carries_statuses() {
    let dir = setup();
    let output = confab(&dir)
        .args(["--format", "json", "schedule", "--at", "3500"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["day"]["title"], "Day 1");
    let sections = payload["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["status"], "Live");
    assert_eq!(sections[1]["status"], "UpNext");
    assert_eq!(sections[0]["sessions"].as_array().unwrap().len(), 2);
}

#[test]
fn missing_data_file_is_a_hard_error() {
    let dir = TempDir::new().unwrap();
    confab(&dir)
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn refresh_without_update_url_explains_itself() {
    let dir = setup();
    confab(&dir)
        .arg("refresh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No update URL configured"));
}

#[test]
fn init_from_a_local_file_copies_it_into_place() {
    let source_dir = TempDir::new().unwrap();
    let source = source_dir.path().join("bundled.db");
    create_event_db(&source);

    let dir = TempDir::new().unwrap();
    confab(&dir)
        .args(["init", "--from", source.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    confab(&dir)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("RustConf"));
}

#[test]
fn init_rejects_an_invalid_local_file() {
    let source_dir = TempDir::new().unwrap();
    let source = source_dir.path().join("bogus.db");
    std::fs::write(&source, b"not a database").unwrap();

    let dir = TempDir::new().unwrap();
    confab(&dir)
        .args(["init", "--from", source.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid event file"));
}

#[test]
fn out_of_range_day_number_fails() {
    let dir = setup();
    confab(&dir)
        .args(["schedule", "--day", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No day 9"));
}
