mod support;

use assert_cmd::Command;
use chrono::{Duration, Local};
use habit::storage::DataFile;
use predicates::str::contains;
use serde_json::Value;

use support::TestData;

fn habit(data: &TestData) -> Command {
    let mut cmd = Command::cargo_bin("habit").expect("binary");
    cmd.arg("--data-dir").arg(data.path());
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.arg("--json").output().expect("run habit");
    assert!(output.status.success(), "habit failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("json output")
}

#[test]
fn init_creates_layout() {
    let dir = tempfile::tempdir().expect("tempdir");

    Command::cargo_bin("habit")
        .expect("binary")
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("initialized data directory"));

    let root = dir.path().join("Habit");
    for file in ["habits.txt", "today.txt", "streaks.txt", "progress.txt", "habit.toml"] {
        assert!(root.join(file).exists(), "{file} missing");
    }

    Command::cargo_bin("habit")
        .expect("binary")
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("nothing to do"));
}

#[test]
fn data_dir_is_found_from_a_subdirectory() {
    let data = TestData::new();
    data.write(DataFile::Habits, "Read\n");
    let nested = data.path().join("notes");
    std::fs::create_dir_all(&nested).expect("mkdir");

    Command::cargo_bin("habit")
        .expect("binary")
        .current_dir(&nested)
        .arg("today")
        .assert()
        .success()
        .stdout(contains("[ ] Read"));
}

#[test]
fn check_and_uncheck_update_today() {
    let data = TestData::new();
    data.write(DataFile::Habits, "Read a book\nWalk\n");

    habit(&data)
        .args(["check", "Read", "a", "book"])
        .assert()
        .success()
        .stdout(contains("[x] Read a book"));

    let today = Local::now().date_naive();
    assert_eq!(
        data.read(DataFile::Today),
        Some(format!("{today}\nRead a book\n"))
    );

    habit(&data)
        .args(["uncheck", "Read a book"])
        .assert()
        .success()
        .stdout(contains("[ ] Read a book"));
    assert_eq!(data.read(DataFile::Today), Some(format!("{today}\n")));
}

#[test]
fn check_unknown_habit_fails() {
    let data = TestData::new();
    data.write(DataFile::Habits, "Walk\n");

    habit(&data)
        .args(["check", "Swim"])
        .assert()
        .code(2)
        .stderr(contains("Unknown habit: Swim"));
}

#[test]
fn today_rolls_over_from_yesterday() {
    let data = TestData::new();
    let today = Local::now().date_naive();
    let yesterday = today - Duration::days(1);
    data.write(DataFile::Habits, "A\nB\nC\n")
        .write(DataFile::Today, &format!("{yesterday}\nA\nB\n"))
        .write(DataFile::Streaks, "A: 2\nC: 8\n");

    let value = json_output(habit(&data).arg("today"));
    assert_eq!(value["schema_version"], "habit.v1");
    assert_eq!(value["command"], "today");
    assert_eq!(value["data"]["rollover"]["kind"], "next_day");
    assert_eq!(value["data"]["rollover"]["archived"], 2);
    assert_eq!(value["data"]["active_streaks"][0]["habit"], "A");
    assert_eq!(value["data"]["active_streaks"][0]["days"], 3);

    assert_eq!(data.read(DataFile::Progress).as_deref(), Some("2\n"));
    assert_eq!(data.read(DataFile::Streaks).as_deref(), Some("A: 3\nB: 1\n"));
    assert_eq!(data.read(DataFile::Today), Some(format!("{today}\n")));
}

#[test]
fn today_after_a_gap_warns_about_reset_streaks() {
    let data = TestData::new();
    let last_seen = Local::now().date_naive() - Duration::days(4);
    data.write(DataFile::Habits, "A\n")
        .write(DataFile::Today, &format!("{last_seen}\nA\n"))
        .write(DataFile::Streaks, "A: 12\n");

    habit(&data)
        .arg("today")
        .assert()
        .success()
        .stdout(contains("missed 3 day(s); all streaks were reset"));

    assert_eq!(data.read(DataFile::Progress).as_deref(), Some("1\n0\n0\n0\n"));
    assert_eq!(data.read(DataFile::Streaks).as_deref(), Some(""));
}

#[test]
fn streaks_lists_active_only_unless_all() {
    let data = TestData::new();
    let today = Local::now().date_naive();
    data.write(DataFile::Habits, "A\nB\n")
        .write(DataFile::Today, &format!("{today}\n"))
        .write(DataFile::Streaks, "A: 3\nB: 2\n");

    let value = json_output(habit(&data).arg("streaks"));
    assert_eq!(value["data"]["streaks"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["data"]["streaks"][0]["habit"], "A");

    let value = json_output(habit(&data).args(["streaks", "--all"]));
    assert_eq!(value["data"]["streaks"].as_array().map(Vec::len), Some(2));
}

#[test]
fn progress_skips_malformed_lines() {
    let data = TestData::new();
    let today = Local::now().date_naive();
    data.write(DataFile::Today, &format!("{today}\n"))
        .write(DataFile::Progress, "3\n\nbad\n5\n");

    let value = json_output(habit(&data).arg("progress"));
    assert_eq!(value["data"]["samples"], serde_json::json!([3, 5]));
    assert_eq!(value["data"]["summary"]["max"], 5);

    habit(&data)
        .arg("progress")
        .assert()
        .success()
        .stdout(contains("2 | "))
        .stdout(contains("best: 5 (day 2)"));
}

#[test]
fn status_reports_files() {
    let data = TestData::new();

    let value = json_output(habit(&data).arg("status"));
    assert_eq!(value["data"]["rollover"]["kind"], "first_run");
    let files = value["data"]["files"].as_array().expect("files");
    assert_eq!(files.len(), 4);
    // today.txt is created by the rollover, habits.txt by the task store
    assert_eq!(files[0]["file"], "habits.txt");
    assert_eq!(files[0]["present"], true);
    assert_eq!(files[1]["present"], true);
}
