mod common;

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::str::contains;

fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("spend_tracker_cli").expect("binary built");
    cmd.env("SPEND_TRACKER_CLI_SCRIPT", "1")
        .env("SPEND_TRACKER_HOME", home)
        .env_remove("RUST_LOG");
    cmd
}

fn run(home: &Path, input: &str) -> String {
    let output = cli(home).write_stdin(input).output().expect("run cli");
    assert!(output.status.success());
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

#[test]
fn script_mode_records_and_summarizes_a_week() {
    let home = common::setup_app_dir();
    let input = "\
add 2024-03-10 Food 12.50
add 2024-03-12 Others 30 Gifts
add 2024-03-17 Food 5
view weekly
date 2024-03-14
summary
exit
";

    cli(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Recorded 2024-03-12 Gifts $30.00"))
        .stdout(contains("3/10/2024 - 3/16/2024"))
        .stdout(contains("Total spent (period)  : $42.50"))
        .stdout(contains("Total spent (all time): $47.50"));

    let data = home.join("data");
    let stored = fs::read_to_string(data.join("spendingData.json")).unwrap();
    assert!(stored.contains("\"Gifts\""));
    let custom = fs::read_to_string(data.join("customCategories.json")).unwrap();
    assert_eq!(custom.trim(), r#"["Gifts"]"#);
    assert!(home.join("config.json").exists());
}

#[test]
fn records_survive_restart() {
    let home = common::setup_app_dir();
    cli(&home)
        .write_stdin("add 2024-05-02 Rent 900\nexit\n")
        .assert()
        .success();

    let stdout = run(&home, "date 2024-05-20\nlist\n");
    assert!(stdout.contains("May 2024"));
    assert!(stdout.contains("Rent"));
    assert!(stdout.contains("$900.00"));
}

#[test]
fn invalid_entries_report_fields_and_save_nothing() {
    let home = common::setup_app_dir();
    cli(&home)
        .write_stdin("add someday Others -4\nlist all\n")
        .assert()
        .success()
        .stderr(contains(
            "missing or invalid date, custom category name, amount",
        ))
        .stdout(contains("No records."));

    assert!(!home.join("data").join("spendingData.json").exists());
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = common::setup_app_dir();
    cli(&home)
        .write_stdin("sumary\n")
        .assert()
        .success()
        .stderr(contains("Unknown command `sumary`"))
        .stdout(contains("Suggestion: `summary`?"));
}

#[test]
fn summary_json_is_machine_readable() {
    let home = common::setup_app_dir();
    let stdout = run(
        &home,
        "add 2024-03-15 Food 8\nview daily\ndate 2024-03-15\nsummary --json\n",
    );

    let start = stdout.find("{\n").expect("json object in output");
    let json: serde_json::Value = serde_json::from_str(&stdout[start..]).expect("valid json");
    assert_eq!(json["label"], "March 15, 2024");
    assert_eq!(json["total_in_window"], 8.0);
    assert_eq!(json["series"]["labels"][0], "2024-03-15");
}

#[test]
fn help_lists_every_command() {
    let home = common::setup_app_dir();
    let stdout = run(&home, "help\n");
    assert!(stdout.contains("Available commands"));
    for name in [
        "add", "list", "categories", "category", "view", "date", "summary", "version", "help",
        "exit",
    ] {
        assert!(stdout.contains(&format!("  {name} ")), "missing `{name}`");
    }
}

#[test]
fn config_week_start_moves_the_weekly_window() {
    let home = common::setup_app_dir();
    fs::write(
        home.join("config.json"),
        r#"{ "week_start": "monday", "default_granularity": "Weekly" }"#,
    )
    .unwrap();

    let stdout = run(&home, "date 2024-03-14\n");
    assert!(stdout.contains("3/11/2024 - 3/17/2024"));
}
