use std::{fs, path::Path};

use assert_cmd::Command;
use chrono::NaiveDate;
use predicates::str::contains;
use tempfile::TempDir;

fn cli(home: &Path, store: &Path) -> Command {
    cli_on(home, store, "2024-03-10")
}

fn cli_on(home: &Path, store: &Path, today: &str) -> Command {
    let mut cmd = Command::cargo_bin("cashflow_cli").unwrap();
    cmd.env("CASHFLOW_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("CASHFLOW_STORE")
        .arg("--store")
        .arg(store)
        .arg("--today")
        .arg(today);
    cmd
}

/// First and last ISO dates printed by `balances`.
fn printed_date_range(stdout: &[u8]) -> (NaiveDate, NaiveDate) {
    let text = String::from_utf8_lossy(stdout);
    let dates: Vec<NaiveDate> = text
        .lines()
        .flat_map(|line| line.split_whitespace())
        .filter_map(|token| NaiveDate::parse_from_str(token, "%Y-%m-%d").ok())
        .collect();
    (*dates.first().unwrap(), *dates.last().unwrap())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn stored_ids(store: &Path) -> Vec<String> {
    let raw = fs::read_to_string(store).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value["transactions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|txn| txn["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn period_reports_the_current_cycle() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("transactions.json");

    cli(home.path(), &store)
        .arg("period")
        .assert()
        .success()
        .stdout(contains("15 Feb 2024 – 14 Mar 2024"))
        .stdout(contains("Period: 2024-02-15 .. 2024-03-14"))
        .stdout(contains("Chart:  2024-02-13 .. 2024-03-16"));

    cli(home.path(), &store)
        .args(["period", "--offset", "-1"])
        .assert()
        .success()
        .stdout(contains("Period: 2024-01-15 .. 2024-02-14"));
}

#[test]
fn add_list_and_project_balances() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("transactions.json");

    cli(home.path(), &store)
        .args(["add", "--title", "Salary", "--amount", "1000", "--kind", "income", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(contains("Added Salary"));
    cli(home.path(), &store)
        .args(["add", "--title", "Rent", "--amount", "300", "--date", "2024-03-05"])
        .assert()
        .success();

    cli(home.path(), &store)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Planned (2)"))
        .stdout(contains("Rent"));

    cli(home.path(), &store)
        .arg("balances")
        .assert()
        .success()
        .stdout(contains("2024-03-04"))
        .stdout(contains("$1,000.00"))
        .stdout(contains("$700.00"))
        .stdout(contains("* 2024-03-10"));

    cli(home.path(), &store)
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("Today's balance: $700.00"))
        .stdout(contains("Total income:    $1,000.00"))
        .stdout(contains("Planned: 2  Completed: 0"));
}

#[test]
fn complete_edit_and_delete_by_id() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("transactions.json");

    cli(home.path(), &store)
        .args(["add", "--title", "Electric", "--amount", "80", "--date", "2024-03-12"])
        .assert()
        .success();
    let id = stored_ids(&store).remove(0);

    cli(home.path(), &store)
        .args(["complete", &id, "--amount", "76.40"])
        .assert()
        .success()
        .stdout(contains("Completed Electric on 12 Mar 2024 for $76.40"));

    cli(home.path(), &store)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Completed (1)"))
        .stdout(contains("(plan: $80.00)"));

    cli(home.path(), &store)
        .args(["edit", &id, "--title", "Electricity"])
        .assert()
        .success()
        .stdout(contains("Updated Electricity"));

    cli(home.path(), &store)
        .args(["edit", &id])
        .assert()
        .failure()
        .stderr(contains("nothing to change"));

    cli(home.path(), &store).args(["delete", &id]).assert().success();
    assert!(stored_ids(&store).is_empty());

    cli(home.path(), &store)
        .args(["delete", &id])
        .assert()
        .failure()
        .stderr(contains("Transaction not found"));
}

#[test]
fn sweep_completes_overdue_items() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("transactions.json");

    cli(home.path(), &store)
        .args(["add", "--title", "Water", "--amount", "15", "--date", "2024-03-02"])
        .assert()
        .success();
    cli(home.path(), &store)
        .args(["add", "--title", "Phone", "--amount", "20", "--date", "2024-03-10"])
        .assert()
        .success();

    cli(home.path(), &store)
        .arg("sweep")
        .assert()
        .success()
        .stdout(contains("Auto-completed 1 past-due transaction(s)"));

    let raw = fs::read_to_string(&store).unwrap();
    assert!(raw.contains("\"completed_date\": \"2024-03-10\""));
}

#[test]
fn empty_store_has_nothing_to_chart() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("transactions.json");

    cli(home.path(), &store)
        .arg("balances")
        .assert()
        .success()
        .stdout(contains("No transactions recorded yet."));

    cli(home.path(), &store)
        .args(["period", "--all"])
        .assert()
        .success()
        .stdout(contains("No transactions recorded yet."));
}

#[test]
fn padded_balances_include_two_days_each_side() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("transactions.json");
    cli(home.path(), &store)
        .args(["add", "--title", "Salary", "--amount", "1000", "--kind", "income", "--date", "2024-03-01"])
        .assert()
        .success();

    let output = cli(home.path(), &store)
        .args(["balances", "--padded"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(printed_date_range(&output), (date(2024, 2, 13), date(2024, 3, 16)));
}

#[test]
fn all_time_balances_span_the_padded_history() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("transactions.json");
    cli(home.path(), &store)
        .args(["add", "--title", "Salary", "--amount", "1000", "--kind", "income", "--date", "2024-03-01"])
        .assert()
        .success();
    cli(home.path(), &store)
        .args(["add", "--title", "Rent", "--amount", "300", "--date", "2024-03-20"])
        .assert()
        .success();

    let output = cli(home.path(), &store)
        .args(["balances", "--all"])
        .assert()
        .success()
        .stdout(contains("All time"))
        .get_output()
        .stdout
        .clone();

    assert_eq!(printed_date_range(&output), (date(2024, 2, 25), date(2024, 3, 30)));
}

#[test]
fn all_time_summary_reads_today_from_the_lead_in() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("transactions.json");
    cli(home.path(), &store)
        .args(["add", "--title", "Salary", "--amount", "1000", "--kind", "income", "--date", "2024-03-05"])
        .assert()
        .success();

    cli_on(home.path(), &store, "2024-03-01")
        .args(["summary", "--all"])
        .assert()
        .success()
        .stdout(contains("Today's balance: $0.00"))
        .stdout(contains("Closing balance: $1,000.00"));
}
