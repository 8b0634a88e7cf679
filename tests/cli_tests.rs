use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LEDGER: &str = r#"{
    "categories": [
        {"id": "00000000-0000-0000-0000-000000000001", "name": "Salary", "kind": "income"},
        {"id": "00000000-0000-0000-0000-000000000002", "name": "Rent", "kind": "expense", "tips": "Find a roommate"},
        {"id": "00000000-0000-0000-0000-000000000003", "name": "Food", "kind": "expense", "tips": "Cook at home"}
    ],
    "users": {
        "alice": {
            "transactions": [
                {"amount": 3000, "date": "2024-02-01", "category_id": "00000000-0000-0000-0000-000000000001", "kind": "income", "source": "ACME"},
                {"amount": 1200, "date": "2024-02-03", "category_id": "00000000-0000-0000-0000-000000000002", "kind": "expense"},
                {"amount": 3000, "date": "2024-03-01", "category_id": "00000000-0000-0000-0000-000000000001", "kind": "income", "source": "ACME"},
                {"amount": 1200, "date": "2024-03-03", "category_id": "00000000-0000-0000-0000-000000000002", "kind": "expense"},
                {"amount": 300, "date": "2024-03-10", "category_id": "00000000-0000-0000-0000-000000000003", "kind": "expense", "source": "Market"}
            ],
            "budgets": [
                {"category_id": "00000000-0000-0000-0000-000000000001", "period": "2024-03", "amount": 3500},
                {"category_id": "00000000-0000-0000-0000-000000000002", "period": "2024-03", "amount": 1500},
                {"category_id": "00000000-0000-0000-0000-000000000003", "period": "2024-03", "amount": 200}
            ]
        }
    }
}"#;

struct Fixture {
    dir: TempDir,
    ledger: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("ledger.json");
    std::fs::write(&ledger, LEDGER).unwrap();
    Fixture { dir, ledger }
}

fn insights(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("insights").unwrap();
    cmd.env("BUDGET_INSIGHTS_DIR", config_dir)
        .env_remove("BUDGET_INSIGHTS_LEDGER")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_periods_most_recent_first() {
    let f = fixture();
    insights(f.dir.path())
        .arg("--ledger")
        .arg(&f.ledger)
        .arg("periods")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03  March 2024"))
        .stdout(predicate::str::is_match("2024-03[\\s\\S]*2024-02").unwrap());
}

#[test]
fn test_category_breakdown() {
    let f = fixture();
    insights(f.dir.path())
        .arg("--ledger")
        .arg(&f.ledger)
        .args(["categories", "--kind", "expense", "--period", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense by Category: March 2024"))
        .stdout(predicate::str::contains("$1200.00"))
        .stdout(predicate::str::contains("80.00%"))
        .stdout(predicate::str::contains("20.00%"));
}

#[test]
fn test_summary_text_uses_latest_period() {
    let f = fixture();
    insights(f.dir.path())
        .arg("--ledger")
        .arg(&f.ledger)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: March 2024"))
        .stdout(predicate::str::contains("tip: Cook at home"))
        .stdout(predicate::str::contains("Savings rate:"));
}

#[test]
fn test_summary_json() {
    let f = fixture();
    let output = insights(f.dir.path())
        .arg("--ledger")
        .arg(&f.ledger)
        .args(["--format", "json", "summary", "--period", "2024-03"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["report"], "summary");
    assert_eq!(value["data"]["period"], "2024-03");
    assert_eq!(value["data"]["underBudget"][0]["categoryName"], "Salary");
    assert_eq!(value["data"]["overBudget"][0]["categoryName"], "Food");
    assert_eq!(value["data"]["overBudget"].as_array().unwrap().len(), 1);
}

#[test]
fn test_trend_csv() {
    let f = fixture();
    insights(f.dir.path())
        .arg("--ledger")
        .arg(&f.ledger)
        .args(["-f", "csv", "trend", "--period", "2024-03", "--window", "2"])
        .assert()
        .success()
        .stdout("period,balance,savings_rate\n2024-02,1800.00,60.00\n2024-03,1500.00,50.00\n");
}

#[test]
fn test_trend_period_without_activity() {
    let f = fixture();
    insights(f.dir.path())
        .arg("--ledger")
        .arg(&f.ledger)
        .args(["trend", "--period", "2024-05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not present in the activity history"));
}

#[test]
fn test_register_filtered_by_category() {
    let f = fixture();
    insights(f.dir.path())
        .arg("--ledger")
        .arg(&f.ledger)
        .args(["register", "--kind", "expense", "--category", "food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Market"))
        .stdout(predicate::str::contains("Rent").not());
}

#[test]
fn test_unknown_user() {
    let f = fixture();
    insights(f.dir.path())
        .arg("--ledger")
        .arg(&f.ledger)
        .args(["--user", "bob", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found: bob"));
}

#[test]
fn test_missing_ledger() {
    let f = fixture();
    insights(f.dir.path())
        .arg("--ledger")
        .arg(f.dir.path().join("missing.json"))
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load ledger"));
}

#[test]
fn test_summary_csv_is_rejected() {
    let f = fixture();
    insights(f.dir.path())
        .arg("--ledger")
        .arg(&f.ledger)
        .args(["--format", "csv", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV output is not available"));
}

#[test]
fn test_config_shows_paths() {
    let f = fixture();
    insights(f.dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("budget-insights Configuration"))
        .stdout(predicate::str::contains("ledger.json"))
        .stdout(predicate::str::contains("Trend window:        3"));
}
