use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tally(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_DATA_DIR", dir.path()).env_remove("TALLY_LOG");
    cmd
}

#[test]
fn test_init_creates_budget() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["init", "--income", "4000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    tally(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));

    tally(&dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food & Drink"))
        .stdout(predicate::str::contains("$600.00"));
}

#[test]
fn test_voice_preview_does_not_save() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["voice", "I", "spent", "15", "dollars", "at", "Starbucks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merchant:    Starbucks"))
        .stdout(predicate::str::contains("Amount:      $15.00"))
        .stdout(predicate::str::contains("--save"));

    tally(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Starbucks").not());
}

#[test]
fn test_voice_save_then_list_and_overview() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["voice", "25 bucks on lunch", "--save", "--date", "2025-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved transaction txn-"));

    tally(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"));

    tally(&dir)
        .args(["budget", "overview", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget for January 2025"))
        .stdout(predicate::str::contains("$25.00"));
}

#[test]
fn test_scan_from_stdin() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .arg("scan")
        .write_stdin("STARBUCKS STORE #123\n01/15/2025\nLatte $4.95\nTOTAL $5.45\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merchant:    Starbucks"))
        .stdout(predicate::str::contains("Amount:      $5.45"))
        .stdout(predicate::str::contains("Category:    Food & Drink"));
}

#[test]
fn test_scan_without_amount_fails() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .arg("scan")
        .write_stdin("THANK YOU FOR SHOPPING\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find amount on receipt"));
}

#[test]
fn test_voice_without_amount_fails() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["voice", "bought", "a", "coffee"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not understand amount"));
}

#[test]
fn test_budget_set_and_insight() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["budget", "insight", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No spending tracked yet this month"));

    tally(&dir)
        .args(["budget", "set", "food", "750"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$750.00"));

    tally(&dir)
        .args(["budget", "set", "nonsense", "10"])
        .assert()
        .failure();
}

#[test]
fn test_recurring_process() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["recurring", "add", "Netflix", "15.99", "--start", "2025-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created recurring rec-"));

    tally(&dir)
        .args(["recurring", "process", "--date", "2025-01-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 1 transaction(s)"));

    // Next occurrence is February
    tally(&dir)
        .args(["recurring", "process", "--date", "2025-01-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing due."));
}

#[test]
fn test_export_csv_to_stdout() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["txn", "add", "Shell", "40", "--category", "transport", "--date", "2025-02-03"])
        .assert()
        .success();

    tally(&dir)
        .args(["export", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Date,Merchant,Amount,Type,Category"))
        .stdout(predicate::str::contains("2025-02-03,Shell"));
}

#[test]
fn test_history_lists_changes() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes recorded yet."));

    tally(&dir)
        .args(["txn", "add", "Target", "12.50"])
        .assert()
        .success();

    tally(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Transaction"))
        .stdout(predicate::str::contains("Target)"));
}

#[test]
fn test_goal_lifecycle() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["goal", "add", "Vacation", "1200", "--current", "300", "--monthly", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created goal goal-"));

    tally(&dir)
        .args(["goal", "contribute", "vacation", "-100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vacation: $200.00 of $1200.00 (16%)"));

    tally(&dir)
        .args(["goal", "contribute", "Vacation", "1500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Target reached!"));

    tally(&dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100%"))
        .stdout(predicate::str::contains("done"));

    tally(&dir)
        .args(["goal", "delete", "Vacation"])
        .assert()
        .success();

    tally(&dir)
        .args(["history", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DELETE Goal"));
}

#[test]
fn test_report_rejects_far_year() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["report", "spending", "--month", "300000-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("300000"));
}
