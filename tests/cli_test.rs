use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

fn payreg(data_path: &std::path::Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("payreg"));
    cmd.arg("--data-path").arg(data_path);
    cmd
}

#[test]
fn test_create_pay_list_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("payments.json");

    payreg(&path)
        .args(["create", "p1", "--amount", "100", "--method", "paypal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"REGISTERED\""));

    payreg(&path)
        .args(["pay", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"PAID\""));

    payreg(&path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"p1\""))
        .stdout(predicate::str::contains("\"PAYPAL\""));
}

#[test]
fn test_create_with_invalid_method_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("payments.json");

    payreg(&path)
        .args(["create", "p1", "--amount", "100", "--method", "cash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid payment method"));

    // Nothing was persisted.
    payreg(&path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("{}"));
}

#[test]
fn test_pay_on_missing_id_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("payments.json");

    payreg(&path)
        .args(["pay", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_failed_payment_can_be_reverted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("payments.json");

    payreg(&path)
        .args(["create", "p1", "--amount", "5000", "--method", "paypal"])
        .assert()
        .success();

    payreg(&path)
        .args(["pay", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"FAILED\""));

    payreg(&path)
        .args(["revert", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"REGISTERED\""));
}
