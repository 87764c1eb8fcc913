use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("bank-core"));
    cmd.env_remove("RUST_LOG").arg("tests/fixtures/operations.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("id,agreement,number,type,amount"))
        // 100 - 10 transferred - 1.00 commission - 20 transferred
        .stdout(predicate::str::contains("1,1,40817-001,0,69.00"))
        .stdout(predicate::str::contains("2,1,40817-002,1,20"))
        // 10 + 10 received - 5 charged
        .stdout(predicate::str::contains("3,2,40817-003,0,15"));

    Ok(())
}

#[test]
fn test_cli_missing_input_fails() {
    let mut cmd = Command::new(cargo_bin!("bank-core"));
    cmd.arg("tests/fixtures/does_not_exist.csv");

    cmd.assert().failure();
}
