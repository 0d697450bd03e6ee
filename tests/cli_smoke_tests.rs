mod common;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

const BIN_NAME: &str = "cashflow_cli";

fn cli() -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("CASHFLOW_HOME", common::cashflow_home())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    cli()
        .arg("help")
        .assert()
        .success()
        .stdout(contains("summary").and(contains("portfolio")));
}

#[test]
fn version_prints_build_info() {
    cli()
        .arg("version")
        .assert()
        .success()
        .stdout(contains("cashflow_cli"));
}

#[test]
fn unknown_command_suggests_closest() {
    cli()
        .arg("portfolo")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error: Unknown command `portfolo`.").and(contains("`portfolio`")));
}

#[test]
fn portfolio_prints_shares() {
    let snapshot = common::write_snapshot(common::SNAPSHOT);
    cli()
        .args(["portfolio", "--plain"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(
            contains("Total balance: €2,000.00")
                .and(contains("75.0%"))
                .and(contains("25.0%"))
                .and(contains("Recurring movements: 1")),
        );
}

#[test]
fn summary_for_selected_account() {
    let snapshot = common::write_snapshot(common::SNAPSHOT);
    cli()
        .arg("summary")
        .arg(&snapshot)
        .args(["--account", common::EVERYDAY_ID, "--now", "2024-06-01T00:00:00Z", "--plain"])
        .assert()
        .success()
        .stdout(
            contains("=== Everyday (Bank) ===")
                .and(contains("Balance: €1,500.00"))
                .and(contains("Jun 15, 2024"))
                .and(contains("-€50.00")),
        );
}

#[test]
fn summary_defaults_to_first_account() {
    let snapshot = common::write_snapshot(common::SNAPSHOT);
    cli()
        .arg("summary")
        .arg(&snapshot)
        .args(["--now", "2024-06-01", "--plain"])
        .assert()
        .success()
        .stdout(contains("=== Wallet (Cash) ===").and(contains("Nothing scheduled.")));
}

#[test]
fn summary_rejects_unknown_account() {
    let snapshot = common::write_snapshot(common::SNAPSHOT);
    cli()
        .arg("summary")
        .arg(&snapshot)
        .args(["--account", "00000000-0000-0000-0000-000000000000"])
        .assert()
        .failure()
        .stderr(contains("Account not found"));
}

#[test]
fn malformed_snapshot_is_reported() {
    let snapshot = common::write_snapshot("{ not json");
    cli()
        .arg("portfolio")
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(contains("is not a valid account list"));
}

#[test]
fn config_file_settings_apply() {
    let home = common::cashflow_home();
    std::fs::create_dir_all(home.join("config")).expect("config dir");
    std::fs::write(
        home.join("config").join("config.json"),
        r#"{ "currency": "USD", "ui_color_enabled": false }"#,
    )
    .expect("write config");
    let snapshot = common::write_snapshot(common::SNAPSHOT);
    Command::cargo_bin(BIN_NAME)
        .expect("binary exists")
        .env("CASHFLOW_HOME", &home)
        .arg("portfolio")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(contains("Total balance: $2,000.00"));
}
