//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use clap::Parser;
use ledger_core::db::{Database, SortOrder};

use crate::cli::{Cli, Commands};
use crate::commands;

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

// ========== Record Command Tests ==========

#[test]
fn test_cmd_add() {
    let db = setup_test_db();
    commands::cmd_add(&db, 1, "2024-03-01", 500.0, 200.0).unwrap();

    let records = db.list_records(1, SortOrder::NewestFirst).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].profit_loss, 300.0);
}

#[test]
fn test_cmd_add_rejects_bad_date() {
    let db = setup_test_db();
    assert!(commands::cmd_add(&db, 1, "03/01/2024", 1.0, 0.0).is_err());
    assert_eq!(db.count_records(1).unwrap(), 0);
}

#[test]
fn test_cmd_add_duplicate_date_fails() {
    let db = setup_test_db();
    commands::cmd_add(&db, 1, "2024-03-01", 1.0, 0.0).unwrap();
    assert!(commands::cmd_add(&db, 1, "2024-03-01", 2.0, 0.0).is_err());
}

#[test]
fn test_cmd_update_and_delete() {
    let db = setup_test_db();
    commands::cmd_add(&db, 1, "2024-03-01", 1.0, 0.0).unwrap();
    let id = db.list_records(1, SortOrder::NewestFirst).unwrap()[0].id;

    commands::cmd_update(&db, id, "2024-03-04", 10.0, 25.0).unwrap();
    let record = db.get_record(id).unwrap().unwrap();
    assert_eq!(record.date, "2024-03-04");
    assert_eq!(record.profit_loss, -15.0);

    commands::cmd_delete(&db, id).unwrap();
    assert!(db.get_record(id).unwrap().is_none());
    assert!(commands::cmd_delete(&db, id).is_err());
}

#[test]
fn test_cmd_import_skips_recorded_dates() {
    let db = setup_test_db();
    commands::cmd_add(&db, 1, "2024-03-01", 1.0, 0.0).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "date,revenue,expense").unwrap();
    writeln!(file, "2024-03-01,500,200").unwrap();
    writeln!(file, "2024-03-02,100,150").unwrap();
    file.flush().unwrap();

    commands::cmd_import(&db, 1, file.path()).unwrap();

    let records = db.list_records(1, SortOrder::OldestFirst).unwrap();
    assert_eq!(records.len(), 2);
    // The existing record is kept as-is
    assert_eq!(records[0].revenue, 1.0);
    assert_eq!(records[1].profit_loss, -50.0);
}

#[test]
fn test_cmd_import_missing_file() {
    let db = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    assert!(commands::cmd_import(&db, 1, &dir.path().join("nope.csv")).is_err());
}

#[test]
fn test_cmd_list() {
    let db = setup_test_db();
    assert!(commands::cmd_list(&db, 1, false).is_ok());
    commands::cmd_add(&db, 1, "2024-03-01", 1.0, 0.0).unwrap();
    assert!(commands::cmd_list(&db, 1, true).is_ok());
}

// ========== Report Command Tests ==========

#[test]
fn test_build_report_as_of() {
    let db = setup_test_db();
    commands::cmd_add(&db, 1, "2024-03-01", 500.0, 200.0).unwrap();
    commands::cmd_add(&db, 1, "2024-03-15", 100.0, 150.0).unwrap();

    let report = commands::build_report(&db, 1, Some("2024-03-20")).unwrap();
    assert_eq!(report.daily.len(), 31);
    assert_eq!(report.monthly[2].revenue, 600.0);
    assert_eq!(report.insights.avg_revenue, 300.0);

    let report = commands::build_report(&db, 1, Some("2024-04-02")).unwrap();
    assert_eq!(report.daily.len(), 30);
    assert_eq!(report.insights.avg_revenue, 0.0);
}

#[test]
fn test_build_report_system_clock() {
    let db = setup_test_db();
    let report = commands::build_report(&db, 1, None).unwrap();
    assert_eq!(report.monthly.len(), 12);
    assert!((28..=31).contains(&report.daily.len()));
}

#[test]
fn test_cmd_report_outputs() {
    let db = setup_test_db();
    commands::cmd_add(&db, 1, "2024-03-01", 500.0, 200.0).unwrap();
    assert!(commands::cmd_report(&db, 1, Some("2024-03-20"), false).is_ok());
    assert!(commands::cmd_report(&db, 1, Some("2024-03-20"), true).is_ok());
    assert!(commands::cmd_report(&db, 2, Some("2024-03-20"), false).is_ok());
}

#[test]
fn test_cmd_report_bad_as_of() {
    let db = setup_test_db();
    assert!(commands::cmd_report(&db, 1, Some("20-03-2024"), true).is_err());
}

// ========== Core Command Tests ==========

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    commands::cmd_init(&path).unwrap();
    assert!(path.exists());

    let db = commands::open_db(&path).unwrap();
    assert_eq!(db.count_records(1).unwrap(), 0);
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_add_with_negative_amount() {
    let cli = Cli::try_parse_from([
        "ledger", "add", "--user", "3", "--date", "2024-03-01", "--revenue", "-20", "--expense",
        "5",
    ])
    .unwrap();
    match cli.command {
        Commands::Add {
            user,
            date,
            revenue,
            expense,
        } => {
            assert_eq!(user, 3);
            assert_eq!(date, "2024-03-01");
            assert_eq!(revenue, -20.0);
            assert_eq!(expense, 5.0);
        }
        _ => panic!("expected add command"),
    }
}

#[test]
fn test_parse_report_flags() {
    let cli =
        Cli::try_parse_from(["ledger", "--db", "x.db", "report", "-u", "1", "--json"]).unwrap();
    assert_eq!(cli.db.to_str(), Some("x.db"));
    match cli.command {
        Commands::Report { user, as_of, json } => {
            assert_eq!(user, 1);
            assert!(as_of.is_none());
            assert!(json);
        }
        _ => panic!("expected report command"),
    }
}
