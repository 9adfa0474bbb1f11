//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `parse_date` - Strict YYYY-MM-DD argument parsing
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ledger_core::db::Database;
use ledger_core::report::parse_record_date;

pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    Database::new(path_str).context("Failed to open database")
}

/// Parse a date argument with the same rules as stored record dates
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    parse_record_date(s).with_context(|| format!("Invalid date {:?} (use YYYY-MM-DD)", s))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Import records: ledger import --user 1 --file records.csv");
    println!("  2. View the report: ledger report --user 1");

    Ok(())
}
