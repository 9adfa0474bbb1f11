//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ledger - per-user profit/loss records and reports
#[derive(Parser)]
#[command(name = "ledger")]
#[command(about = "Business profit/loss ledger and reporting", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, env = "LEDGER_DB", default_value = "ledger.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record one day's revenue and expense for a user
    Add {
        /// Owning user ID
        #[arg(short, long)]
        user: i64,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        revenue: f64,

        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        expense: f64,
    },

    /// Replace a record's date and amounts
    Update {
        /// Record ID
        #[arg(long)]
        id: i64,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        revenue: f64,

        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        expense: f64,
    },

    /// Delete a record
    Delete {
        /// Record ID
        #[arg(long)]
        id: i64,
    },

    /// Import records from a `date,revenue,expense` CSV
    Import {
        /// Owning user ID
        #[arg(short, long)]
        user: i64,

        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List a user's records (newest first)
    List {
        /// Owning user ID
        #[arg(short, long)]
        user: i64,

        /// List oldest first instead
        #[arg(long)]
        oldest_first: bool,
    },

    /// Daily, monthly and yearly profit/loss report
    Report {
        /// Owning user ID
        #[arg(short, long)]
        user: i64,

        /// Report as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<String>,

        /// Print the stats JSON instead of tables
        #[arg(long)]
        json: bool,
    },
}
