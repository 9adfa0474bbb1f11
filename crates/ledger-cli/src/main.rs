//! Ledger CLI - per-user profit/loss records and reports
//!
//! Usage:
//!   ledger init                              Initialize database
//!   ledger add --user 1 --date 2024-03-01 ...  Record a day
//!   ledger import --user 1 --file CSV        Import records
//!   ledger report --user 1 [--json]          Profit/loss report

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            user,
            date,
            revenue,
            expense,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(&db, user, &date, revenue, expense)
        }
        Commands::Update {
            id,
            date,
            revenue,
            expense,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_update(&db, id, &date, revenue, expense)
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_delete(&db, id)
        }
        Commands::Import { user, file } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_import(&db, user, &file)
        }
        Commands::List { user, oldest_first } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_list(&db, user, oldest_first)
        }
        Commands::Report { user, as_of, json } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_report(&db, user, as_of.as_deref(), json)
        }
    }
}
