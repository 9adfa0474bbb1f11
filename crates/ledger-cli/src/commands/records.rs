//! Record command implementations

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use ledger_core::db::{Database, SortOrder};
use ledger_core::import::parse_records_csv;
use ledger_core::models::NewFinancialRecord;
use ledger_core::Error;
use tracing::info;

use super::parse_date;

pub fn cmd_add(db: &Database, user_id: i64, date: &str, revenue: f64, expense: f64) -> Result<()> {
    let new = NewFinancialRecord::new(parse_date(date)?, revenue, expense);
    let record = db
        .insert_record(user_id, &new)
        .context("Failed to add record")?;

    println!(
        "✅ Added record #{} for {}: revenue {:.2}, expense {:.2}, profit/loss {:.2}",
        record.id, record.date, record.revenue, record.expense, record.profit_loss
    );
    Ok(())
}

pub fn cmd_update(db: &Database, id: i64, date: &str, revenue: f64, expense: f64) -> Result<()> {
    let new = NewFinancialRecord::new(parse_date(date)?, revenue, expense);
    let record = db
        .update_record(id, &new)
        .with_context(|| format!("Failed to update record #{}", id))?;

    println!(
        "✅ Updated record #{} ({}): profit/loss {:.2}",
        record.id, record.date, record.profit_loss
    );
    Ok(())
}

pub fn cmd_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_record(id)
        .with_context(|| format!("Failed to delete record #{}", id))?;
    println!("🗑️  Deleted record #{}", id);
    Ok(())
}

/// Import a CSV; dates the user already has are skipped, not fatal
pub fn cmd_import(db: &Database, user_id: i64, file: &Path) -> Result<()> {
    println!("📥 Importing {}...", file.display());

    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let records = parse_records_csv(reader).context("Failed to parse CSV")?;

    let mut imported = 0;
    let mut skipped = 0;
    for record in &records {
        match db.insert_record(user_id, record) {
            Ok(_) => imported += 1,
            Err(Error::DuplicateDate { .. }) => skipped += 1,
            Err(e) => return Err(e).context("Failed to store imported record"),
        }
    }

    info!(user_id, imported, skipped, "Import finished");
    println!("   Imported: {}", imported);
    if skipped > 0 {
        println!("   Skipped (date already recorded): {}", skipped);
    }
    println!("✅ Import complete!");
    Ok(())
}

pub fn cmd_list(db: &Database, user_id: i64, oldest_first: bool) -> Result<()> {
    let order = if oldest_first {
        SortOrder::OldestFirst
    } else {
        SortOrder::NewestFirst
    };
    let records = db.list_records(user_id, order)?;

    if records.is_empty() {
        println!("No records for user {}.", user_id);
        return Ok(());
    }

    println!();
    println!(
        "   {:>6} │ {:10} │ {:>12} │ {:>12} │ {:>12}",
        "ID", "Date", "Revenue", "Expense", "Profit/Loss"
    );
    println!("   ───────┼────────────┼──────────────┼──────────────┼──────────────");
    for r in &records {
        println!(
            "   {:>6} │ {:10} │ {:>12.2} │ {:>12.2} │ {:>12.2}",
            r.id, r.date, r.revenue, r.expense, r.profit_loss
        );
    }
    println!();
    println!("   {} record(s)", records.len());
    Ok(())
}
