//! Profit/loss record operations

use rusqlite::{params, OptionalExtension, Row};
use tracing::{info, warn};

use super::{Database, DbConn};
use crate::error::{Error, Result};
use crate::models::{FinancialRecord, NewFinancialRecord};
use crate::source::RecordSource;

/// Ordering for record listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending by date, as the report expects
    OldestFirst,
    /// Descending by date, as the record list is shown
    #[default]
    NewestFirst,
}

impl SortOrder {
    fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::OldestFirst => "ORDER BY date ASC, id ASC",
            SortOrder::NewestFirst => "ORDER BY date DESC, id DESC",
        }
    }
}

const RECORD_COLUMNS: &str = "id, user_id, date, revenue, expense, profitloss";

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<FinancialRecord> {
    Ok(FinancialRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        date: row.get(2)?,
        revenue: row.get(3)?,
        expense: row.get(4)?,
        profit_loss: row.get(5)?,
    })
}

/// Whether another record of `user_id` already sits on `date`
fn date_taken(conn: &DbConn, user_id: i64, date: &str, except_id: Option<i64>) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM profit_losses WHERE user_id = ?1 AND date = ?2 AND id != ?3",
        params![user_id, date, except_id.unwrap_or(0)],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

impl Database {
    /// Insert a record for `user_id`; one record per user per date
    pub fn insert_record(&self, user_id: i64, new: &NewFinancialRecord) -> Result<FinancialRecord> {
        let conn = self.conn()?;
        let date = new.date.format("%Y-%m-%d").to_string();

        if date_taken(&conn, user_id, &date, None)? {
            warn!(user_id, %date, "Rejected duplicate record date");
            return Err(Error::DuplicateDate { user_id, date });
        }

        let profit_loss = new.profit_loss();
        conn.execute(
            "INSERT INTO profit_losses (user_id, date, revenue, expense, profitloss) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id, date, new.revenue, new.expense, profit_loss],
        )?;

        Ok(FinancialRecord {
            id: conn.last_insert_rowid(),
            user_id,
            date,
            revenue: new.revenue,
            expense: new.expense,
            profit_loss,
        })
    }

    /// Replace a record's date and amounts, recomputing profit/loss
    pub fn update_record(&self, id: i64, new: &NewFinancialRecord) -> Result<FinancialRecord> {
        let conn = self.conn()?;
        let user_id: i64 = conn
            .query_row(
                "SELECT user_id FROM profit_losses WHERE id = ?",
                params![id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("record {}", id)))?;

        let date = new.date.format("%Y-%m-%d").to_string();
        if date_taken(&conn, user_id, &date, Some(id))? {
            warn!(user_id, %date, id, "Rejected update onto an existing record date");
            return Err(Error::DuplicateDate { user_id, date });
        }

        let profit_loss = new.profit_loss();
        conn.execute(
            "UPDATE profit_losses SET date = ?1, revenue = ?2, expense = ?3, profitloss = ?4 WHERE id = ?5",
            params![date, new.revenue, new.expense, profit_loss, id],
        )?;

        Ok(FinancialRecord {
            id,
            user_id,
            date,
            revenue: new.revenue,
            expense: new.expense,
            profit_loss,
        })
    }

    /// Delete a record by ID
    pub fn delete_record(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM profit_losses WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("record {}", id)));
        }
        info!(id, "Deleted record");
        Ok(())
    }

    /// Get a record by ID
    pub fn get_record(&self, id: i64) -> Result<Option<FinancialRecord>> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                &format!("SELECT {} FROM profit_losses WHERE id = ?", RECORD_COLUMNS),
                params![id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// List a user's records
    pub fn list_records(&self, user_id: i64, order: SortOrder) -> Result<Vec<FinancialRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM profit_losses WHERE user_id = ? {}",
            RECORD_COLUMNS,
            order.as_sql()
        ))?;

        let records = stmt
            .query_map(params![user_id], row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Count a user's records
    pub fn count_records(&self, user_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM profit_losses WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl RecordSource for Database {
    fn fetch_records_for_user(&self, user_id: i64) -> Result<Vec<FinancialRecord>> {
        self.list_records(user_id, SortOrder::OldestFirst)
    }
}
