//! Ledger Core Library
//!
//! Shared functionality for the profit/loss ledger:
//! - Database access and migrations for per-user financial records
//! - CSV import of daily revenue/expense rows
//! - Profit/loss aggregation into daily, monthly and yearly rollups
//! - Clock and record-source seams for the report service

pub mod clock;
pub mod db;
pub mod error;
pub mod import;
pub mod models;
pub mod report;
pub mod source;

pub use clock::{Clock, FixedClock, SystemClock};
pub use db::{Database, SortOrder};
pub use error::{Error, Result};
pub use models::{
    FinancialRecord, Insights, MonthlyStat, NewFinancialRecord, PeriodTotals, ProfitLossReport,
    StatsResponse,
};
pub use report::aggregate;
pub use source::{RecordSource, ReportService};
