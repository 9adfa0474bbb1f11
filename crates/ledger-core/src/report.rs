//! Profit/loss aggregation
//!
//! Buckets a user's records by day (current month only), month (current
//! year only) and year (all years), fills calendar gaps with zero buckets,
//! and derives margins, active-day averages and extremes.
//!
//! The reference time is passed in by the caller; nothing here reads the
//! wall clock, so a report is a pure function of `(records, now)`.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{FinancialRecord, Insights, MonthlyStat, PeriodTotals, ProfitLossReport};

/// Seed for the running minimums; also reported for empty input
pub const MIN_SENTINEL: f64 = 999_999.0;

/// Seed for the running maximums
pub const MAX_SEED: f64 = 0.0;

/// Parse a stored record date, accepting only zero-padded `YYYY-MM-DD`
pub fn parse_record_date(s: &str) -> Result<NaiveDate> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(Error::InvalidDateFormat(s.to_string()));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| Error::InvalidDateFormat(s.to_string()))
}

/// First and last calendar day of a month
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidData(format!("no such month: {}-{:02}", year, month)))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| Error::InvalidData(format!("month out of range: {}-{:02}", year, month)))?;
    Ok((first, last))
}

/// Running max/min over every record seen.
///
/// Maximums start at 0 and minimums at [`MIN_SENTINEL`], matching what
/// existing stats clients have always been served.
struct Extremes {
    max_revenue: f64,
    min_revenue: f64,
    max_expense: f64,
    min_expense: f64,
    max_profit: f64,
    min_profit: f64,
}

impl Extremes {
    fn new() -> Self {
        Self {
            max_revenue: MAX_SEED,
            min_revenue: MIN_SENTINEL,
            max_expense: MAX_SEED,
            min_expense: MIN_SENTINEL,
            max_profit: MAX_SEED,
            min_profit: MIN_SENTINEL,
        }
    }

    /// Values reported when there are no records at all
    fn empty() -> Self {
        Self {
            min_expense: 0.0,
            ..Self::new()
        }
    }

    fn observe(&mut self, record: &FinancialRecord) {
        self.max_revenue = self.max_revenue.max(record.revenue);
        self.min_revenue = self.min_revenue.min(record.revenue);
        self.max_expense = self.max_expense.max(record.expense);
        self.min_expense = self.min_expense.min(record.expense);
        self.max_profit = self.max_profit.max(record.profit_loss);
        self.min_profit = self.min_profit.min(record.profit_loss);
    }
}

/// Build the profit/loss report for `records` as seen at `now`.
///
/// The current month and year come from `now` in its own time zone. Any
/// record whose date is not strict `YYYY-MM-DD` aborts the whole report
/// with [`Error::InvalidDateFormat`].
pub fn aggregate<Tz: TimeZone>(
    records: &[FinancialRecord],
    now: &DateTime<Tz>,
) -> Result<ProfitLossReport> {
    let today = now.date_naive();
    let current_year = today.year();
    let (first_day, last_day) = month_bounds(current_year, today.month())?;

    let mut daily: BTreeMap<NaiveDate, PeriodTotals> = BTreeMap::new();
    let mut monthly = [PeriodTotals::default(); 12];
    let mut yearly: BTreeMap<i32, PeriodTotals> = BTreeMap::new();
    let mut extremes = Extremes::new();

    for record in records {
        let date = parse_record_date(&record.date)?;

        if date >= first_day && date <= last_day {
            daily.entry(date).or_default().add(record);
        }
        if date.year() == current_year {
            monthly[date.month0() as usize].add(record);
        }
        yearly.entry(date.year()).or_default().add(record);

        extremes.observe(record);
    }

    for day in first_day.iter_days().take_while(|d| *d <= last_day) {
        daily.entry(day).or_default();
    }

    let mut monthly_stats = Vec::with_capacity(12);
    for (month0, totals) in monthly.iter().enumerate() {
        let (month_start, _) = month_bounds(current_year, month0 as u32 + 1)?;
        monthly_stats.push(MonthlyStat {
            month: month_start.format("%B %Y").to_string(),
            revenue: totals.revenue,
            expense: totals.expense,
            profit_loss: totals.profit_loss,
            profit_margin: totals.margin(),
        });
    }

    let mut sum = PeriodTotals::default();
    let mut active_days = 0usize;
    for totals in daily.values().filter(|t| t.is_active()) {
        sum.revenue += totals.revenue;
        sum.expense += totals.expense;
        sum.profit_loss += totals.profit_loss;
        active_days += 1;
    }
    let average = |total: f64| {
        if active_days > 0 {
            total / active_days as f64
        } else {
            0.0
        }
    };

    if records.is_empty() {
        extremes = Extremes::empty();
    }

    debug!(
        records = records.len(),
        active_days,
        years = yearly.len(),
        month = %first_day.format("%Y-%m"),
        "Aggregated profit/loss report"
    );

    Ok(ProfitLossReport {
        records: records.to_vec(),
        daily,
        monthly: monthly_stats,
        yearly,
        insights: Insights {
            avg_revenue: average(sum.revenue),
            avg_expense: average(sum.expense),
            avg_profit: average(sum.profit_loss),
            max_revenue: extremes.max_revenue,
            min_revenue: extremes.min_revenue,
            max_expense: extremes.max_expense,
            min_expense: extremes.min_expense,
            max_profit: extremes.max_profit,
            min_profit: extremes.min_profit,
        },
    })
}
