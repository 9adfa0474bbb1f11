//! Data models for the ledger

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of ledger data for a user, as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub id: i64,
    pub user_id: i64,
    /// Calendar date as stored, `YYYY-MM-DD`
    pub date: String,
    pub revenue: f64,
    pub expense: f64,
    /// `revenue - expense`, computed when the record is written
    #[serde(rename = "profitloss")]
    pub profit_loss: f64,
}

/// A record to be inserted or used as replacement values (before DB write)
#[derive(Debug, Clone, PartialEq)]
pub struct NewFinancialRecord {
    pub date: NaiveDate,
    pub revenue: f64,
    pub expense: f64,
}

impl NewFinancialRecord {
    pub fn new(date: NaiveDate, revenue: f64, expense: f64) -> Self {
        Self {
            date,
            revenue,
            expense,
        }
    }

    pub fn profit_loss(&self) -> f64 {
        self.revenue - self.expense
    }
}

/// Summed revenue/expense/profit for one calendar period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub revenue: f64,
    pub expense: f64,
    #[serde(rename = "profitloss")]
    pub profit_loss: f64,
}

impl PeriodTotals {
    /// Add a record's amounts; profit/loss is taken as stored, not recomputed
    pub fn add(&mut self, record: &FinancialRecord) {
        self.revenue += record.revenue;
        self.expense += record.expense;
        self.profit_loss += record.profit_loss;
    }

    /// A period counts as active when any of its sums is nonzero
    pub fn is_active(&self) -> bool {
        self.revenue != 0.0 || self.expense != 0.0 || self.profit_loss != 0.0
    }

    /// Profit margin as a percentage, 0 when revenue is not positive
    pub fn margin(&self) -> f64 {
        if self.revenue > 0.0 {
            (self.profit_loss / self.revenue) * 100.0
        } else {
            0.0
        }
    }
}

/// One month of the current year's rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStat {
    /// Month label, e.g. "March 2024"
    pub month: String,
    pub revenue: f64,
    pub expense: f64,
    #[serde(rename = "profitloss")]
    pub profit_loss: f64,
    #[serde(rename = "profitMargin")]
    pub profit_margin: f64,
}

/// Scalar aggregates across the report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// Average over active days of the current month
    pub avg_revenue: f64,
    pub avg_expense: f64,
    pub avg_profit: f64,
    /// Extremes across every record
    pub max_revenue: f64,
    pub min_revenue: f64,
    pub max_expense: f64,
    pub min_expense: f64,
    pub max_profit: f64,
    pub min_profit: f64,
}

/// Aggregated profit/loss report for one user at one reference time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitLossReport {
    /// Input records, in the order received
    pub records: Vec<FinancialRecord>,
    /// Every day of the current month, zero-filled
    pub daily: BTreeMap<NaiveDate, PeriodTotals>,
    /// January through December of the current year
    pub monthly: Vec<MonthlyStat>,
    /// Every year present in the data
    pub yearly: BTreeMap<i32, PeriodTotals>,
    pub insights: Insights,
}

impl ProfitLossReport {
    pub fn yearly_margin(&self, year: i32) -> f64 {
        self.yearly.get(&year).map(PeriodTotals::margin).unwrap_or(0.0)
    }
}

/// JSON shape served to existing stats clients
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub data: Vec<FinancialRecord>,
    #[serde(rename = "dailyRevenue")]
    pub daily_revenue: BTreeMap<String, f64>,
    #[serde(rename = "dailyExpense")]
    pub daily_expense: BTreeMap<String, f64>,
    #[serde(rename = "dailyProfitloss")]
    pub daily_profitloss: BTreeMap<String, f64>,
    #[serde(rename = "monthlyStats")]
    pub monthly_stats: Vec<MonthlyStat>,
    #[serde(rename = "yearlyRevenue")]
    pub yearly_revenue: BTreeMap<String, f64>,
    #[serde(rename = "yearlyExpense")]
    pub yearly_expense: BTreeMap<String, f64>,
    #[serde(rename = "yearlyProfitloss")]
    pub yearly_profitloss: BTreeMap<String, f64>,
    #[serde(rename = "yearlyProfitMargin")]
    pub yearly_profit_margin: BTreeMap<String, f64>,
    #[serde(flatten)]
    pub insights: Insights,
}

impl From<&ProfitLossReport> for StatsResponse {
    fn from(report: &ProfitLossReport) -> Self {
        let mut daily_revenue = BTreeMap::new();
        let mut daily_expense = BTreeMap::new();
        let mut daily_profitloss = BTreeMap::new();
        for (day, totals) in &report.daily {
            let key = day.format("%Y-%m-%d").to_string();
            daily_revenue.insert(key.clone(), totals.revenue);
            daily_expense.insert(key.clone(), totals.expense);
            daily_profitloss.insert(key, totals.profit_loss);
        }

        let mut yearly_revenue = BTreeMap::new();
        let mut yearly_expense = BTreeMap::new();
        let mut yearly_profitloss = BTreeMap::new();
        let mut yearly_profit_margin = BTreeMap::new();
        for (year, totals) in &report.yearly {
            let key = format!("{:04}", year);
            yearly_revenue.insert(key.clone(), totals.revenue);
            yearly_expense.insert(key.clone(), totals.expense);
            yearly_profitloss.insert(key.clone(), totals.profit_loss);
            yearly_profit_margin.insert(key, totals.margin());
        }

        Self {
            data: report.records.clone(),
            daily_revenue,
            daily_expense,
            daily_profitloss,
            monthly_stats: report.monthly.clone(),
            yearly_revenue,
            yearly_expense,
            yearly_profitloss,
            yearly_profit_margin,
            insights: report.insights,
        }
    }
}
