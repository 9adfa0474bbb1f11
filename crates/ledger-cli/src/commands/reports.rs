//! Report command implementations

use anyhow::{Context, Result};
use ledger_core::clock::{Clock, FixedClock, SystemClock};
use ledger_core::db::Database;
use ledger_core::models::{ProfitLossReport, StatsResponse};
use ledger_core::source::ReportService;

use super::parse_date;

/// Build a user's report, pinned to `as_of` when given
pub fn build_report(db: &Database, user_id: i64, as_of: Option<&str>) -> Result<ProfitLossReport> {
    let clock: Box<dyn Clock> = match as_of {
        Some(date) => Box::new(FixedClock::local_midnight(parse_date(date)?)?),
        None => Box::new(SystemClock),
    };

    ReportService::new(db, clock)
        .report_for_user(user_id)
        .with_context(|| format!("Failed to build report for user {}", user_id))
}

pub fn cmd_report(db: &Database, user_id: i64, as_of: Option<&str>, json: bool) -> Result<()> {
    let report = build_report(db, user_id, as_of)?;

    if json {
        let stats = StatsResponse::from(&report);
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &ProfitLossReport) {
    println!();
    println!("📊 Profit/Loss Report");
    if let (Some(first), Some(last)) = (report.daily.keys().next(), report.daily.keys().last()) {
        println!("   Current month: {} to {}", first, last);
    }
    println!("   Records: {}", report.records.len());
    println!("   ─────────────────────────────────────────────────────────────");

    let active: Vec<_> = report
        .daily
        .iter()
        .filter(|(_, totals)| totals.is_active())
        .collect();
    if active.is_empty() {
        println!("   No activity this month.");
    } else {
        println!(
            "   {:10} │ {:>12} │ {:>12} │ {:>12}",
            "Day", "Revenue", "Expense", "Profit/Loss"
        );
        println!("   ───────────┼──────────────┼──────────────┼──────────────");
        for (day, totals) in active {
            println!(
                "   {:10} │ {:>12.2} │ {:>12.2} │ {:>12.2}",
                day.format("%Y-%m-%d").to_string(),
                totals.revenue,
                totals.expense,
                totals.profit_loss
            );
        }
    }

    println!();
    println!(
        "   {:15} │ {:>12} │ {:>12} │ {:>12} │ {:>8}",
        "Month", "Revenue", "Expense", "Profit/Loss", "Margin"
    );
    println!("   ────────────────┼──────────────┼──────────────┼──────────────┼─────────");
    for month in &report.monthly {
        println!(
            "   {:15} │ {:>12.2} │ {:>12.2} │ {:>12.2} │ {:>7.1}%",
            month.month, month.revenue, month.expense, month.profit_loss, month.profit_margin
        );
    }

    if !report.yearly.is_empty() {
        println!();
        println!(
            "   {:6} │ {:>12} │ {:>12} │ {:>12} │ {:>8}",
            "Year", "Revenue", "Expense", "Profit/Loss", "Margin"
        );
        println!("   ───────┼──────────────┼──────────────┼──────────────┼─────────");
        for (year, totals) in &report.yearly {
            println!(
                "   {:6} │ {:>12.2} │ {:>12.2} │ {:>12.2} │ {:>7.1}%",
                year,
                totals.revenue,
                totals.expense,
                totals.profit_loss,
                totals.margin()
            );
        }
    }

    let i = &report.insights;
    println!();
    println!("   Daily average (active days this month)");
    println!(
        "     revenue {:.2}   expense {:.2}   profit {:.2}",
        i.avg_revenue, i.avg_expense, i.avg_profit
    );
    println!("   Extremes (all records)");
    println!("     revenue  max {:.2}  min {:.2}", i.max_revenue, i.min_revenue);
    println!("     expense  max {:.2}  min {:.2}", i.max_expense, i.min_expense);
    println!("     profit   max {:.2}  min {:.2}", i.max_profit, i.min_profit);
}
