//! Record source seam and the report service built on it

use tracing::info;

use crate::clock::Clock;
use crate::error::Result;
use crate::models::{FinancialRecord, ProfitLossReport};
use crate::report::aggregate;

/// Supplies one user's financial records
pub trait RecordSource {
    /// Records for `user_id`, oldest first. A user with no records gets an
    /// empty vector rather than an error.
    fn fetch_records_for_user(&self, user_id: i64) -> Result<Vec<FinancialRecord>>;
}

impl<S: RecordSource + ?Sized> RecordSource for &S {
    fn fetch_records_for_user(&self, user_id: i64) -> Result<Vec<FinancialRecord>> {
        (**self).fetch_records_for_user(user_id)
    }
}

/// Builds per-user reports from an injected record source and clock
pub struct ReportService<S, C> {
    source: S,
    clock: C,
}

impl<S: RecordSource, C: Clock> ReportService<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        Self { source, clock }
    }

    pub fn report_for_user(&self, user_id: i64) -> Result<ProfitLossReport> {
        let records = self.source.fetch_records_for_user(user_id)?;
        let now = self.clock.now();
        info!(user_id, records = records.len(), as_of = %now, "Building profit/loss report");
        aggregate(&records, &now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::Error;
    use chrono::{FixedOffset, TimeZone};
    use std::collections::HashMap;

    struct MemorySource(HashMap<i64, Vec<FinancialRecord>>);

    impl RecordSource for MemorySource {
        fn fetch_records_for_user(&self, user_id: i64) -> Result<Vec<FinancialRecord>> {
            Ok(self.0.get(&user_id).cloned().unwrap_or_default())
        }
    }

    fn record(user_id: i64, date: &str, revenue: f64) -> FinancialRecord {
        FinancialRecord {
            id: 0,
            user_id,
            date: date.to_string(),
            revenue,
            expense: 0.0,
            profit_loss: revenue,
        }
    }

    fn clock() -> FixedClock {
        FixedClock::new(
            FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 3, 20, 0, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_reports_are_scoped_per_user() {
        let mut by_user = HashMap::new();
        by_user.insert(1, vec![record(1, "2024-03-01", 10.0)]);
        by_user.insert(2, vec![record(2, "2024-03-01", 99.0)]);
        let service = ReportService::new(MemorySource(by_user), clock());

        let report = service.report_for_user(1).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.insights.max_revenue, 10.0);
    }

    #[test]
    fn test_unknown_user_gets_empty_report() {
        let service = ReportService::new(MemorySource(HashMap::new()), clock());
        let report = service.report_for_user(42).unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.daily.len(), 31);
    }

    #[test]
    fn test_bad_stored_date_fails_report() {
        let mut by_user = HashMap::new();
        by_user.insert(1, vec![record(1, "2024/03/01", 10.0)]);
        let service = ReportService::new(MemorySource(by_user), clock());
        assert!(matches!(
            service.report_for_user(1),
            Err(Error::InvalidDateFormat(_))
        ));
    }
}
