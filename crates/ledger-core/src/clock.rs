//! Reference clock for reports
//!
//! Reports depend on "now" to pick the current month and year. The clock is
//! handed to the report service rather than read ambiently.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};

use crate::error::{Error, Result};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

/// Wall clock in the process's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<FixedOffset>);

impl FixedClock {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }

    /// Midnight at the start of `date` in the local time zone
    pub fn local_midnight(date: NaiveDate) -> Result<Self> {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| Error::InvalidData(format!("no midnight on {}", date)))?;
        let at = Local
            .from_local_datetime(&midnight)
            .earliest()
            .ok_or_else(|| Error::InvalidData(format!("{} does not exist locally", midnight)))?;
        Ok(Self(at.fixed_offset()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_stable() {
        let at = FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 20, 9, 30, 0)
            .unwrap();
        let clock = FixedClock::new(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_local_midnight_keeps_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let clock = FixedClock::local_midnight(date).unwrap();
        assert_eq!(clock.now().date_naive(), date);
    }
}
