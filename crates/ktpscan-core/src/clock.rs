//! Source of "today" for the not-in-the-future date checks.

use chrono::{Datelike, Local, NaiveDate};

/// Supplies the current calendar date.
///
/// Every date rule compares against this instead of reading the wall clock,
/// so callers can pin the date in tests and replays.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Current year, used by the two-digit year pivot and the birth-year range.
    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// Local calendar date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen at one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Returns `None` for an impossible calendar date.
    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_date() {
        let clock = FixedClock::ymd(2026, 10, 15).unwrap();
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
        assert_eq!(clock.current_year(), 2026);
    }

    #[test]
    fn boxed_clock_delegates() {
        let clock: Box<dyn Clock> = Box::new(FixedClock::ymd(1999, 12, 31).unwrap());
        assert_eq!(clock.current_year(), 1999);
    }

    #[test]
    fn fixed_clock_rejects_impossible_date() {
        assert!(FixedClock::ymd(2026, 2, 30).is_none());
    }
}
