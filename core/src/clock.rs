//! Dataset clock — owns the "today" anchor every generated date hangs off.
//!
//! Production callers use the system date; tests pin a fixed date so
//! expected-close-date windows are exactly reproducible.

use crate::rng::StreamRng;
use chrono::{Duration, NaiveDate, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetClock {
    today: NaiveDate,
}

impl DatasetClock {
    /// Anchor on the current system date.
    pub fn system() -> Self {
        Self { today: Utc::now().date_naive() }
    }

    /// Anchor on a fixed date. Used by tests.
    pub fn fixed(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Uniform date in [today + from_days, today + to_days], inclusive.
    /// Offsets may be negative (dates in the past).
    pub fn date_between(&self, rng: &mut StreamRng, from_days: i64, to_days: i64) -> NaiveDate {
        assert!(from_days <= to_days, "date window is inverted");
        let span = (to_days - from_days + 1) as u64;
        let offset = from_days + rng.next_u64_below(span) as i64;
        self.today + Duration::days(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, TableSlot};

    #[test]
    fn date_between_is_inclusive_and_bounded() {
        let clock = DatasetClock::fixed(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let bank = RngBank::new(1);
        let mut rng = bank.for_table(TableSlot::Customer);
        for _ in 0..500 {
            let d = clock.date_between(&mut rng, -30, 0);
            assert!(d >= NaiveDate::from_ymd_opt(2025, 5, 2).unwrap());
            assert!(d <= clock.today());
        }
    }

    #[test]
    fn zero_width_window_returns_today() {
        let clock = DatasetClock::fixed(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let bank = RngBank::new(2);
        let mut rng = bank.for_table(TableSlot::Deal);
        assert_eq!(clock.date_between(&mut rng, 0, 0), clock.today());
    }
}
