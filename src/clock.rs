/// Reference-date adapter
///
/// The domain never reads the clock. Callers ask a `Clock` for today and
/// pass it in; `DayWatcher` notices when local midnight has passed so the
/// server can log the rollover and re-derive streaks for the new day.

use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date from the system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always the same day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Tracks the last day seen and reports boundary crossings
#[derive(Debug, Clone)]
pub struct DayWatcher {
    current: NaiveDate,
}

impl DayWatcher {
    pub fn new(clock: &dyn Clock) -> Self {
        Self {
            current: clock.today(),
        }
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    /// The new day if the clock moved to a different date since the last poll
    pub fn poll(&mut self, clock: &dyn Clock) -> Option<NaiveDate> {
        let today = clock.today();
        if today == self.current {
            return None;
        }
        self.current = today;
        Some(today)
    }
}
