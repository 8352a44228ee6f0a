//! Wall-clock abstraction.
//!
//! Everything that stamps or expires data reads time through a [`Clock`] so
//! tests can pin or advance it. Production code uses [`SystemClock`].

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, TimeZone};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Shared clock handle passed to components at construction time.
pub type SharedClock = Arc<dyn Clock>;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

pub fn system() -> SharedClock {
    Arc::new(SystemClock)
}

/// Manually driven clock. Starts at a fixed instant and only moves on [`advance`](Self::advance).
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self { now: Mutex::new(start) }
    }

    /// Clock pinned to 09:00 local time on the given calendar date.
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        Local
            .with_ymd_and_hms(year, month, day, 9, 0, 0)
            .single()
            .map(Self::new)
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::at_date(2025, 6, 1).unwrap();
        let t0 = clock.now();
        assert_eq!(clock.now(), t0);
        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now() - t0, Duration::seconds(90));
    }

    #[test]
    fn system_clock_is_monotonic_enough() {
        let c = SystemClock;
        let a = c.now();
        let b = c.now();
        assert!(b >= a);
    }
}
