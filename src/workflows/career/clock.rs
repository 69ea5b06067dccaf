use chrono::{DateTime, Datelike, Utc};

/// Time source for scoring ("current year") and lifecycle timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn current_year(&self) -> i32 {
        self.now().year()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
