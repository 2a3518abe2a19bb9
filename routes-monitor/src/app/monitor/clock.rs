use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local};

/// source of wall time for the monitor loop. sampling bands are chosen from
/// the local time of day, so `now` carries the local offset.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
    fn sleep(&mut self, duration: Duration);
}

/// the host clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }

    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
