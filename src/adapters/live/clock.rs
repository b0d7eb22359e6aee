//! System clock adapter.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Reads the wall clock for `generated_at` stamps on live runs.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_plan_stamp_falls_between_reads() {
        let before = Utc::now();
        let stamped = LiveClock.now();
        assert!((before..=Utc::now()).contains(&stamped));
    }
}
