//! Wall-clock source for real-time expeditions.

use std::time::{Duration, Instant};

/// How long the input loop waits for a command before applying elapsed time.
pub(crate) const IDLE_POLL: Duration = Duration::from_secs(1);

/// Converts wall-clock time into whole-second tick durations.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RealTimeClock {
    last: Instant,
}

impl RealTimeClock {
    pub(crate) fn starting_at(now: Instant) -> Self {
        Self { last: now }
    }

    /// Whole seconds elapsed since the previous call; the fraction carries over.
    pub(crate) fn take_elapsed(&mut self, now: Instant) -> Option<Duration> {
        let secs = now.saturating_duration_since(self.last).as_secs();
        if secs == 0 {
            return None;
        }
        let dt = Duration::from_secs(secs);
        self.last += dt;
        Some(dt)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::RealTimeClock;

    #[test]
    fn sub_second_time_is_carried() {
        let start = Instant::now();
        let mut clock = RealTimeClock::starting_at(start);

        assert_eq!(clock.take_elapsed(start + Duration::from_millis(700)), None);
        assert_eq!(
            clock.take_elapsed(start + Duration::from_millis(1_400)),
            Some(Duration::from_secs(1))
        );
        assert_eq!(
            clock.take_elapsed(start + Duration::from_millis(3_100)),
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn earlier_instants_yield_nothing() {
        let start = Instant::now() + Duration::from_secs(5);
        let mut clock = RealTimeClock::starting_at(start);
        assert_eq!(clock.take_elapsed(start - Duration::from_secs(2)), None);
    }
}
