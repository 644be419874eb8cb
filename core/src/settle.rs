use web_time::{Duration, Instant};

/// Display window before the table returns to `Idle`.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(3000);

/// Cancellable window armed after a cashout or full clear. Drop it to cancel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SettlementTimer {
    started_at: Instant,
    delay: Duration,
}

impl SettlementTimer {
    pub fn new(started_at: Instant, delay: Duration) -> Self {
        Self { started_at, delay }
    }

    pub fn deadline(&self) -> Instant {
        self.started_at + self.delay
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline()
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline().saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_after_delay() {
        let start = Instant::now();
        let timer = SettlementTimer::new(start, DEFAULT_SETTLE_DELAY);

        assert!(!timer.is_due(start));
        assert!(!timer.is_due(start + Duration::from_millis(2999)));
        assert!(timer.is_due(start + DEFAULT_SETTLE_DELAY));
        assert_eq!(timer.remaining(start + Duration::from_secs(1)), Duration::from_secs(2));
        assert_eq!(timer.remaining(start + Duration::from_secs(5)), Duration::ZERO);
    }
}
