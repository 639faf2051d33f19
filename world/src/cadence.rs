//! Fixed-period behavior timers advanced by the central tick.

use std::time::Duration;

/// Accumulates simulated time and reports how many whole periods elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cadence {
    period: Duration,
    accumulator: Duration,
}

impl Cadence {
    pub(crate) const fn new(period: Duration) -> Self {
        Self {
            period,
            accumulator: Duration::ZERO,
        }
    }

    /// Adds `dt` and returns the number of periods that completed.
    pub(crate) fn advance(&mut self, dt: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        let mut steps = 0;
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            steps += 1;
        }
        steps
    }
}
