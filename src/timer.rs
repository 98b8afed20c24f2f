use log::warn;
use std::time::Duration;

/// Fires once per `period` of accumulated time. Owned by whatever needs it,
/// so dropping the owner cancels it.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    elapsed: Duration,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    /// Advances by `dt` and returns how many periods completed.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// Turns wall-clock frame times into fixed simulation steps.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    accumulated: Duration,
}

impl FixedStep {
    pub fn new(tick_hz: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / tick_hz.max(1),
            accumulated: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Whether a simulation step is due after `real_dt` more time has passed.
    /// A backlog of two or more steps is dropped instead of replayed.
    pub fn tick(&mut self, real_dt: Duration) -> bool {
        self.accumulated += real_dt;
        if self.accumulated >= 2 * self.step {
            warn!(
                "LAG by {:.2}ms",
                (self.accumulated - 2 * self.step).as_secs_f64() * 1000.0
            );
            self.accumulated = Duration::ZERO;
            false
        } else if self.accumulated >= self.step {
            self.accumulated -= self.step;
            true
        } else {
            false
        }
    }
}
