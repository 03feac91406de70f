use std::time::Duration;

use tracing::debug;

use crate::session::{SessionController, SessionState};

pub const SESSION_TICK: Duration = Duration::from_secs(1);

/// Countdown clock for one session: turns elapsed wall time into `tick()`
/// calls on the controller.
///
/// The driver never caches session state. Every due tick reads the
/// controller as it is at that moment, so a pause or completion that lands
/// between two ticks cannot be overtaken by a stale one.
#[derive(Debug, Clone)]
pub struct TickDriver {
    interval: Duration,
    accumulated: Duration,
    armed: bool,
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new(SESSION_TICK)
    }
}

impl TickDriver {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            armed: false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next tick fires, if armed.
    pub fn until_next(&self) -> Option<Duration> {
        self.armed
            .then(|| self.interval.saturating_sub(self.accumulated))
    }

    /// Arm or cancel to match the session. Arming starts a fresh interval;
    /// cancelling drops the partial interval but never touches the countdown.
    pub fn sync(&mut self, state: &SessionState) {
        match (self.armed, state.is_ticking()) {
            (false, true) => {
                self.armed = true;
                self.accumulated = Duration::ZERO;
                debug!("tick driver armed");
            }
            (true, false) => self.cancel(),
            _ => {}
        }
    }

    pub fn cancel(&mut self) {
        if self.armed {
            debug!("tick driver cancelled");
        }
        self.armed = false;
        self.accumulated = Duration::ZERO;
    }

    /// Feed `elapsed` wall time and deliver every tick that became due.
    /// Returns how many ticks were delivered.
    pub fn drive(&mut self, elapsed: Duration, controller: &mut SessionController) -> u32 {
        self.sync(controller.state());
        if !self.armed || self.interval.is_zero() {
            return 0;
        }

        self.accumulated += elapsed;
        let mut fired = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            controller.tick();
            fired += 1;
            self.sync(controller.state());
            if !self.armed {
                break;
            }
        }
        fired
    }
}
