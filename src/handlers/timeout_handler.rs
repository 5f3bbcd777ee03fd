use std::time::{Duration, Instant};

use super::{ComputationHandler, LngEvent};

/// Specifies when a [`TimeoutHandler`] cancels a computation.
#[derive(Debug, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Timer {
    /// Cancels once the duration has passed since the creation of the handler.
    SingleTimeout(Duration),
    /// Like `SingleTimeout`, but the clock restarts with every started
    /// computation.
    RestartingTimeout(Duration),
    /// Cancels once the given instant has passed.
    FixedEnd(Instant),
}

/// A handler which cancels computations after a timeout. The timeout is checked
/// on every event, e.g. on every new BDD or SDD node.
#[derive(Debug, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct TimeoutHandler {
    timer: Timer,
    checkpoint: Instant,
}

impl TimeoutHandler {
    /// Creates a new timeout handler.
    pub fn new(timer: Timer) -> Self {
        Self { timer, checkpoint: Instant::now() }
    }
}

impl ComputationHandler for TimeoutHandler {
    fn should_resume(&mut self, event: LngEvent) -> bool {
        match self.timer {
            Timer::SingleTimeout(timeout) => self.checkpoint.elapsed() < timeout,
            Timer::RestartingTimeout(timeout) => {
                if matches!(event, LngEvent::ComputationStarted(_)) {
                    self.checkpoint = Instant::now();
                }
                self.checkpoint.elapsed() < timeout
            }
            Timer::FixedEnd(end) => Instant::now() < end,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::handlers::{ComputationHandler, LngComputation, LngEvent, Timer, TimeoutHandler};

    #[test]
    fn test_expired_timeouts() {
        let mut single = TimeoutHandler::new(Timer::SingleTimeout(Duration::ZERO));
        assert!(!single.should_resume(LngEvent::BddNewNodeAllocated));
        let mut fixed = TimeoutHandler::new(Timer::FixedEnd(Instant::now()));
        assert!(!fixed.should_resume(LngEvent::DnnfShannonExpansion));
    }

    #[test]
    fn test_running_timeouts() {
        let mut single = TimeoutHandler::new(Timer::SingleTimeout(Duration::from_secs(3600)));
        assert!(single.should_resume(LngEvent::BddNewNodeAllocated));
        let mut restarting = TimeoutHandler::new(Timer::RestartingTimeout(Duration::from_secs(3600)));
        assert!(restarting.should_resume(LngEvent::ComputationStarted(LngComputation::Sdd)));
        assert!(restarting.should_resume(LngEvent::SddNewNodeAllocated));
    }
}
