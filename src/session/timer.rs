/// Session countdown state machine
///
/// Lifecycle: Idle -> Running -> Expired -> Finalized. The timer holds no
/// clock; it is advanced by explicit 1 Hz ticks from the scheduler, which
/// keeps every transition deterministic under test.

/// State of the session countdown
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerState {
    /// Countdown has not been started
    Idle,

    /// Countdown is running with this many seconds left
    Running { remaining_secs: u32 },

    /// Countdown hit zero; the forced submission is this many ticks away
    Expired { grace_left: u32 },

    /// The forced submission fired (or the session ended another way)
    Finalized,
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, TimerState::Expired { .. } | TimerState::Finalized)
    }
}

/// What one tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed
    Tick { remaining_secs: u32 },

    /// One second elapsed inside the warning band
    Warning { remaining_secs: u32 },

    /// The countdown reached zero
    Expired,

    /// The post-expiry grace delay elapsed; submit now
    ForceSubmit,
}

/// Timer transition errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// Cannot start a countdown twice
    AlreadyStarted,
}

impl std::fmt::Display for TimerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimerError::AlreadyStarted => write!(f, "Session countdown already started"),
        }
    }
}

impl std::error::Error for TimerError {}

/// The session countdown.
pub struct SessionTimer {
    state: TimerState,
    duration_secs: u32,
    warning_secs: u32,
    grace_secs: u32,
}

impl SessionTimer {
    pub fn new(duration_secs: u32, warning_secs: u32, grace_secs: u32) -> Self {
        Self {
            state: TimerState::Idle,
            duration_secs,
            warning_secs,
            grace_secs,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        match self.state {
            TimerState::Running { remaining_secs } => Some(remaining_secs),
            _ => None,
        }
    }

    /// The navigation-away guard is active exactly while the countdown is
    /// running with time remaining.
    pub fn guard_active(&self) -> bool {
        self.state.is_running()
    }

    /// Start the countdown. Returns the duration for display.
    pub fn start(&mut self) -> Result<u32, TimerError> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running {
                    remaining_secs: self.duration_secs,
                };
                Ok(self.duration_secs)
            }
            _ => Err(TimerError::AlreadyStarted),
        }
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        match self.state {
            TimerState::Idle | TimerState::Finalized => None,
            TimerState::Running { remaining_secs } => {
                let remaining = remaining_secs.saturating_sub(1);
                if remaining == 0 {
                    self.state = TimerState::Expired {
                        grace_left: self.grace_secs,
                    };
                    Some(TimerEvent::Expired)
                } else {
                    self.state = TimerState::Running {
                        remaining_secs: remaining,
                    };
                    if remaining <= self.warning_secs {
                        Some(TimerEvent::Warning {
                            remaining_secs: remaining,
                        })
                    } else {
                        Some(TimerEvent::Tick {
                            remaining_secs: remaining,
                        })
                    }
                }
            }
            TimerState::Expired { grace_left } => {
                if grace_left <= 1 {
                    self.state = TimerState::Finalized;
                    Some(TimerEvent::ForceSubmit)
                } else {
                    self.state = TimerState::Expired {
                        grace_left: grace_left - 1,
                    };
                    None
                }
            }
        }
    }

    /// End the countdown without the forced submission (the ballot left
    /// through the normal confirmation path).
    pub fn finalize(&mut self) {
        self.state = TimerState::Finalized;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_tick() {
        let mut timer = SessionTimer::new(600, 60, 3);
        assert_eq!(timer.tick(), None);

        assert_eq!(timer.start(), Ok(600));
        assert_eq!(timer.start(), Err(TimerError::AlreadyStarted));

        assert_eq!(
            timer.tick(),
            Some(TimerEvent::Tick { remaining_secs: 599 })
        );
        assert!(timer.guard_active());
    }

    #[test]
    fn test_warning_band() {
        let mut timer = SessionTimer::new(62, 60, 3);
        timer.start().unwrap();

        assert_eq!(
            timer.tick(),
            Some(TimerEvent::Tick { remaining_secs: 61 })
        );
        assert_eq!(
            timer.tick(),
            Some(TimerEvent::Warning { remaining_secs: 60 })
        );
        assert_eq!(
            timer.tick(),
            Some(TimerEvent::Warning { remaining_secs: 59 })
        );
    }

    #[test]
    fn test_expiry_and_grace() {
        let mut timer = SessionTimer::new(2, 1, 2);
        timer.start().unwrap();

        assert_eq!(
            timer.tick(),
            Some(TimerEvent::Warning { remaining_secs: 1 })
        );
        assert_eq!(timer.tick(), Some(TimerEvent::Expired));
        assert!(!timer.guard_active());

        // Grace delay: one silent tick, then the forced submission.
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.tick(), Some(TimerEvent::ForceSubmit));

        // Stray extra ticks stay silent; no second forced submission.
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.tick(), None);
    }

    #[test]
    fn test_full_countdown_expires_after_duration_ticks() {
        let mut timer = SessionTimer::new(600, 60, 3);
        timer.start().unwrap();

        for _ in 0..599 {
            let event = timer.tick().unwrap();
            assert!(!matches!(event, TimerEvent::Expired));
        }
        assert_eq!(timer.tick(), Some(TimerEvent::Expired));
    }

    #[test]
    fn test_finalize_silences_the_timer() {
        let mut timer = SessionTimer::new(10, 5, 2);
        timer.start().unwrap();
        timer.finalize();

        assert_eq!(timer.tick(), None);
        assert!(!timer.guard_active());
    }
}
