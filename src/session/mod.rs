/// Voting session controller
///
/// Owns every piece of mutable page state: the wizard flow (ledger +
/// cursor + confirmation), the session countdown and the one-shot
/// submission gate. Nothing else touches them. Commands come in from the
/// view layer and the scheduler; outcomes leave as broadcast events.
pub mod scheduler;
pub mod timer;

pub use scheduler::Ticker;
pub use timer::{SessionTimer, TimerError, TimerEvent, TimerState};

use crate::ballot::BallotPage;
use crate::messaging::{Command, Event, EventBus};
use crate::wizard::flow::NavigationResult;
use crate::wizard::submit::{SubmissionGate, SubmissionPayload};
use crate::wizard::{ToggleOutcome, WizardFlow};

/// Countdown parameters, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct SessionTimings {
    pub duration_secs: u32,
    pub warning_secs: u32,
    pub grace_secs: u32,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            duration_secs: 600,
            warning_secs: 60,
            grace_secs: 3,
        }
    }
}

pub struct VotingSession {
    flow: WizardFlow,
    timer: SessionTimer,
    gate: SubmissionGate,
    bus: EventBus<Event>,
    input_enabled: bool,
}

impl VotingSession {
    pub fn new(page: BallotPage, timings: SessionTimings, bus: EventBus<Event>) -> Self {
        Self {
            flow: WizardFlow::new(page),
            timer: SessionTimer::new(
                timings.duration_secs,
                timings.warning_secs,
                timings.grace_secs,
            ),
            gate: SubmissionGate::new(),
            bus,
            input_enabled: true,
        }
    }

    pub fn flow(&self) -> &WizardFlow {
        &self.flow
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn bus(&self) -> &EventBus<Event> {
        &self.bus
    }

    /// Execute one command.
    pub fn handle(&mut self, command: Command) {
        if !self.input_enabled && command != Command::Tick {
            log::debug!("Input disabled, dropping {:?}", command);
            return;
        }

        match command {
            Command::ToggleCandidate {
                position_id,
                candidate_id,
            } => self.on_toggle(&position_id, &candidate_id),
            Command::Advance => self.on_advance(),
            Command::Retreat => self.on_retreat(),
            Command::OpenConfirmation => self.on_open_confirmation(),
            Command::ConfirmSubmission => self.on_confirm(),
            Command::CancelConfirmation => self.on_cancel(),
            Command::StartSession => self.on_start(),
            Command::Tick => self.on_tick(),
        }
    }

    fn on_toggle(&mut self, position_id: &str, candidate_id: &str) {
        match self.flow.toggle(position_id, candidate_id) {
            Ok(ToggleOutcome::Added) => {
                self.bus.publish(Event::SelectionAdded {
                    position_id: position_id.to_string(),
                    candidate_id: candidate_id.to_string(),
                });
                self.publish_progress();
            }
            Ok(ToggleOutcome::Removed) => {
                self.bus.publish(Event::SelectionRemoved {
                    position_id: position_id.to_string(),
                    candidate_id: candidate_id.to_string(),
                });
                self.publish_progress();
            }
            Ok(ToggleOutcome::RejectedAtCapacity { max_winners }) => {
                self.bus.publish(Event::SelectionRejected {
                    position_id: position_id.to_string(),
                    max_winners,
                });
            }
            Err(e) => log::warn!("Ignoring toggle on unknown section: {}", e),
        }
    }

    fn on_advance(&mut self) {
        match self.flow.advance() {
            NavigationResult::Moved { from, to } => {
                self.bus.publish(Event::StepChanged { from, to });
                if to.is_review() {
                    self.bus.publish(Event::ReviewPopulated {
                        rows: self.flow.review_rows(),
                    });
                }
                self.publish_progress();
            }
            NavigationResult::Blocked => log::debug!("Advance blocked at review step"),
        }
    }

    fn on_retreat(&mut self) {
        match self.flow.retreat() {
            NavigationResult::Moved { from, to } => {
                self.bus.publish(Event::StepChanged { from, to });
                self.publish_progress();
            }
            NavigationResult::Blocked => log::debug!("Retreat blocked at first step"),
        }
    }

    fn on_open_confirmation(&mut self) {
        let summary = self.flow.open_confirmation();
        self.bus.publish(Event::ConfirmationOpened { summary });
    }

    fn on_cancel(&mut self) {
        if self.flow.cancel_confirmation() {
            self.bus.publish(Event::ConfirmationClosed);
        }
    }

    fn on_confirm(&mut self) {
        if !self.flow.is_confirming() {
            log::debug!("Confirm with no dialog open, ignoring");
            return;
        }
        self.submit(false);
    }

    fn on_start(&mut self) {
        match self.timer.start() {
            Ok(duration_secs) => {
                self.bus.publish(Event::SessionStarted { duration_secs });
                self.bus.publish(Event::ImmersiveChanged { active: true });
                self.bus
                    .publish(Event::NavigationGuardChanged { active: true });
            }
            Err(e) => log::warn!("Session start ignored: {}", e),
        }
    }

    fn on_tick(&mut self) {
        match self.timer.tick() {
            Some(TimerEvent::Tick { remaining_secs }) => {
                self.bus.publish(Event::TimerTick { remaining_secs });
            }
            Some(TimerEvent::Warning { remaining_secs }) => {
                self.bus.publish(Event::TimerTick { remaining_secs });
                self.bus.publish(Event::TimerWarning { remaining_secs });
            }
            Some(TimerEvent::Expired) => {
                self.input_enabled = false;
                self.bus.publish(Event::TimerTick { remaining_secs: 0 });
                self.bus.publish(Event::SessionExpired);
                self.bus
                    .publish(Event::NavigationGuardChanged { active: false });
            }
            Some(TimerEvent::ForceSubmit) => self.submit(true),
            None => {}
        }
    }

    /// Serialize the ledger and hand it off, at most once per session.
    fn submit(&mut self, forced: bool) {
        if !self.gate.fire() {
            log::warn!("Ballot already submitted, ignoring");
            return;
        }

        match SubmissionPayload::build(self.flow.page(), self.flow.ledger()) {
            Ok(payload) => {
                let guard_was_active = self.timer.guard_active();
                self.flow.close_confirmation();
                self.timer.finalize();
                self.input_enabled = false;

                if guard_was_active {
                    self.bus
                        .publish(Event::NavigationGuardChanged { active: false });
                }
                self.bus.publish(Event::BallotSubmitted { payload, forced });
            }
            // A page without the token cannot submit; leave the session as
            // it is and surface the problem in the log.
            Err(e) => log::error!("Cannot submit ballot: {}", e),
        }
    }

    fn publish_progress(&self) {
        self.bus.publish(Event::ProgressChanged {
            fraction: self.flow.progress(),
        });
        let summary = self.flow.summary();
        self.bus.publish(Event::VoteSummaryChanged {
            selected: summary.selected,
            positions: summary.positions,
        });
        self.bus.publish(Event::SubmitReadinessChanged {
            ready: self.flow.is_complete(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot::fixtures::two_position_page;
    use crossbeam_channel::Receiver;

    fn session() -> (VotingSession, Receiver<Event>) {
        let bus = EventBus::new();
        let (rx, _id) = bus.subscribe();
        let session = VotingSession::new(two_position_page(), SessionTimings::default(), bus);
        (session, rx)
    }

    fn drain(rx: &Receiver<Event>) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(e) = rx.try_recv() {
            events.push(e);
        }
        events
    }

    #[test]
    fn test_toggle_publishes_selection_and_progress() {
        let (mut session, rx) = session();
        session.handle(Command::ToggleCandidate {
            position_id: "1".into(),
            candidate_id: "a".into(),
        });

        let events = drain(&rx);
        assert!(events.contains(&Event::SelectionAdded {
            position_id: "1".into(),
            candidate_id: "a".into(),
        }));
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::VoteSummaryChanged { selected: 1, .. })));
    }

    #[test]
    fn test_capacity_rejection_publishes_toast_only() {
        let (mut session, rx) = session();
        session.handle(Command::ToggleCandidate {
            position_id: "1".into(),
            candidate_id: "a".into(),
        });
        drain(&rx);

        session.handle(Command::ToggleCandidate {
            position_id: "1".into(),
            candidate_id: "b".into(),
        });
        let events = drain(&rx);
        assert_eq!(
            events,
            vec![Event::SelectionRejected {
                position_id: "1".into(),
                max_winners: 1,
            }]
        );
    }

    #[test]
    fn test_double_confirm_submits_once() {
        let (mut session, rx) = session();
        session.handle(Command::ToggleCandidate {
            position_id: "1".into(),
            candidate_id: "a".into(),
        });
        session.handle(Command::OpenConfirmation);
        session.handle(Command::ConfirmSubmission);
        session.handle(Command::ConfirmSubmission);

        let submissions: Vec<_> = drain(&rx)
            .into_iter()
            .filter(|e| matches!(e, Event::BallotSubmitted { .. }))
            .collect();
        assert_eq!(submissions.len(), 1);
        assert!(!session.input_enabled());
    }

    #[test]
    fn test_expiry_disables_input_and_forces_single_submission() {
        let bus = EventBus::new();
        let (rx, _id) = bus.subscribe();
        let timings = SessionTimings {
            duration_secs: 3,
            warning_secs: 1,
            grace_secs: 2,
        };
        let mut session = VotingSession::new(two_position_page(), timings, bus);

        session.handle(Command::StartSession);
        session.handle(Command::ToggleCandidate {
            position_id: "1".into(),
            candidate_id: "a".into(),
        });
        drain(&rx);

        // Run past expiry and grace, with stray extra ticks.
        for _ in 0..10 {
            session.handle(Command::Tick);
        }

        let events = drain(&rx);
        assert!(events.contains(&Event::SessionExpired));
        let submissions: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, Event::BallotSubmitted { forced: true, .. }))
            .collect();
        assert_eq!(submissions.len(), 1);
        assert!(!session.input_enabled());

        // Input is dead after expiry.
        session.handle(Command::Advance);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_guard_tracks_timer_lifecycle() {
        let bus = EventBus::new();
        let (rx, _id) = bus.subscribe();
        let timings = SessionTimings {
            duration_secs: 2,
            warning_secs: 1,
            grace_secs: 1,
        };
        let mut session = VotingSession::new(two_position_page(), timings, bus);

        session.handle(Command::StartSession);
        let events = drain(&rx);
        assert!(events.contains(&Event::NavigationGuardChanged { active: true }));

        session.handle(Command::Tick);
        session.handle(Command::Tick);
        let events = drain(&rx);
        assert!(events.contains(&Event::NavigationGuardChanged { active: false }));
    }
}
