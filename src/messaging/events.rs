/// Event types for the voting page
///
/// Events represent things that have happened (past tense). They are
/// broadcast to all subscribers; the view layer renders them onto the page.
use crate::wizard::flow::ConfirmationSummary;
use crate::wizard::steps::WizardStep;
use crate::wizard::submit::SubmissionPayload;

/// Review-step summary for one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub position_name: String,
    pub status: SelectionStatus,
    pub candidate_names: Vec<String>,
}

/// Whether a position has at least one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    Complete,
    Pending,
}

/// Voting page events
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The active step changed through navigation
    StepChanged { from: WizardStep, to: WizardStep },

    /// A candidate was added to the ledger
    SelectionAdded {
        position_id: String,
        candidate_id: String,
    },

    /// A candidate was removed from the ledger
    SelectionRemoved {
        position_id: String,
        candidate_id: String,
    },

    /// A toggle-to-select hit the position's winner cap; ledger unchanged
    SelectionRejected {
        position_id: String,
        max_winners: usize,
    },

    /// Progress indicator value changed: (cursor + 1) / (steps)
    ProgressChanged { fraction: f64 },

    /// The running "K candidate(s) selected across P position(s)" line
    VoteSummaryChanged { selected: usize, positions: usize },

    /// Submit-readiness display (advisory completeness)
    SubmitReadinessChanged { ready: bool },

    /// The review step was (re)populated from the ledger
    ReviewPopulated { rows: Vec<ReviewRow> },

    /// The confirmation dialog opened with the rendered ledger
    ConfirmationOpened { summary: ConfirmationSummary },

    /// The confirmation dialog closed without submitting
    ConfirmationClosed,

    /// The ballot was serialized and handed off for the one-shot post
    BallotSubmitted {
        payload: SubmissionPayload,
        forced: bool,
    },

    /// The session countdown started
    SessionStarted { duration_secs: u32 },

    /// UI chrome suppression toggled with the session
    ImmersiveChanged { active: bool },

    /// One second elapsed on the session countdown
    TimerTick { remaining_secs: u32 },

    /// Countdown entered the warning band (visual change only)
    TimerWarning { remaining_secs: u32 },

    /// Countdown reached zero; input is disabled
    SessionExpired,

    /// The navigation-away guard toggled
    NavigationGuardChanged { active: bool },
}
