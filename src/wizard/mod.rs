/// Ballot wizard module
///
/// The sequential ballot-filling flow: one step per position section, then
/// a read-only review, a confirmation dialog and a one-shot form post.
///
/// ## Architecture
///
/// ```text
/// WizardFlow
///   ├── StepCursor        (step index over positions + review)
///   ├── SelectionLedger   (per-position selections, capacity-bounded)
///   └── Confirmation      (dialog state, ledger rendering)
/// SubmissionPayload / SubmissionGate / FormSubmitter
///                         (serialization and the one-shot post)
/// ```
///
/// The flow is driven by `session::VotingSession`, which executes commands
/// against it and publishes the outcomes as events.
pub mod flow;
pub mod ledger;
pub mod steps;
pub mod submit;

// Re-export commonly used types
pub use flow::{ConfirmationLine, ConfirmationSummary, NavigationResult, WizardFlow};
pub use ledger::{SelectionLedger, ToggleOutcome, VoteSummary};
pub use steps::{StepCursor, WizardStep};
pub use submit::{FormSubmitter, SubmissionGate, SubmissionPayload};
