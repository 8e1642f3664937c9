/// Command types for the voting page
///
/// Commands are user interactions (imperative) entering the session
/// controller: candidate card clicks, navigation buttons, the confirmation
/// dialog buttons, and the session start action. `Tick` is fed by the
/// session scheduler rather than the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A candidate card was clicked
    ToggleCandidate {
        position_id: String,
        candidate_id: String,
    },

    /// The Next button
    Advance,

    /// The Back button
    Retreat,

    /// The submit button: open the confirmation dialog
    OpenConfirmation,

    /// The confirmation dialog's confirm button
    ConfirmSubmission,

    /// The confirmation dialog's cancel button or an overlay click
    CancelConfirmation,

    /// The explicit session start action
    StartSession,

    /// One second elapsed (scheduler-driven)
    Tick,
}
