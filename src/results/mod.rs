/// Public results display
///
/// Periodic fetch-and-render of the public results endpoint with a 1 Hz
/// local countdown, independent of the voting wizard.
pub mod model;
pub mod poller;

pub use model::{
    countdown_display, updated_at_display, CandidateResult, PositionStanding, RankedCandidate,
    ResultsPayload, ResultsView,
};
pub use poller::{ResultsBoard, ResultsClient, ResultsPoller};
