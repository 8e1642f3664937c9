/// Messaging module for the Event/Command architecture
///
/// - **Commands**: user interactions entering the session controller
///   (imperative, targeted).
/// - **Events**: notifications of things that happened (past tense,
///   broadcast). The view layer subscribes and renders; the state machines
///   never touch rendered elements themselves.
pub mod bus;
pub mod commands;
pub mod events;

// Re-export commonly used types
pub use bus::{EventBus, SubscriberId};
pub use commands::Command;
pub use events::{Event, ReviewRow, SelectionStatus};
