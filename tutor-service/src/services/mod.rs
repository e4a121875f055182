pub mod completion;
pub mod prompt;
pub mod providers;
pub mod session;

pub use completion::{CompletionClient, CompletionError};
pub use session::{RejectReason, SessionController, SessionSnapshot, SessionState, SubmitOutcome};
