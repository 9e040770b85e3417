//! Practice-session runner: answering state kept between page renders.

mod runner;
mod store;
mod workflow;

pub use runner::{AnswerInput, ItemState, PendingSubmission, PracticeRunner, SubmitOutcome};
pub use store::RunnerStore;
pub use workflow::{PracticeLoopService, SubmitReport};
