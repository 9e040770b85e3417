#![forbid(unsafe_code)]

pub mod error;
pub mod forms;
pub mod history;
pub mod import;
pub mod listing;
pub mod practice;

pub use vocab_core::Clock;

pub use error::{FormError, ImportError, PracticeError};
pub use history::{HISTORY_COOKIE, SessionHistory};
pub use import::{ImportPreview, PreviewRow};
pub use listing::ListSpec;
pub use practice::{
    AnswerInput, ItemState, PracticeLoopService, PracticeRunner, RunnerStore, SubmitOutcome,
    SubmitReport,
};
