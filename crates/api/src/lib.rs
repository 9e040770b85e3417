#![forbid(unsafe_code)]

//! HTTP client for the vocabulary REST API.

pub mod admin;
pub mod auth;
pub mod client;
pub mod error;
pub mod fake;
pub mod learner;
pub mod practice;

mod http;

pub use admin::{
    ExportFile, ImportResult, ImportRowError, NewUser, ReviewDecision, TopicDraft, UserUpdate,
    Verdict,
};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use client::{ApiClient, ApiConfig, AuthedApi, Credentials};
pub use error::{ApiError, NETWORK_ERROR_MESSAGE, UNAUTHORIZED_MESSAGE};
pub use fake::InMemoryPracticeApi;
pub use learner::{MyVocabUpdate, ProfileUpdate, VocabDraft};
pub use practice::{AnswerSubmission, PracticeApi};
