mod admin;
mod auth;
mod components;
mod contribute;
mod dashboard;
mod error_page;
mod layout;
mod library;
mod my_vocab;
mod practice;
mod scripts;
mod settings;
mod state;
mod topics;
mod vocab_fields;

#[cfg(test)]
mod view_smoke;

pub use admin::*;
pub use auth::{LoginPage, LoginPageProps, RegisterPage, RegisterPageProps};
pub use components::{href, page_href};
pub use contribute::{ContributePage, ContributePageProps};
pub use dashboard::{DashboardPage, DashboardPageProps};
pub use error_page::{ErrorPage, ErrorPageProps};
pub use layout::{APP_NAME, Area, Chrome, Document, Flash, STYLESHEET_PATH};
pub use library::{LibraryPage, LibraryPageProps};
pub use my_vocab::{MyVocabPage, MyVocabPageProps};
pub use practice::{
    ANSWER_FIELD, ITEM_FIELD, PracticeListPage, PracticeListPageProps, PracticeSessionPage,
    PracticeSessionPageProps, SLOT_FIELD_PREFIX,
};
pub use settings::{SettingsPage, SettingsPageProps, profile_form};
pub use state::{ViewError, ViewState, view_state_from_result};
pub use topics::{TopicsPage, TopicsPageProps};
pub use vocab_fields::form_from_vocab;
