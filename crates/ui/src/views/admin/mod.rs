mod activity;
mod import;
mod overview;
mod reviews;
mod topics;
mod users;
mod vocab;

pub use activity::{AdminActivityPage, AdminActivityPageProps};
pub use import::{AdminImportPage, AdminImportPageProps, INTENT_IMPORT, INTENT_PREVIEW};
pub use overview::{AdminOverviewPage, AdminOverviewPageProps};
pub use reviews::{AdminReviewsPage, AdminReviewsPageProps};
pub use topics::{AdminTopicsPage, AdminTopicsPageProps};
pub use users::{AdminUsersPage, AdminUsersPageProps};
pub use vocab::{AdminVocabPage, AdminVocabPageProps};
