#[macro_use]
mod macros;

mod activity;
mod contribution;
mod ids;
mod page;
mod session;
mod topic;
mod user;
mod vocab;

pub use activity::{ActivityLog, ActivityType, TargetType};
pub use contribution::{
    Contribution, ContributionDetail, ContributionQueueItem, ContributionReviewLog,
    ContributionStatus, RejectReason, ReviewAction,
};
pub use ids::{ActivityLogId, ContributionId, ItemId, SessionId, TopicId, UserId, VocabId};
pub use page::{ListQuery, Page, PageRequest, PageWindow};
pub use session::{Item, ItemStatus, QuestionType, Session, SessionStatus};
pub use topic::{Topic, TopicStatus};
pub use user::{AccountStatus, Role, UserProfile};
pub use vocab::{LearningStatus, UserVocabulary, VocabExample, VocabStatus, Vocabulary};

/// First non-blank, trimmed value among the candidates.
pub(crate) fn first_text<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
