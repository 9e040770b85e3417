use serde::{Deserialize, Serialize};

use super::{ContributionId, TopicId, UserId, VocabExample, VocabId, first_text};

loose_enum! {
    /// Review workflow state of a learner contribution.
    ContributionStatus {
        Submitted => "SUBMITTED",
        InReview => "IN_REVIEW",
        Approved => "APPROVED",
        Rejected => "REJECTED",
        Canceled => "CANCELED" | "CANCELLED",
    }
}

impl ContributionStatus {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            ContributionStatus::Submitted => "Submitted",
            ContributionStatus::InReview => "In review",
            ContributionStatus::Approved => "Approved",
            ContributionStatus::Rejected => "Rejected",
            ContributionStatus::Canceled => "Canceled",
            ContributionStatus::Unknown(raw) => raw,
        }
    }

    /// Approve/reject is only offered while a decision is still open.
    #[must_use]
    pub fn is_reviewable(&self) -> bool {
        matches!(
            self,
            ContributionStatus::Submitted | ContributionStatus::InReview
        )
    }
}

loose_enum! {
    /// Reason code attached to a rejected contribution.
    RejectReason {
        Duplicate => "DUPLICATE",
        InvalidDefinition => "INVALID_DEFINITION",
        WrongLanguage => "WRONG_LANGUAGE",
        LowQuality => "LOW_QUALITY",
        InappropriateContent => "INAPPROPRIATE_CONTENT",
        Other => "OTHER",
    }
}

impl RejectReason {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            RejectReason::Duplicate => "Duplicate of an existing word",
            RejectReason::InvalidDefinition => "Invalid definition",
            RejectReason::WrongLanguage => "Wrong language",
            RejectReason::LowQuality => "Low quality",
            RejectReason::InappropriateContent => "Inappropriate content",
            RejectReason::Other => "Other reason",
            RejectReason::Unknown(raw) => raw,
        }
    }

    /// Label for an optional stored code; unknown codes are shown verbatim.
    #[must_use]
    pub fn describe(code: Option<&str>) -> String {
        match code.map(str::trim).filter(|code| !code.is_empty()) {
            Some(code) => RejectReason::parse(code).label().to_string(),
            None => "—".to_string(),
        }
    }
}

loose_enum! {
    ReviewAction {
        Submit => "SUBMIT",
        StartReview => "START_REVIEW",
        Approve => "APPROVE",
        Reject => "REJECT",
        Reopen => "REOPEN",
    }
}

impl ReviewAction {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            ReviewAction::Submit => "Submitted",
            ReviewAction::StartReview => "Review started",
            ReviewAction::Approve => "Approved",
            ReviewAction::Reject => "Rejected",
            ReviewAction::Reopen => "Reopened",
            ReviewAction::Unknown(raw) => raw,
        }
    }
}

/// A learner-proposed vocabulary entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: ContributionId,
    #[serde(default)]
    pub contributor_user_id: Option<UserId>,
    #[serde(default)]
    pub contributor_display_name: Option<String>,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub definition_vi: Option<String>,
    #[serde(default)]
    pub examples: Option<Vec<VocabExample>>,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topic_ids: Option<Vec<TopicId>>,
    #[serde(default)]
    pub status: Option<ContributionStatus>,
    #[serde(default)]
    pub review_note: Option<String>,
    #[serde(default)]
    pub reject_reason: Option<String>,
    #[serde(default)]
    pub approved_vocabulary_id: Option<VocabId>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub reviewed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Contribution {
    /// Missing status is treated as freshly submitted.
    #[must_use]
    pub fn status(&self) -> ContributionStatus {
        self.status.clone().unwrap_or(ContributionStatus::Submitted)
    }

    #[must_use]
    pub fn contributor(&self) -> String {
        first_text([
            self.contributor_display_name.as_deref(),
            self.contributor_user_id.as_ref().map(|id| id.as_str()),
        ])
        .unwrap_or_else(|| "—".to_string())
    }

    #[must_use]
    pub fn example_texts(&self) -> Vec<String> {
        self.examples
            .iter()
            .flatten()
            .map(|example| example.text().trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

/// Row of the admin review queue.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionQueueItem {
    pub id: ContributionId,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub contributor_user_id: Option<UserId>,
    #[serde(default)]
    pub contributor_display_name: Option<String>,
    #[serde(default)]
    pub status: Option<ContributionStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ContributionQueueItem {
    #[must_use]
    pub fn status(&self) -> ContributionStatus {
        self.status.clone().unwrap_or(ContributionStatus::Submitted)
    }

    #[must_use]
    pub fn contributor(&self) -> String {
        first_text([
            self.contributor_display_name.as_deref(),
            self.contributor_user_id.as_ref().map(|id| id.as_str()),
        ])
        .unwrap_or_else(|| "—".to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionReviewLog {
    pub id: String,
    #[serde(default)]
    pub action: Option<ReviewAction>,
    #[serde(default)]
    pub actor_user_id: Option<UserId>,
    #[serde(default)]
    pub actor_display_name: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Contribution plus its review trail (`GET /admin/vocab-contributions/{id}`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDetail {
    #[serde(default)]
    pub contribution: Option<Contribution>,
    #[serde(default)]
    pub review_logs: Option<Vec<ContributionReviewLog>>,
}
