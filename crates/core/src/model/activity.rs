use serde::{Deserialize, Serialize};

use super::{ActivityLogId, UserId, first_text};

loose_enum! {
    ActivityType {
        RegisterAccount => "REGISTER_ACCOUNT",
        CompleteStudySession => "COMPLETE_STUDY_SESSION",
        AddMyVocab => "ADD_MYVOCAB",
        SubmitVocabContribution => "SUBMIT_VOCAB_CONTRIBUTION",
        ApproveVocabContribution => "APPROVE_VOCAB_CONTRIBUTION",
        RejectVocabContribution => "REJECT_VOCAB_CONTRIBUTION",
    }
}

impl ActivityType {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            ActivityType::RegisterAccount => "Registered account",
            ActivityType::CompleteStudySession => "Completed study session",
            ActivityType::AddMyVocab => "Added to My Vocab",
            ActivityType::SubmitVocabContribution => "Submitted contribution",
            ActivityType::ApproveVocabContribution => "Approved contribution",
            ActivityType::RejectVocabContribution => "Rejected contribution",
            ActivityType::Unknown(raw) => raw,
        }
    }

    /// CSS modifier used for the activity pill.
    #[must_use]
    pub fn tone(&self) -> &'static str {
        match self {
            ActivityType::RegisterAccount => "info",
            ActivityType::CompleteStudySession | ActivityType::ApproveVocabContribution => {
                "success"
            }
            ActivityType::AddMyVocab => "accent",
            ActivityType::SubmitVocabContribution => "warning",
            ActivityType::RejectVocabContribution => "danger",
            ActivityType::Unknown(_) => "muted",
        }
    }
}

loose_enum! {
    TargetType {
        Account => "ACCOUNT",
        TestSession => "TEST_SESSION",
        Vocabulary => "VOCABULARY",
        VocabularyContribution => "VOCABULARY_CONTRIBUTION",
    }
}

impl TargetType {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            TargetType::Account => "Account",
            TargetType::TestSession => "Study session",
            TargetType::Vocabulary => "Vocabulary",
            TargetType::VocabularyContribution => "Contribution",
            TargetType::Unknown(raw) => raw,
        }
    }
}

/// One entry of the admin activity log.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: ActivityLogId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_display_name: Option<String>,
    #[serde(default)]
    pub activity_type: Option<ActivityType>,
    #[serde(default)]
    pub target_type: Option<TargetType>,
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ActivityLog {
    #[must_use]
    pub fn actor(&self) -> String {
        first_text([
            self.user_display_name.as_deref(),
            self.user_email.as_deref(),
            self.user_id.as_ref().map(|id| id.as_str()),
        ])
        .unwrap_or_else(|| "—".to_string())
    }

    /// Pretty-printed metadata, empty when absent.
    #[must_use]
    pub fn metadata_pretty(&self) -> String {
        match &self.metadata {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        }
    }
}
