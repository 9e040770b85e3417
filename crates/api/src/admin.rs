//! Admin console endpoints.

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vocab_core::model::{
    AccountStatus, ActivityLog, ContributionDetail, ContributionId, ContributionQueueItem,
    ListQuery, Page, RejectReason, Role, Topic, TopicId, TopicStatus, UserId, UserProfile,
    VocabId, Vocabulary,
};

use crate::client::{AuthedApi, seg};
use crate::error::ApiError;
use crate::learner::VocabDraft;

//
// ─── PAYLOADS ──────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// `PATCH /admin/users/{id}`; blank fields are sent as `null`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
    pub locale: Option<String>,
    pub time_zone: Option<String>,
    pub daily_goal: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordReset<'a> {
    new_password: &'a str,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TopicDraft {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TopicStatus>,
}

/// Approve or reject a contribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDecision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<RejectReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_note: Option<String>,
}

/// Either way a contribution leaves the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Approve,
    Reject,
}

impl Verdict {
    #[must_use]
    pub fn as_path(self) -> &'static str {
        match self {
            Verdict::Approve => "approve",
            Verdict::Reject => "reject",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "approve" => Some(Verdict::Approve),
            "reject" => Some(Verdict::Reject),
            _ => None,
        }
    }
}

/// Outcome of a CSV vocabulary import.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub imported_rows: u64,
    #[serde(default)]
    pub failed_rows: u64,
    #[serde(default)]
    pub errors: Vec<ImportRowError>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ImportRowError {
    #[serde(default)]
    pub row: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A file streamed back from the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// `filename="..."` from a `Content-Disposition` header.
fn disposition_file_name(header: &str) -> Option<String> {
    let lower = header.to_ascii_lowercase();
    let start = lower.find("filename=\"")? + "filename=\"".len();
    let rest = &header[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string()).filter(|name| !name.trim().is_empty())
}

//
// ─── ENDPOINTS ─────────────────────────────────────────────────────────────────
//

impl AuthedApi {
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport, status or decode failure.
    pub async fn admin_users(&self, query: &ListQuery) -> Result<Page<UserProfile>, ApiError> {
        self.get_json("/admin/users", &query.to_query(), "Could not load users.")
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the account cannot be created.
    pub async fn create_user(&self, user: &NewUser) -> Result<Option<UserProfile>, ApiError> {
        self.send(
            Method::POST,
            "/admin/users",
            Some(user),
            "Could not create the account. Please try again.",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the account cannot be updated.
    pub async fn update_user(
        &self,
        id: &UserId,
        update: &UserUpdate,
    ) -> Result<Option<UserProfile>, ApiError> {
        self.send(
            Method::PATCH,
            &format!("/admin/users/{}", seg(id.as_str())),
            Some(update),
            "Could not update the account.",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the password cannot be reset.
    pub async fn reset_password(&self, id: &UserId, new_password: &str) -> Result<(), ApiError> {
        self.send::<_, Value>(
            Method::POST,
            &format!("/admin/users/{}/reset-password", seg(id.as_str())),
            Some(&PasswordReset { new_password }),
            "Could not reset the password.",
        )
        .await?;
        Ok(())
    }

    /// Soft-delete an account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the account cannot be deleted.
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        self.send_empty::<Value>(
            Method::DELETE,
            &format!("/admin/users/{}", seg(id.as_str())),
            "Could not perform the action.",
        )
        .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the account cannot be restored.
    pub async fn restore_user(&self, id: &UserId) -> Result<(), ApiError> {
        self.send_empty::<Value>(
            Method::POST,
            &format!("/admin/users/{}/restore", seg(id.as_str())),
            "Could not perform the action.",
        )
        .await?;
        Ok(())
    }

    /// Topic list with `name`, `slug` and `status` filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport, status or decode failure.
    pub async fn admin_topics(&self, query: &ListQuery) -> Result<Page<Topic>, ApiError> {
        self.get_json("/admin/topics", &query.to_query(), "Could not load topics.")
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the topic cannot be created.
    pub async fn create_topic(&self, draft: &TopicDraft) -> Result<Option<Topic>, ApiError> {
        self.send(
            Method::POST,
            "/admin/topics",
            Some(draft),
            "Could not create the topic.",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the topic cannot be updated.
    pub async fn update_topic(
        &self,
        id: &TopicId,
        draft: &TopicDraft,
    ) -> Result<Option<Topic>, ApiError> {
        self.send(
            Method::PATCH,
            &format!("/admin/topics/{}", seg(id.as_str())),
            Some(draft),
            "Could not update the topic.",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the topic cannot be deleted.
    pub async fn delete_topic(&self, id: &TopicId) -> Result<(), ApiError> {
        self.send_empty::<Value>(
            Method::DELETE,
            &format!("/admin/topics/{}", seg(id.as_str())),
            "Could not delete the topic.",
        )
        .await?;
        Ok(())
    }

    /// CSV export of the topics matching `filters` (paging is ignored).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the export fails.
    pub async fn export_topics(&self, filters: &ListQuery) -> Result<ExportFile, ApiError> {
        let response = self
            .get_bytes(
                "/admin/topics/export",
                filters.filters(),
                "Could not export topics.",
            )
            .await?;
        let header = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let file_name = header(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| disposition_file_name(&value))
            .unwrap_or_else(|| "topics.csv".to_string());
        let content_type = header(reqwest::header::CONTENT_TYPE)
            .unwrap_or_else(|| "text/csv; charset=utf-8".to_string());
        let bytes = response.bytes().await?.to_vec();

        Ok(ExportFile {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Moderation list with `query`, `topicId`, `language` and `status` filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport, status or decode failure.
    pub async fn admin_vocab(&self, query: &ListQuery) -> Result<Page<Vocabulary>, ApiError> {
        self.get_json("/admin/vocab", &query.to_query(), "Could not load vocabulary.")
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport, status or decode failure.
    pub async fn admin_vocab_detail(&self, id: &VocabId) -> Result<Vocabulary, ApiError> {
        self.get_json(
            &format!("/admin/vocab/{}", seg(id.as_str())),
            &[],
            "Could not load the word.",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the word cannot be updated.
    pub async fn update_vocab(
        &self,
        id: &VocabId,
        draft: &VocabDraft,
    ) -> Result<Option<Vocabulary>, ApiError> {
        self.send(
            Method::PATCH,
            &format!("/admin/vocab/{}", seg(id.as_str())),
            Some(draft),
            "Could not update the word.",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the word cannot be deleted.
    pub async fn delete_vocab(&self, id: &VocabId) -> Result<(), ApiError> {
        self.send_empty::<Value>(
            Method::DELETE,
            &format!("/admin/vocab/{}", seg(id.as_str())),
            "Could not delete the word.",
        )
        .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the moderation call is refused.
    pub async fn moderate_vocab(
        &self,
        id: &VocabId,
        verdict: Verdict,
    ) -> Result<Option<Vocabulary>, ApiError> {
        self.send_empty(
            Method::PATCH,
            &format!("/admin/vocab/{}/{}", seg(id.as_str()), verdict.as_path()),
            "Could not update the word.",
        )
        .await
    }

    /// Upload a CSV file for import.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the upload fails or the API returns no result.
    pub async fn import_vocab_csv(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ImportResult, ApiError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = Form::new().part("file", part);
        let result: Option<ImportResult> = self
            .send_multipart("/admin/vocab/import", form, "Could not import the CSV file.")
            .await?;
        let result = result
            .ok_or_else(|| ApiError::Decode("the API returned no import result".to_string()))?;
        tracing::info!(
            total = result.total_rows,
            imported = result.imported_rows,
            failed = result.failed_rows,
            "vocabulary import finished"
        );
        Ok(result)
    }

    /// Review queue with `query`, `language` and `status` filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport, status or decode failure.
    pub async fn contribution_queue(
        &self,
        query: &ListQuery,
    ) -> Result<Page<ContributionQueueItem>, ApiError> {
        self.get_json(
            "/admin/vocab-contributions",
            &query.to_query(),
            "Could not load the review queue.",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport, status or decode failure.
    pub async fn contribution_detail(
        &self,
        id: &ContributionId,
    ) -> Result<ContributionDetail, ApiError> {
        self.get_json(
            &format!("/admin/vocab-contributions/{}", seg(id.as_str())),
            &[],
            "Could not load the contribution.",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the decision is refused.
    pub async fn review_contribution(
        &self,
        id: &ContributionId,
        verdict: Verdict,
        decision: &ReviewDecision,
    ) -> Result<Option<Value>, ApiError> {
        let fallback = match verdict {
            Verdict::Approve => "Could not approve the contribution.",
            Verdict::Reject => "Could not reject the contribution.",
        };
        let result = self
            .send(
                Method::POST,
                &format!(
                    "/admin/vocab-contributions/{}/{}",
                    seg(id.as_str()),
                    verdict.as_path()
                ),
                Some(decision),
                fallback,
            )
            .await?;
        tracing::info!(contribution = %id, verdict = verdict.as_path(), "contribution reviewed");
        Ok(result)
    }

    /// Filters: `userId`, `activityType`, `targetType`, `from`, `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport, status or decode failure.
    pub async fn activity_logs(&self, query: &ListQuery) -> Result<Page<ActivityLog>, ApiError> {
        self.get_json(
            "/admin/activity-logs",
            &query.to_query(),
            "Could not load activity logs.",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_name_from_disposition() {
        assert_eq!(
            disposition_file_name(r#"attachment; filename="topics-2024.csv""#).as_deref(),
            Some("topics-2024.csv")
        );
        assert_eq!(
            disposition_file_name(r#"attachment; FILENAME="x.csv""#).as_deref(),
            Some("x.csv")
        );
        assert_eq!(disposition_file_name("attachment"), None);
    }

    #[test]
    fn user_update_sends_nulls() {
        let update = UserUpdate {
            display_name: Some("Lan".into()),
            role: Some(Role::Admin),
            ..UserUpdate::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["role"], "ADMIN");
        assert_eq!(value["email"], Value::Null);
    }

    #[test]
    fn reject_decision_carries_reason() {
        let decision = ReviewDecision {
            reject_reason: Some(RejectReason::WrongLanguage),
            review_note: None,
        };
        assert_eq!(
            serde_json::to_value(&decision).unwrap(),
            json!({"rejectReason": "WRONG_LANGUAGE"})
        );
    }

    #[test]
    fn import_result_tolerates_missing_fields() {
        let result: ImportResult =
            serde_json::from_str(r#"{"totalRows":3,"errors":[{"row":2,"message":"missing term"}]}"#)
                .unwrap();
        assert_eq!(result.total_rows, 3);
        assert_eq!(result.imported_rows, 0);
        assert_eq!(result.errors[0].row, Some(2));
    }
}
