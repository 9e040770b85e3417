//! Submitted HTML forms, normalised into API request bodies.
//!
//! Every field arrives as a string; blank means "not given".

use api::{MyVocabUpdate, NewUser, ProfileUpdate, ReviewDecision, TopicDraft, UserUpdate, Verdict, VocabDraft};
use serde::Deserialize;
use vocab_core::model::{AccountStatus, LearningStatus, RejectReason, Role, TopicId, TopicStatus};

use crate::error::FormError;

fn text(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn required(raw: &str, field: &'static str) -> Result<String, FormError> {
    text(raw).ok_or(FormError::Required(field))
}

fn number(raw: &str, field: &'static str) -> Result<Option<f64>, FormError> {
    match text(raw) {
        None => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Some)
            .ok_or(FormError::NotANumber { field }),
    }
}

fn daily_goal(raw: &str) -> Result<Option<i64>, FormError> {
    Ok(number(raw, "Daily goal")?.map(|goal| (goal.round() as i64).max(1)))
}

/// Parse an optional enum field, refusing values this build does not know.
fn known<T>(raw: &str, field: &'static str, parse: fn(&str) -> T, is_unknown: fn(&T) -> bool) -> Result<Option<T>, FormError> {
    let Some(value) = text(raw) else {
        return Ok(None);
    };
    let parsed = parse(&value);
    if is_unknown(&parsed) {
        Err(FormError::Invalid { field, value })
    } else {
        Ok(Some(parsed))
    }
}

/// Comma, semicolon or whitespace separated ids, blanks and repeats dropped.
#[must_use]
pub fn topic_ids(raw: &str) -> Vec<TopicId> {
    let mut ids: Vec<TopicId> = Vec::new();
    for id in raw.split([',', ';', ' ', '\t', '\r', '\n']).filter(|id| !id.is_empty()) {
        if !ids.iter().any(|existing| existing.as_str() == id) {
            ids.push(TopicId::new(id));
        }
    }
    ids
}

/// One example per line, trimmed, blanks dropped.
#[must_use]
pub fn example_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

//
// ─── LEARNER ───────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileForm {
    pub username: String,
    pub display_name: String,
    pub avatar_url: String,
    pub locale: String,
    pub time_zone: String,
    pub daily_goal: String,
}

impl ProfileForm {
    /// # Errors
    ///
    /// Returns `FormError::NotANumber` for a non-numeric daily goal.
    pub fn into_update(self) -> Result<ProfileUpdate, FormError> {
        Ok(ProfileUpdate {
            username: text(&self.username),
            display_name: text(&self.display_name),
            avatar_url: text(&self.avatar_url),
            locale: text(&self.locale),
            time_zone: text(&self.time_zone),
            daily_goal: daily_goal(&self.daily_goal)?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MyVocabForm {
    pub status: String,
    pub progress: String,
}

impl MyVocabForm {
    /// Progress is clamped into `0..=100`.
    ///
    /// # Errors
    ///
    /// Returns `FormError` for an unknown status or non-numeric progress.
    pub fn into_update(self) -> Result<MyVocabUpdate, FormError> {
        Ok(MyVocabUpdate {
            status: known(&self.status, "Status", LearningStatus::parse, |status| {
                matches!(status, LearningStatus::Unknown(_))
            })?,
            progress: number(&self.progress, "Progress")?.map(|progress| progress.clamp(0.0, 100.0)),
        })
    }
}

/// Vocabulary fields of the contribution form and the admin editor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VocabForm {
    pub term: String,
    pub definition: String,
    pub definition_vi: String,
    pub examples: String,
    pub phonetic: String,
    pub part_of_speech: String,
    pub language: String,
    pub topic_ids: String,
}

impl VocabForm {
    pub const DEFAULT_LANGUAGE: &'static str = "en";

    /// # Errors
    ///
    /// Returns `FormError::Required` when the term or definition is blank,
    /// or when `require_topics` is set and no topic was given.
    pub fn into_draft(self, require_topics: bool) -> Result<VocabDraft, FormError> {
        let term = required(&self.term, "Term")?;
        let definition = required(&self.definition, "Definition")?;
        let topic_ids = topic_ids(&self.topic_ids);
        if require_topics && topic_ids.is_empty() {
            return Err(FormError::Required("At least one topic"));
        }

        Ok(VocabDraft {
            term,
            definition,
            definition_vi: text(&self.definition_vi),
            examples: example_lines(&self.examples),
            phonetic: text(&self.phonetic),
            part_of_speech: text(&self.part_of_speech),
            language: text(&self.language).unwrap_or_else(|| Self::DEFAULT_LANGUAGE.to_string()),
            topic_ids,
        })
    }
}

//
// ─── ADMIN ─────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopicForm {
    pub name: String,
    pub description: String,
    pub status: String,
}

impl TopicForm {
    /// # Errors
    ///
    /// Returns `FormError` when the name is blank or the status unknown.
    pub fn into_draft(self) -> Result<TopicDraft, FormError> {
        Ok(TopicDraft {
            name: required(&self.name, "Topic name")?,
            description: self.description.trim().to_string(),
            status: known(&self.status, "Status", TopicStatus::parse, |status| {
                matches!(status, TopicStatus::Unknown(_))
            })?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUserForm {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: String,
}

impl NewUserForm {
    /// # Errors
    ///
    /// Returns `FormError` when a field is blank or the role unknown.
    pub fn into_request(self) -> Result<NewUser, FormError> {
        if self.password.is_empty() {
            return Err(FormError::Required("Password"));
        }
        Ok(NewUser {
            email: required(&self.email, "Email")?,
            display_name: required(&self.display_name, "Display name")?,
            role: known(&self.role, "Role", Role::parse, |role| matches!(role, Role::Unknown(_)))?,
            password: self.password,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserEditForm {
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub status: String,
    pub locale: String,
    pub time_zone: String,
    pub daily_goal: String,
}

impl UserEditForm {
    /// Blank fields become explicit `null`s in the request.
    ///
    /// # Errors
    ///
    /// Returns `FormError` for unknown roles or statuses and non-numeric goals.
    pub fn into_update(self) -> Result<UserUpdate, FormError> {
        Ok(UserUpdate {
            email: text(&self.email),
            username: text(&self.username),
            display_name: text(&self.display_name),
            role: known(&self.role, "Role", Role::parse, |role| matches!(role, Role::Unknown(_)))?,
            status: known(&self.status, "Status", AccountStatus::parse, |status| {
                matches!(status, AccountStatus::Unknown(_))
            })?,
            locale: text(&self.locale),
            time_zone: text(&self.time_zone),
            daily_goal: daily_goal(&self.daily_goal)?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordResetForm {
    pub new_password: String,
}

impl PasswordResetForm {
    /// # Errors
    ///
    /// Returns `FormError::Required` for an empty password.
    pub fn into_password(self) -> Result<String, FormError> {
        if self.new_password.is_empty() {
            Err(FormError::Required("New password"))
        } else {
            Ok(self.new_password)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewForm {
    pub decision: String,
    pub reject_reason: String,
    pub review_note: String,
}

impl ReviewForm {
    /// Rejections without a reason default to `DUPLICATE`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Invalid` for an unknown decision.
    pub fn into_decision(self) -> Result<(Verdict, ReviewDecision), FormError> {
        let verdict = Verdict::parse(&self.decision).ok_or_else(|| FormError::Invalid {
            field: "Decision",
            value: self.decision.trim().to_string(),
        })?;
        let reject_reason = match verdict {
            Verdict::Approve => None,
            Verdict::Reject => Some(
                text(&self.reject_reason)
                    .map_or(RejectReason::Duplicate, |reason| RejectReason::parse(&reason)),
            ),
        };
        Ok((
            verdict,
            ReviewDecision {
                reject_reason,
                review_note: text(&self.review_note),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_drops_blanks_and_floors_goal() {
        let update = ProfileForm {
            display_name: "  Ana ".into(),
            daily_goal: "0".into(),
            ..ProfileForm::default()
        }
        .into_update()
        .unwrap();
        assert_eq!(update.display_name.as_deref(), Some("Ana"));
        assert_eq!(update.username, None);
        assert_eq!(update.daily_goal, Some(1));

        let err = ProfileForm {
            daily_goal: "lots".into(),
            ..ProfileForm::default()
        }
        .into_update()
        .unwrap_err();
        assert_eq!(err, FormError::NotANumber { field: "Daily goal" });
    }

    #[test]
    fn my_vocab_progress_is_clamped() {
        let update = MyVocabForm {
            status: "learning".into(),
            progress: "140".into(),
        }
        .into_update()
        .unwrap();
        assert_eq!(update.status, Some(LearningStatus::Learning));
        assert_eq!(update.progress, Some(100.0));

        let err = MyVocabForm {
            status: "forgotten".into(),
            progress: String::new(),
        }
        .into_update()
        .unwrap_err();
        assert!(matches!(err, FormError::Invalid { field: "Status", .. }));
    }

    #[test]
    fn vocab_draft_splits_examples_and_topics() {
        let draft = VocabForm {
            term: " cat ".into(),
            definition: "a small animal".into(),
            examples: "The cat sleeps.\n\n  A cat purrs.  \r\n".into(),
            topic_ids: "3, 7;3 9".into(),
            ..VocabForm::default()
        }
        .into_draft(true)
        .unwrap();
        assert_eq!(draft.term, "cat");
        assert_eq!(draft.examples, vec!["The cat sleeps.", "A cat purrs."]);
        assert_eq!(
            draft.topic_ids,
            vec![TopicId::new("3"), TopicId::new("7"), TopicId::new("9")]
        );
        assert_eq!(draft.language, "en");
        assert_eq!(draft.definition_vi, None);
    }

    #[test]
    fn vocab_draft_requires_term_definition_and_topics() {
        let form = VocabForm {
            term: "cat".into(),
            definition: "animal".into(),
            ..VocabForm::default()
        };
        assert!(form.clone().into_draft(false).is_ok());
        assert_eq!(
            form.into_draft(true).unwrap_err(),
            FormError::Required("At least one topic")
        );
        assert_eq!(
            VocabForm::default().into_draft(false).unwrap_err(),
            FormError::Required("Term")
        );
    }

    #[test]
    fn topic_name_is_required() {
        assert_eq!(
            TopicForm::default().into_draft().unwrap_err(),
            FormError::Required("Topic name")
        );
        let draft = TopicForm {
            name: " Food ".into(),
            description: " things to eat ".into(),
            status: "inactive".into(),
        }
        .into_draft()
        .unwrap();
        assert_eq!(draft.name, "Food");
        assert_eq!(draft.description, "things to eat");
        assert_eq!(draft.status, Some(TopicStatus::Inactive));
    }

    #[test]
    fn user_forms() {
        let user = NewUserForm {
            email: "a@b.c".into(),
            password: "secret".into(),
            display_name: "A".into(),
            role: "admin".into(),
        }
        .into_request()
        .unwrap();
        assert_eq!(user.role, Some(Role::Admin));

        let update = UserEditForm {
            status: "BANNED".into(),
            ..UserEditForm::default()
        }
        .into_update()
        .unwrap();
        assert_eq!(update.status, Some(AccountStatus::Banned));
        assert_eq!(update.email, None);
        assert_eq!(update.daily_goal, None);
    }

    #[test]
    fn review_decisions() {
        let (verdict, decision) = ReviewForm {
            decision: "reject".into(),
            ..ReviewForm::default()
        }
        .into_decision()
        .unwrap();
        assert_eq!(verdict, Verdict::Reject);
        assert_eq!(decision.reject_reason, Some(RejectReason::Duplicate));

        let (verdict, decision) = ReviewForm {
            decision: "approve".into(),
            reject_reason: "LOW_QUALITY".into(),
            review_note: " looks good ".into(),
        }
        .into_decision()
        .unwrap();
        assert_eq!(verdict, Verdict::Approve);
        assert_eq!(decision.reject_reason, None);
        assert_eq!(decision.review_note.as_deref(), Some("looks good"));

        assert!(ReviewForm::default().into_decision().is_err());
    }
}
