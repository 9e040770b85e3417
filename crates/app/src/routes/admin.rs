//! Admin console: users, topics, vocabulary moderation, import, reviews, logs.

use std::collections::HashMap;

use api::Verdict;
use axum::extract::{Form, Multipart, Path, Query};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use services::forms::{
    NewUserForm, PasswordResetForm, ReviewForm, TopicForm, UserEditForm, VocabForm,
};
use services::{ImportError, import};
use services::listing::{ACTIVITY_LOGS, ADMIN_TOPICS, ADMIN_USERS, ADMIN_VOCAB, REVIEWS};
use tracing::{info, warn};
use ui::render_page;
use ui::views::{
    AdminActivityPage, AdminActivityPageProps, AdminImportPage, AdminImportPageProps,
    AdminOverviewPage, AdminOverviewPageProps, AdminReviewsPage, AdminReviewsPageProps,
    AdminTopicsPage, AdminTopicsPageProps, AdminUsersPage, AdminUsersPageProps, AdminVocabPage,
    AdminVocabPageProps, Flash, INTENT_IMPORT,
};
use vocab_core::model::{
    ContributionId, ContributionStatus, ListQuery, PageRequest, TopicId, UserId, VocabId,
};

use super::{after_mutation, all_topics_query, section, topic_choices};
use crate::auth::{Admin, Learner};
use crate::error::AppError;
use crate::flash::{flash_from, with_error, with_notice};

const USERS_PATH: &str = "/admin/users";
const TOPICS_PATH: &str = "/admin/topics";
const VOCAB_PATH: &str = "/admin/vocab";
const REVIEWS_PATH: &str = "/admin/reviews";

const RECENT_ACTIVITY: u32 = 5;

type Params = Query<HashMap<String, String>>;

fn counting_query() -> ListQuery {
    ListQuery::new(PageRequest::new(0, 1))
}

pub async fn overview(Admin(admin): Admin, Query(params): Params) -> Result<Html<String>, AppError> {
    let api = &admin.api;
    let users = section(api.admin_users(&counting_query()).await.map(|page| page.total_elements))?;
    let topics = section(api.admin_topics(&counting_query()).await.map(|page| page.total_elements))?;
    let vocab = section(api.admin_vocab(&counting_query()).await.map(|page| page.total_elements))?;
    let pending = counting_query().filter("status", Some(ContributionStatus::Submitted.as_str()));
    let pending_reviews = section(
        api.contribution_queue(&pending)
            .await
            .map(|page| page.total_elements),
    )?;
    let latest = ListQuery::new(PageRequest::new(0, RECENT_ACTIVITY).with_sort("createdAt,desc"));
    let activity = section(api.activity_logs(&latest).await.map(|page| page.content))?;

    Ok(Html(render_page(
        AdminOverviewPage,
        AdminOverviewPageProps {
            viewer: admin.viewer,
            flash: flash_from(&params),
            users,
            topics,
            vocab,
            pending_reviews,
            activity,
        },
    )))
}

//
// ─── USERS ─────────────────────────────────────────────────────────────────────
//

pub async fn users(Admin(admin): Admin, Query(params): Params) -> Result<Html<String>, AppError> {
    let query = ADMIN_USERS.parse(&params);
    let users = section(admin.api.admin_users(&query).await)?;

    Ok(Html(render_page(
        AdminUsersPage,
        AdminUsersPageProps {
            viewer: admin.viewer,
            flash: flash_from(&params),
            query,
            users,
        },
    )))
}

pub async fn create_user(
    Admin(admin): Admin,
    Form(form): Form<NewUserForm>,
) -> Result<Redirect, AppError> {
    let request = match form.into_request() {
        Ok(request) => request,
        Err(err) => return Ok(Redirect::to(&with_error(USERS_PATH, &err.to_string()))),
    };
    let result = admin.api.create_user(&request).await;
    if result.is_ok() {
        info!(email = %request.email, "account created by admin");
    }
    after_mutation(result, USERS_PATH, "Account created.")
}

pub async fn update_user(
    Admin(admin): Admin,
    Path(id): Path<String>,
    Form(form): Form<UserEditForm>,
) -> Result<Redirect, AppError> {
    let update = match form.into_update() {
        Ok(update) => update,
        Err(err) => return Ok(Redirect::to(&with_error(USERS_PATH, &err.to_string()))),
    };
    let result = admin.api.update_user(&UserId::new(id), &update).await;
    after_mutation(result, USERS_PATH, "Account updated.")
}

pub async fn reset_password(
    Admin(admin): Admin,
    Path(id): Path<String>,
    Form(form): Form<PasswordResetForm>,
) -> Result<Redirect, AppError> {
    let password = match form.into_password() {
        Ok(password) => password,
        Err(err) => return Ok(Redirect::to(&with_error(USERS_PATH, &err.to_string()))),
    };
    let result = admin.api.reset_password(&UserId::new(id), &password).await;
    after_mutation(result, USERS_PATH, "Password reset.")
}

pub async fn delete_user(Admin(admin): Admin, Path(id): Path<String>) -> Result<Redirect, AppError> {
    let result = admin.api.delete_user(&UserId::new(id)).await;
    after_mutation(result, USERS_PATH, "Account deleted.")
}

pub async fn restore_user(Admin(admin): Admin, Path(id): Path<String>) -> Result<Redirect, AppError> {
    let result = admin.api.restore_user(&UserId::new(id)).await;
    after_mutation(result, USERS_PATH, "Account restored.")
}

/// The activity log filtered to one account.
pub async fn user_activity(_admin: Admin, Path(id): Path<String>) -> Redirect {
    Redirect::to(&format!(
        "/admin/activity-logs?userId={}",
        urlencoding::encode(&id)
    ))
}

//
// ─── TOPICS ────────────────────────────────────────────────────────────────────
//

pub async fn topics(Admin(admin): Admin, Query(params): Params) -> Result<Html<String>, AppError> {
    let query = ADMIN_TOPICS.parse(&params);
    let topics = section(admin.api.admin_topics(&query).await)?;

    Ok(Html(render_page(
        AdminTopicsPage,
        AdminTopicsPageProps {
            viewer: admin.viewer,
            flash: flash_from(&params),
            query,
            topics,
        },
    )))
}

pub async fn create_topic(
    Admin(admin): Admin,
    Form(form): Form<TopicForm>,
) -> Result<Redirect, AppError> {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(err) => return Ok(Redirect::to(&with_error(TOPICS_PATH, &err.to_string()))),
    };
    after_mutation(
        admin.api.create_topic(&draft).await,
        TOPICS_PATH,
        "Topic created.",
    )
}

pub async fn update_topic(
    Admin(admin): Admin,
    Path(id): Path<String>,
    Form(form): Form<TopicForm>,
) -> Result<Redirect, AppError> {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(err) => return Ok(Redirect::to(&with_error(TOPICS_PATH, &err.to_string()))),
    };
    let result = admin.api.update_topic(&TopicId::new(id), &draft).await;
    after_mutation(result, TOPICS_PATH, "Topic updated.")
}

pub async fn delete_topic(Admin(admin): Admin, Path(id): Path<String>) -> Result<Redirect, AppError> {
    let result = admin.api.delete_topic(&TopicId::new(id)).await;
    after_mutation(result, TOPICS_PATH, "Topic deleted.")
}

/// CSV download of the topics matching the current filters.
pub async fn export_topics(Admin(admin): Admin, Query(params): Params) -> Result<Response, AppError> {
    let filters = ADMIN_TOPICS.parse(&params);
    match admin.api.export_topics(&filters).await {
        Ok(file) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                file.file_name.replace('"', "")
            );
            Ok((
                [
                    (header::CONTENT_TYPE, file.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                file.bytes,
            )
                .into_response())
        }
        Err(err) if err.is_auth_failure() => Err(err.into()),
        Err(err) => {
            warn!(error = %err, "topic export failed");
            Ok(Redirect::to(&with_error(TOPICS_PATH, &err.message())).into_response())
        }
    }
}

//
// ─── VOCABULARY ────────────────────────────────────────────────────────────────
//

fn blank_vocab_form() -> VocabForm {
    VocabForm {
        language: VocabForm::DEFAULT_LANGUAGE.to_string(),
        ..VocabForm::default()
    }
}

async fn vocab_page(
    admin: Learner,
    params: &HashMap<String, String>,
    flash: Flash,
    draft: VocabForm,
) -> Result<Html<String>, AppError> {
    let query = ADMIN_VOCAB.parse(params);
    let vocab = section(admin.api.admin_vocab(&query).await)?;
    let topics = topic_choices(admin.api.admin_topics(&all_topics_query()).await)?;
    let editing = match params.get("edit").map(|id| id.trim()).filter(|id| !id.is_empty()) {
        Some(id) => Some(section(admin.api.admin_vocab_detail(&VocabId::new(id)).await)?),
        None => None,
    };

    Ok(Html(render_page(
        AdminVocabPage,
        AdminVocabPageProps {
            viewer: admin.viewer,
            flash,
            query,
            vocab,
            topics,
            editing,
            draft,
        },
    )))
}

pub async fn vocab(Admin(admin): Admin, Query(params): Params) -> Result<Html<String>, AppError> {
    let flash = flash_from(&params);
    vocab_page(admin, &params, flash, blank_vocab_form()).await
}

/// New words go through the contribution endpoint and need a topic.
pub async fn create_vocab(
    Admin(admin): Admin,
    Form(form): Form<VocabForm>,
) -> Result<Response, AppError> {
    let params = HashMap::new();
    let draft = match form.clone().into_draft(true) {
        Ok(draft) => draft,
        Err(err) => {
            let page = vocab_page(admin, &params, Flash::error(err.to_string()), form).await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let result = admin.api.create_contribution(&draft).await;
    match result {
        Ok(_) => {
            info!(term = %draft.term, "word created by admin");
            Ok(Redirect::to(&with_notice(VOCAB_PATH, "Word created.")).into_response())
        }
        Err(err) if err.is_auth_failure() => Err(err.into()),
        Err(err) => {
            warn!(error = %err, "word creation refused");
            let page = vocab_page(admin, &params, Flash::error(err.message()), form).await?;
            Ok(page.into_response())
        }
    }
}

pub async fn update_vocab(
    Admin(admin): Admin,
    Path(id): Path<String>,
    Form(form): Form<VocabForm>,
) -> Result<Redirect, AppError> {
    let edit_path = format!("{VOCAB_PATH}?edit={}", urlencoding::encode(&id));
    let draft = match form.into_draft(true) {
        Ok(draft) => draft,
        Err(err) => return Ok(Redirect::to(&with_error(&edit_path, &err.to_string()))),
    };
    let result = admin.api.update_vocab(&VocabId::new(id), &draft).await;
    after_mutation(result, VOCAB_PATH, "Word updated.")
}

pub async fn approve_vocab(Admin(admin): Admin, Path(id): Path<String>) -> Result<Redirect, AppError> {
    let result = admin
        .api
        .moderate_vocab(&VocabId::new(id), Verdict::Approve)
        .await;
    after_mutation(result, VOCAB_PATH, "Word approved.")
}

pub async fn reject_vocab(Admin(admin): Admin, Path(id): Path<String>) -> Result<Redirect, AppError> {
    let result = admin
        .api
        .moderate_vocab(&VocabId::new(id), Verdict::Reject)
        .await;
    after_mutation(result, VOCAB_PATH, "Word rejected.")
}

pub async fn delete_vocab(Admin(admin): Admin, Path(id): Path<String>) -> Result<Redirect, AppError> {
    let result = admin.api.delete_vocab(&VocabId::new(id)).await;
    after_mutation(result, VOCAB_PATH, "Word deleted.")
}

//
// ─── IMPORT ────────────────────────────────────────────────────────────────────
//

pub async fn import_form(Admin(admin): Admin, Query(params): Params) -> Html<String> {
    Html(render_page(
        AdminImportPage,
        AdminImportPageProps {
            viewer: admin.viewer,
            flash: flash_from(&params),
            file_name: None,
            preview: None,
            result: None,
        },
    ))
}

/// Preview the uploaded CSV and, when asked and the file is usable, send it on.
pub async fn import_csv(Admin(admin): Admin, mut multipart: Multipart) -> Result<Html<String>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut intent = String::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| AppError::BadRequest(err.body_text()))?;
                file = Some((file_name, bytes.to_vec()));
            }
            "intent" => {
                intent = field
                    .text()
                    .await
                    .map_err(|err| AppError::BadRequest(err.body_text()))?;
            }
            _ => {}
        }
    }

    let mut props = AdminImportPageProps {
        viewer: admin.viewer.clone(),
        flash: Flash::default(),
        file_name: None,
        preview: None,
        result: None,
    };
    let Some((file_name, bytes)) = file.filter(|(name, _)| !name.trim().is_empty()) else {
        props.flash = Flash::error("Choose a CSV file to import.");
        return Ok(Html(render_page(AdminImportPage, props)));
    };
    props.file_name = Some(file_name.clone());

    let preview = match import::preview(&file_name, &bytes) {
        Ok(preview) => preview,
        Err(err) => {
            props.flash = Flash::error(err.to_string());
            return Ok(Html(render_page(AdminImportPage, props)));
        }
    };
    let ready = preview.require_columns().and_then(|()| {
        if preview.can_import() {
            Ok(())
        } else {
            Err(ImportError::Empty)
        }
    });
    props.preview = Some(preview);

    if let Err(err) = ready {
        props.flash = Flash::error(err.to_string());
    } else if intent == INTENT_IMPORT {
        match admin.api.import_vocab_csv(&file_name, bytes).await {
            Ok(result) => {
                props.flash = Flash::notice(format!(
                    "Imported {} of {} row(s).",
                    result.imported_rows, result.total_rows
                ));
                props.result = Some(result);
            }
            Err(err) if err.is_auth_failure() => return Err(err.into()),
            Err(err) => {
                warn!(file = %file_name, error = %err, "vocabulary import failed");
                props.flash = Flash::error(err.message());
            }
        }
    }

    Ok(Html(render_page(AdminImportPage, props)))
}

//
// ─── REVIEWS ───────────────────────────────────────────────────────────────────
//

pub async fn reviews(Admin(admin): Admin, Query(params): Params) -> Result<Html<String>, AppError> {
    let query = REVIEWS.parse(&params);
    let queue = section(admin.api.contribution_queue(&query).await)?;
    let selected = match params.get("selected").map(|id| id.trim()).filter(|id| !id.is_empty()) {
        Some(id) => Some(section(
            admin
                .api
                .contribution_detail(&ContributionId::new(id))
                .await,
        )?),
        None => None,
    };

    Ok(Html(render_page(
        AdminReviewsPage,
        AdminReviewsPageProps {
            viewer: admin.viewer,
            flash: flash_from(&params),
            query,
            queue,
            selected,
        },
    )))
}

pub async fn review(
    Admin(admin): Admin,
    Path(id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> Result<Redirect, AppError> {
    let (verdict, decision) = match form.into_decision() {
        Ok(decision) => decision,
        Err(err) => return Ok(Redirect::to(&with_error(REVIEWS_PATH, &err.to_string()))),
    };
    let notice = match verdict {
        Verdict::Approve => "Contribution approved.",
        Verdict::Reject => "Contribution rejected.",
    };
    let result = admin
        .api
        .review_contribution(&ContributionId::new(id), verdict, &decision)
        .await;
    after_mutation(result, REVIEWS_PATH, notice)
}

//
// ─── ACTIVITY ──────────────────────────────────────────────────────────────────
//

pub async fn activity(Admin(admin): Admin, Query(params): Params) -> Result<Html<String>, AppError> {
    let query = ACTIVITY_LOGS.parse(&params);
    let logs = section(admin.api.activity_logs(&query).await)?;

    Ok(Html(render_page(
        AdminActivityPage,
        AdminActivityPageProps {
            viewer: admin.viewer,
            flash: flash_from(&params),
            query,
            logs,
        },
    )))
}
