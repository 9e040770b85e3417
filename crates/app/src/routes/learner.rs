//! Learner dashboard pages and their mutations.

use std::collections::HashMap;

use api::PracticeApi;
use axum::extract::{Form, Path, Query};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use services::forms::{MyVocabForm, ProfileForm, VocabForm};
use services::listing::{LIBRARY, MY_CONTRIBUTIONS, MY_VOCAB, TOPICS};
use tracing::{info, warn};
use ui::render_page;
use ui::views::{
    ContributePage, ContributePageProps, DashboardPage, DashboardPageProps, Flash, LibraryPage,
    LibraryPageProps, MyVocabPage, MyVocabPageProps, SettingsPage, SettingsPageProps, TopicsPage,
    TopicsPageProps,
};
use ui::vm::map_recent_session;
use vocab_core::model::{ListQuery, PageRequest, VocabId};

use super::{after_mutation, all_topics_query, section, topic_choices};
use crate::auth::{Learner, session_history};
use crate::error::AppError;
use crate::flash::{flash_from, with_error, with_notice};

const LIBRARY_PATH: &str = "/dashboard/library";
const MY_VOCAB_PATH: &str = "/dashboard/vocab";
const CONTRIBUTE_PATH: &str = "/dashboard/vocab/new";
const SETTINGS_PATH: &str = "/dashboard/settings";

/// Sessions shown on the dashboard.
const DASHBOARD_RECENT: usize = 3;
const DASHBOARD_WORDS: u32 = 5;

type Params = Query<HashMap<String, String>>;

pub async fn dashboard(
    learner: Learner,
    jar: CookieJar,
    Query(params): Params,
) -> Result<Html<String>, AppError> {
    let words = ListQuery::new(PageRequest::new(0, DASHBOARD_WORDS).with_sort("updatedAt,desc"));
    let my_vocab = section(learner.api.my_vocab(&words).await)?;

    let mut recent = Vec::new();
    for id in session_history(&jar).ids().iter().take(DASHBOARD_RECENT) {
        match learner.api.session(id).await {
            Ok(session) => recent.push(map_recent_session(&session)),
            Err(err) if err.is_auth_failure() => return Err(err.into()),
            Err(err) => warn!(session = %id, error = %err, "recent session unavailable"),
        }
    }

    Ok(Html(render_page(
        DashboardPage,
        DashboardPageProps {
            viewer: learner.viewer,
            flash: flash_from(&params),
            my_vocab,
            recent,
        },
    )))
}

pub async fn library(learner: Learner, Query(params): Params) -> Result<Html<String>, AppError> {
    let query = LIBRARY.parse(&params);
    let topics = topic_choices(learner.api.topics(&all_topics_query()).await)?;
    let vocab = section(learner.api.vocab(&query).await)?;

    Ok(Html(render_page(
        LibraryPage,
        LibraryPageProps {
            viewer: learner.viewer,
            flash: flash_from(&params),
            query,
            topics,
            vocab,
        },
    )))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnForm {
    return_to: String,
}

impl ReturnForm {
    /// Only library pages are accepted as a destination.
    fn target(&self) -> &str {
        let target = self.return_to.trim();
        if target.starts_with(LIBRARY_PATH) {
            target
        } else {
            LIBRARY_PATH
        }
    }
}

pub async fn add_to_my_vocab(
    learner: Learner,
    Path(id): Path<String>,
    Form(form): Form<ReturnForm>,
) -> Result<Redirect, AppError> {
    let id = VocabId::new(id);
    let result = learner.api.add_to_my_vocab(&id).await;
    if result.is_ok() {
        info!(vocab = %id, "word added to My Vocab");
    }
    after_mutation(result, form.target(), "Added to My Vocab.")
}

pub async fn topics(learner: Learner, Query(params): Params) -> Result<Html<String>, AppError> {
    let query = TOPICS.parse(&params);
    let topics = section(learner.api.topics(&query).await)?;

    Ok(Html(render_page(
        TopicsPage,
        TopicsPageProps {
            viewer: learner.viewer,
            flash: flash_from(&params),
            query,
            topics,
        },
    )))
}

pub async fn my_vocab(learner: Learner, Query(params): Params) -> Result<Html<String>, AppError> {
    let query = MY_VOCAB.parse(&params);
    let entries = section(learner.api.my_vocab(&query).await)?;

    Ok(Html(render_page(
        MyVocabPage,
        MyVocabPageProps {
            viewer: learner.viewer,
            flash: flash_from(&params),
            query,
            entries,
        },
    )))
}

pub async fn update_my_vocab(
    learner: Learner,
    Path(id): Path<String>,
    Form(form): Form<MyVocabForm>,
) -> Result<Redirect, AppError> {
    let update = match form.into_update() {
        Ok(update) => update,
        Err(err) => return Ok(Redirect::to(&with_error(MY_VOCAB_PATH, &err.to_string()))),
    };
    let result = learner
        .api
        .update_my_vocab(&VocabId::new(id), &update)
        .await;
    after_mutation(result, MY_VOCAB_PATH, "Progress saved.")
}

pub async fn remove_from_my_vocab(
    learner: Learner,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let result = learner.api.remove_from_my_vocab(&VocabId::new(id)).await;
    after_mutation(result, MY_VOCAB_PATH, "Removed from My Vocab.")
}

async fn contribute_page(
    learner: Learner,
    flash: Flash,
    form: VocabForm,
    query: ListQuery,
) -> Result<Html<String>, AppError> {
    let topics = topic_choices(learner.api.topics(&all_topics_query()).await)?;
    let contributions = section(learner.api.my_contributions(&query).await)?;

    Ok(Html(render_page(
        ContributePage,
        ContributePageProps {
            viewer: learner.viewer,
            flash,
            form,
            topics,
            query,
            contributions,
        },
    )))
}

fn blank_vocab_form() -> VocabForm {
    VocabForm {
        language: VocabForm::DEFAULT_LANGUAGE.to_string(),
        ..VocabForm::default()
    }
}

pub async fn contribute_form(
    learner: Learner,
    Query(params): Params,
) -> Result<Html<String>, AppError> {
    let query = MY_CONTRIBUTIONS.parse(&params);
    contribute_page(learner, flash_from(&params), blank_vocab_form(), query).await
}

pub async fn contribute(
    learner: Learner,
    Form(form): Form<VocabForm>,
) -> Result<Response, AppError> {
    let query = MY_CONTRIBUTIONS.parse(&HashMap::new());
    let draft = match form.clone().into_draft(false) {
        Ok(draft) => draft,
        Err(err) => {
            let page = contribute_page(learner, Flash::error(err.to_string()), form, query).await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let result = learner.api.create_contribution(&draft).await;
    match result {
        Ok(_) => {
            info!(term = %draft.term, "contribution submitted");
            let target = with_notice(CONTRIBUTE_PATH, "Thanks! Your word was sent for review.");
            Ok(Redirect::to(&target).into_response())
        }
        Err(err) if err.is_auth_failure() => Err(err.into()),
        Err(err) => {
            warn!(error = %err, "contribution refused");
            let page = contribute_page(learner, Flash::error(err.message()), form, query).await?;
            Ok(page.into_response())
        }
    }
}

pub async fn settings(learner: Learner, Query(params): Params) -> Html<String> {
    Html(render_page(
        SettingsPage,
        SettingsPageProps {
            viewer: learner.viewer,
            flash: flash_from(&params),
        },
    ))
}

pub async fn update_settings(
    learner: Learner,
    Form(form): Form<ProfileForm>,
) -> Result<Redirect, AppError> {
    let update = match form.into_update() {
        Ok(update) => update,
        Err(err) => return Ok(Redirect::to(&with_error(SETTINGS_PATH, &err.to_string()))),
    };
    after_mutation(
        learner.api.update_me(&update).await,
        SETTINGS_PATH,
        "Profile saved.",
    )
}
