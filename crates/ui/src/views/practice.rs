use dioxus::prelude::*;
use vocab_core::model::UserProfile;

use super::components::{EmptyState, LoadError, StatusPill};
use super::layout::{Chrome, Document, Flash};
use super::state::ViewState;
use crate::vm::{FillCellVm, InputVm, PracticeVm, QuestionVm, RecentSessionVm};

/// Form field carrying the answered item id.
pub const ITEM_FIELD: &str = "itemId";
/// Form field of free-text and choice answers.
pub const ANSWER_FIELD: &str = "answer";
/// Prefix of the per-slot fields of a fill-missing answer.
pub const SLOT_FIELD_PREFIX: &str = "slot-";

fn session_path(session_id: &str) -> String {
    format!("/dashboard/practice/{}", urlencoding::encode(session_id))
}

#[component]
fn StartDailyForm() -> Element {
    rsx! {
        form { class: "inline-form", method: "post", action: "/dashboard/practice/start",
            button { class: "btn btn-primary", r#type: "submit", "Start daily session" }
        }
    }
}

#[component]
pub fn RecentSessions(sessions: Vec<RecentSessionVm>) -> Element {
    if sessions.is_empty() {
        return rsx! {
            EmptyState { message: "No practice sessions yet. Start a daily session to begin.".to_string() }
        };
    }
    rsx! {
        ul { class: "session-list",
            for session in sessions {
                li { key: "{session.id}", class: "session-row",
                    a { class: "session-link", href: "{session.href}", "{session.title}" }
                    span { class: "session-status", "{session.status_label}" }
                    span { class: "muted", "{session.progress_label}" }
                    if let Some(score) = session.score_line.as_ref() {
                        span { class: "session-score", "{score}" }
                    }
                    span { class: "muted", "Started {session.started_at}" }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct PracticeListPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub recent: Vec<ViewState<RecentSessionVm>>,
}

#[component]
pub fn PracticeListPage(props: PracticeListPageProps) -> Element {
    let chrome = Chrome::learner("Practice", "/dashboard/practice", props.viewer.clone(), props.flash.clone());
    let ready = props
        .recent
        .iter()
        .filter_map(|state| state.as_ready().cloned())
        .collect::<Vec<_>>();
    let failed = props.recent.len() - ready.len();

    rsx! {
        Document { chrome,
            section { class: "card",
                h2 { "Daily practice" }
                p { class: "muted", "Each daily session mixes the words you are learning with a few new ones." }
                StartDailyForm {}
            }
            section { class: "card",
                h2 { "Open a session" }
                form { class: "inline-form", method: "get", action: "/dashboard/practice/open",
                    input { r#type: "text", name: "id", placeholder: "Session id", required: true }
                    button { class: "btn btn-secondary", r#type: "submit", "Open" }
                }
            }
            section { class: "card",
                h2 { "Recent sessions" }
                RecentSessions { sessions: ready }
                if failed > 0 {
                    p { class: "muted", "{failed} session(s) could not be loaded." }
                }
            }
        }
    }
}

#[component]
fn FillInput(cells: Vec<FillCellVm>, disabled: bool) -> Element {
    let cells = cells.into_iter().enumerate().map(|(position, cell)| match cell {
        FillCellVm::Fixed(ch) => rsx! {
            span { key: "{position}", class: "fill-fixed", "{ch}" }
        },
        FillCellVm::Slot { slot, value } => {
            let name = format!("{SLOT_FIELD_PREFIX}{slot}");
            rsx! {
                input {
                    key: "{position}",
                    class: "fill-slot",
                    r#type: "text",
                    name: "{name}",
                    value: "{value}",
                    maxlength: "1",
                    autocomplete: "off",
                    disabled,
                    "data-fill-slot": "{slot}",
                }
            }
        }
    });
    rsx! {
        div { class: "fill-row", {cells} }
        if !disabled {
            button { class: "btn btn-primary", r#type: "submit", "Submit" }
        }
    }
}

#[component]
fn QuestionCard(session_id: String, question: QuestionVm, active: bool) -> Element {
    let action = format!("{}/answer", session_path(&session_id));
    let path = session_path(&session_id);
    let locked = question.answered || question.loading || !active;
    let input = match question.input.clone() {
        InputVm::Fill(cells) => rsx! {
            FillInput { cells, disabled: locked }
        },
        InputVm::Choices { options, lettered } => {
            let buttons = options.into_iter().map(|option| {
                let class = if option.selected { "choice choice--selected" } else { "choice" };
                rsx! {
                    button {
                        key: "{option.value}",
                        class,
                        r#type: "submit",
                        name: ANSWER_FIELD,
                        value: "{option.value}",
                        disabled: locked,
                        if lettered {
                            span { class: "choice-letter", "{option.letter}." }
                        }
                        span { class: "choice-label", "{option.label}" }
                    }
                }
            });
            rsx! {
                div { class: "choices", {buttons} }
            }
        }
        InputVm::Text { value } => rsx! {
            div { class: "text-answer",
                input {
                    r#type: "text",
                    name: ANSWER_FIELD,
                    value: "{value}",
                    placeholder: "Type your answer",
                    autocomplete: "off",
                    disabled: locked,
                }
                if !locked {
                    button { class: "btn btn-primary", r#type: "submit", "Submit" }
                }
            }
        },
    };

    rsx! {
        article { class: "card question-card",
            header { class: "question-header",
                h2 { "{question.heading}" }
                StatusPill { label: question.status_label.clone(), tone: question.status_tone.to_string() }
            }
            p { class: "question-prompt", "{question.prompt}" }
            if !question.prompt_recognised {
                p { class: "muted", "This question format was not recognised. The raw payload is shown below." }
            }
            form { class: "answer-form", method: "post", action: "{action}",
                input { r#type: "hidden", name: ITEM_FIELD, value: "{question.item_id}" }
                {input}
            }
            if question.loading {
                p { class: "muted", "Submitting..." }
            }
            if let Some(message) = question.message.as_ref() {
                p { class: "question-message question-message--{question.status_tone}", "{message}" }
            }
            if let Some(expected) = question.expected.as_ref() {
                p { class: "question-expected", "Expected answer: "
                    strong { "{expected}" }
                }
            }
            nav { class: "question-nav",
                if let Some(previous) = question.previous {
                    a { class: "btn btn-ghost", href: "{path}?item={previous}", "Previous" }
                }
                if let Some(next) = question.next {
                    a { class: "btn btn-ghost", href: "{path}?item={next}", "Next" }
                }
            }
            details { class: "payload-debug",
                summary { "Raw payload" }
                pre { "{question.payload_debug}" }
            }
        }
    }
}

#[component]
fn SessionActions(session_id: String) -> Element {
    let path = session_path(&session_id);
    rsx! {
        div { class: "session-actions",
            form { method: "post", action: "{path}/complete",
                button { class: "btn btn-primary", r#type: "submit", "Complete session" }
            }
            form {
                method: "post",
                action: "{path}/abandon",
                "data-confirm": "Abandon this session? Unanswered questions will be lost.",
                button { class: "btn btn-danger", r#type: "submit", "Abandon" }
            }
        }
    }
}

#[component]
fn PracticeBody(practice: PracticeVm) -> Element {
    let path = session_path(&practice.session_id);
    let pills = practice.pills.iter().map(|pill| {
        let class = if pill.current {
            format!("item-pill item-pill--{} item-pill--current", pill.tone)
        } else {
            format!("item-pill item-pill--{}", pill.tone)
        };
        rsx! {
            a { key: "{pill.index}", class: "{class}", href: "{path}?item={pill.index}", "{pill.number}" }
        }
    });

    rsx! {
        section { class: "card session-summary",
            div { class: "session-meta",
                span { class: "session-status", "{practice.status_label}" }
                span { class: "muted", "{practice.answered}/{practice.total} answered" }
                if let Some(score) = practice.score_line.as_ref() {
                    span { class: "session-score", "{score}" }
                }
            }
            if practice.active {
                SessionActions { session_id: practice.session_id.clone() }
            }
        }
        if let Some(error) = practice.error.as_ref() {
            p { class: "flash flash--error", role: "alert", "{error}" }
        }
        if practice.total == 0 {
            EmptyState { message: "This session has no questions.".to_string() }
        } else {
            nav { class: "item-strip", {pills} }
        }
        if let Some(question) = practice.current.clone() {
            QuestionCard { session_id: practice.session_id.clone(), question, active: practice.active }
        }
        if !practice.active {
            section { class: "card",
                p { "This session is finished." }
                StartDailyForm {}
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct PracticeSessionPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub practice: ViewState<PracticeVm>,
}

#[component]
pub fn PracticeSessionPage(props: PracticeSessionPageProps) -> Element {
    let title = match &props.practice {
        ViewState::Ready(practice) => practice.title.clone(),
        ViewState::Error(_) => "Practice session".to_string(),
    };
    let chrome = Chrome::learner(title, "/dashboard/practice", props.viewer.clone(), props.flash.clone());

    rsx! {
        Document { chrome,
            a { class: "back-link", href: "/dashboard/practice", "All sessions" }
            match props.practice.clone() {
                ViewState::Ready(practice) => rsx! {
                    PracticeBody { practice }
                },
                ViewState::Error(error) => rsx! {
                    LoadError { error }
                },
            }
        }
    }
}
