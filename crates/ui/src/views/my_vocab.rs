use dioxus::prelude::*;
use vocab_core::model::{LearningStatus, ListQuery, Page, UserProfile, UserVocabulary};

use super::components::{
    ActionButton, EmptyState, FilterField, FilterForm, LoadError, Pagination, choices,
};
use super::layout::{Chrome, Document, Flash};
use super::state::ViewState;
use crate::vm::format_timestamp;

const PATH: &str = "/dashboard/vocab";

fn learning_choices() -> Vec<(String, String)> {
    choices(LearningStatus::known(), |status| status.as_str().to_string(), |status| status.label().to_string())
}

#[derive(Props, Clone, PartialEq)]
pub struct MyVocabPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub query: ListQuery,
    pub entries: ViewState<Page<UserVocabulary>>,
}

#[component]
fn EntryRow(entry: UserVocabulary) -> Element {
    let base = format!("{PATH}/{}", urlencoding::encode(entry.vocabulary_id().as_str()));
    let current = entry.status().as_str().to_string();
    let progress = entry.progress_percent();
    let right = entry.right_count.unwrap_or(0);
    let wrong = entry.wrong_count.unwrap_or(0);
    let streak = entry.streak.unwrap_or(0);

    rsx! {
        tr {
            td { class: "term", "{entry.term()}" }
            td { "{entry.status().label()}" }
            td {
                div { class: "progress", style: "--progress: {progress}%",
                    span { "{progress}%" }
                }
            }
            td { "{right} / {wrong}" }
            td { "{streak}" }
            td { "{format_timestamp(entry.next_due_at.as_deref())}" }
            td {
                form { class: "inline-form", method: "post", action: "{base}/update",
                    select { name: "status",
                        for (value, label) in learning_choices() {
                            option { selected: value == current, value: "{value}", "{label}" }
                        }
                    }
                    input { r#type: "number", name: "progress", min: "0", max: "100", value: "{progress}" }
                    button { class: "btn btn-secondary", r#type: "submit", "Save" }
                }
                ActionButton {
                    action: format!("{base}/remove"),
                    label: "Remove".to_string(),
                    class: "btn btn-danger".to_string(),
                    confirm: Some(format!("Remove \"{}\" from My Vocab?", entry.term())),
                }
            }
        }
    }
}

#[component]
pub fn MyVocabPage(props: MyVocabPageProps) -> Element {
    let chrome = Chrome::learner("My Vocab", PATH, props.viewer.clone(), props.flash.clone());
    let fields = vec![
        FilterField::Search { key: "query", placeholder: "Search my words" },
        FilterField::Select { key: "status", label: "Status", options: learning_choices() },
    ];

    rsx! {
        Document { chrome,
            FilterForm { action: PATH.to_string(), query: props.query.clone(), fields, results: "results".to_string() }
            div { id: "results",
                match props.entries.clone() {
                    ViewState::Error(error) => rsx! {
                        LoadError { error }
                    },
                    ViewState::Ready(page) if page.is_empty() => rsx! {
                        EmptyState { message: "No words in My Vocab yet.".to_string() }
                        a { class: "btn btn-secondary", href: "/dashboard/library", "Browse the library" }
                    },
                    ViewState::Ready(page) => rsx! {
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Term" }
                                    th { "Status" }
                                    th { "Progress" }
                                    th { "Right / Wrong" }
                                    th { "Streak" }
                                    th { "Next due" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for entry in page.content.iter().cloned() {
                                    EntryRow { key: "{entry.id}", entry }
                                }
                            }
                        }
                        Pagination { path: PATH.to_string(), query: props.query.clone(), window: page.window(), total: page.total_elements }
                    },
                }
            }
        }
    }
}
