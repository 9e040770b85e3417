use dioxus::prelude::*;
use services::forms::VocabForm;
use vocab_core::model::{ListQuery, Page, Topic, UserProfile, VocabStatus, Vocabulary};

use super::super::components::{
    ActionButton, EmptyState, FilterField, FilterForm, LoadError, Pagination, StatusPill,
    choices, href,
};
use super::super::layout::{Chrome, Document, Flash};
use super::super::state::ViewState;
use super::super::vocab_fields::{VocabFields, form_from_vocab};
use crate::vm::format_timestamp;

const PATH: &str = "/admin/vocab";

fn status_tone(status: &VocabStatus) -> &'static str {
    match status {
        VocabStatus::Approved => "correct",
        VocabStatus::Rejected => "wrong",
        VocabStatus::Pending | VocabStatus::Unknown(_) => "pending",
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct AdminVocabPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub query: ListQuery,
    pub vocab: ViewState<Page<Vocabulary>>,
    pub topics: Vec<Topic>,
    /// Entry opened for editing with `?edit=<id>`.
    pub editing: Option<ViewState<Vocabulary>>,
    pub draft: VocabForm,
}

#[component]
fn VocabRow(vocab: Vocabulary, query: ListQuery) -> Element {
    let id = vocab.id.to_string();
    let base = format!("{PATH}/{}", urlencoding::encode(&id));
    let mut edit_pairs = query.to_query();
    edit_pairs.push(("edit".to_string(), id));
    let edit = href(PATH, &edit_pairs);
    let status = vocab.status.clone().unwrap_or(VocabStatus::Pending);
    let term = vocab.term().to_string();
    let topic_count = vocab.topic_ids.as_ref().map_or(0, Vec::len);

    rsx! {
        tr {
            td {
                strong { "{term}" }
                if let Some(definition) = vocab.definition.as_ref() {
                    br {}
                    span { class: "muted", "{definition}" }
                }
            }
            td { {vocab.language.clone().unwrap_or_default()} }
            td { StatusPill { label: status.label().to_string(), tone: status_tone(&status).to_string() } }
            td { "{topic_count}" }
            td { "{format_timestamp(vocab.created_at.as_deref())}" }
            td { class: "row-actions",
                a { class: "btn btn-ghost", href: "{edit}", "Edit" }
                if status != VocabStatus::Approved {
                    ActionButton { action: format!("{base}/approve"), label: "Approve".to_string() }
                }
                if status != VocabStatus::Rejected {
                    ActionButton { action: format!("{base}/reject"), label: "Reject".to_string() }
                }
                ActionButton {
                    action: format!("{base}/delete"),
                    label: "Delete".to_string(),
                    class: "btn btn-danger".to_string(),
                    confirm: Some(format!("Delete \"{term}\" from the library?")),
                }
            }
        }
    }
}

#[component]
fn EditPanel(editing: ViewState<Vocabulary>, topics: Vec<Topic>) -> Element {
    match editing {
        ViewState::Error(error) => rsx! {
            section { class: "card",
                LoadError { error }
            }
        },
        ViewState::Ready(vocab) => {
            let action = format!("{PATH}/{}/update", urlencoding::encode(vocab.id.as_str()));
            let form = form_from_vocab(&vocab);
            rsx! {
                section { class: "card edit-panel",
                    h2 { "Edit \"{vocab.term()}\"" }
                    form { class: "form", method: "post", action: "{action}",
                        VocabFields { form, topics }
                        button { class: "btn btn-primary", r#type: "submit", "Save changes" }
                        a { class: "btn btn-ghost", href: PATH, "Cancel" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn AdminVocabPage(props: AdminVocabPageProps) -> Element {
    let chrome = Chrome::admin("Vocabulary", PATH, props.viewer.clone(), props.flash.clone());
    let topic_options = props
        .topics
        .iter()
        .map(|topic| (topic.id.to_string(), topic.name().to_string()))
        .collect::<Vec<_>>();
    let fields = vec![
        FilterField::Search { key: "query", placeholder: "Search terms" },
        FilterField::Select {
            key: "status",
            label: "Status",
            options: choices(VocabStatus::known(), |status| status.as_str().to_string(), |status| status.label().to_string()),
        },
        FilterField::Select {
            key: "language",
            label: "Language",
            options: vec![("en".to_string(), "English".to_string()), ("vi".to_string(), "Vietnamese".to_string())],
        },
        FilterField::Select { key: "topicId", label: "Topic", options: topic_options },
    ];

    rsx! {
        Document { chrome,
            div { class: "toolbar",
                a { class: "btn btn-secondary", href: "/admin/vocab/import", "Import CSV" }
            }
            if let Some(editing) = props.editing.clone() {
                EditPanel { editing, topics: props.topics.clone() }
            }
            details { class: "card",
                summary { "Add a word" }
                form { class: "form", method: "post", action: PATH,
                    VocabFields { form: props.draft.clone(), topics: props.topics.clone() }
                    button { class: "btn btn-primary", r#type: "submit", "Add" }
                }
            }
            FilterForm { action: PATH.to_string(), query: props.query.clone(), fields, results: "results".to_string() }
            div { id: "results",
                match props.vocab.clone() {
                    ViewState::Error(error) => rsx! {
                        LoadError { error }
                    },
                    ViewState::Ready(page) if page.is_empty() => rsx! {
                        EmptyState { message: "No vocabulary matches these filters.".to_string() }
                    },
                    ViewState::Ready(page) => rsx! {
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Term" }
                                    th { "Language" }
                                    th { "Status" }
                                    th { "Topics" }
                                    th { "Created" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for vocab in page.content.iter().cloned() {
                                    VocabRow { key: "{vocab.id}", vocab, query: props.query.clone() }
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
