use dioxus::prelude::*;
use vocab_core::model::{ListQuery, Page, Topic, UserProfile, Vocabulary};

use super::components::{EmptyState, FilterField, FilterForm, LoadError, Pagination, href};
use super::layout::{Chrome, Document, Flash};
use super::state::ViewState;

const PATH: &str = "/dashboard/library";

#[derive(Props, Clone, PartialEq)]
pub struct LibraryPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub query: ListQuery,
    pub topics: Vec<Topic>,
    pub vocab: ViewState<Page<Vocabulary>>,
}

#[component]
fn VocabCard(vocab: Vocabulary, return_to: String) -> Element {
    let action = format!("{PATH}/{}/add", urlencoding::encode(vocab.id.as_str()));
    let examples = vocab.example_texts();
    rsx! {
        article { class: "vocab-card",
            header {
                h3 { class: "term", "{vocab.term()}" }
                if let Some(phonetic) = vocab.phonetic.as_ref() {
                    span { class: "phonetic", "{phonetic}" }
                }
                if let Some(pos) = vocab.part_of_speech.as_ref() {
                    span { class: "muted", "{pos}" }
                }
            }
            if let Some(definition) = vocab.definition.as_ref() {
                p { "{definition}" }
            }
            if let Some(definition_vi) = vocab.definition_vi.as_ref() {
                p { class: "muted", "{definition_vi}" }
            }
            if !examples.is_empty() {
                ul { class: "examples",
                    for (index, example) in examples.iter().enumerate() {
                        li { key: "{index}", "{example}" }
                    }
                }
            }
            if vocab.in_my_vocab() {
                span { class: "pill pill--correct", "In My Vocab" }
            } else {
                form { class: "inline-form", method: "post", action: "{action}",
                    input { r#type: "hidden", name: "returnTo", value: "{return_to}" }
                    button { class: "btn btn-secondary", r#type: "submit", "Add to My Vocab" }
                }
            }
        }
    }
}

#[component]
pub fn LibraryPage(props: LibraryPageProps) -> Element {
    let chrome = Chrome::learner("Library", PATH, props.viewer.clone(), props.flash.clone());
    let topic_options = props
        .topics
        .iter()
        .map(|topic| (topic.id.to_string(), topic.name().to_string()))
        .collect::<Vec<_>>();
    let fields = vec![
        FilterField::Search { key: "query", placeholder: "Search words" },
        FilterField::Select { key: "topicId", label: "Topic", options: topic_options },
        FilterField::Select {
            key: "language",
            label: "Language",
            options: vec![("en".to_string(), "English".to_string()), ("vi".to_string(), "Vietnamese".to_string())],
        },
    ];
    let return_to = href(PATH, &props.query.to_query());

    rsx! {
        Document { chrome,
            FilterForm { action: PATH.to_string(), query: props.query.clone(), fields, results: "results".to_string() }
            div { id: "results",
                match props.vocab.clone() {
                    ViewState::Error(error) => rsx! {
                        LoadError { error }
                    },
                    ViewState::Ready(page) if page.is_empty() => rsx! {
                        EmptyState { message: "No words match these filters.".to_string() }
                    },
                    ViewState::Ready(page) => rsx! {
                        div { class: "vocab-grid",
                            for vocab in page.content.iter().cloned() {
                                VocabCard { key: "{vocab.id}", vocab, return_to: return_to.clone() }
                            }
                        }
                        Pagination { path: PATH.to_string(), query: props.query.clone(), window: page.window(), total: page.total_elements }
                    },
                }
            }
        }
    }
}
