use dioxus::prelude::*;
use vocab_core::model::{ListQuery, Page, Topic, UserProfile};

use super::components::{EmptyState, FilterField, FilterForm, LoadError, Pagination, href};
use super::layout::{Chrome, Document, Flash};
use super::state::ViewState;

const PATH: &str = "/dashboard/topics";

#[derive(Props, Clone, PartialEq)]
pub struct TopicsPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub query: ListQuery,
    pub topics: ViewState<Page<Topic>>,
}

#[component]
pub fn TopicsPage(props: TopicsPageProps) -> Element {
    let chrome = Chrome::learner("Topics", PATH, props.viewer.clone(), props.flash.clone());
    let fields = vec![FilterField::Search { key: "query", placeholder: "Search topics" }];

    rsx! {
        Document { chrome,
            FilterForm { action: PATH.to_string(), query: props.query.clone(), fields, results: "results".to_string() }
            div { id: "results",
                match props.topics.clone() {
                    ViewState::Error(error) => rsx! {
                        LoadError { error }
                    },
                    ViewState::Ready(page) if page.is_empty() => rsx! {
                        EmptyState { message: "No topics found.".to_string() }
                    },
                    ViewState::Ready(page) => rsx! {
                        div { class: "topic-grid",
                            for topic in page.content.iter() {
                                article { key: "{topic.id}", class: "topic-card",
                                    h3 { "{topic.name()}" }
                                    if let Some(description) = topic.description.as_ref() {
                                        p { class: "muted", "{description}" }
                                    }
                                    a {
                                        href: href("/dashboard/library", &[("topicId".to_string(), topic.id.to_string())]),
                                        "Browse words"
                                    }
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
