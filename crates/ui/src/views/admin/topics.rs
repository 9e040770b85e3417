use dioxus::prelude::*;
use vocab_core::model::{ListQuery, Page, Topic, TopicStatus, UserProfile};

use super::super::components::{
    ActionButton, EmptyState, FilterField, FilterForm, LoadError, Pagination, SelectField,
    TextArea, TextField, choices, href,
};
use super::super::layout::{Chrome, Document, Flash};
use super::super::state::ViewState;
use crate::vm::format_timestamp;

const PATH: &str = "/admin/topics";

fn status_choices() -> Vec<(String, String)> {
    choices(
        TopicStatus::known(),
        |status| status.as_str().to_string(),
        |status| status.label().to_string(),
    )
}

#[derive(Props, Clone, PartialEq)]
pub struct AdminTopicsPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub query: ListQuery,
    pub topics: ViewState<Page<Topic>>,
}

#[component]
fn TopicRow(topic: Topic) -> Element {
    let base = format!("{PATH}/{}", urlencoding::encode(topic.id.as_str()));
    let name = topic.name().to_string();
    let slug = topic.slug.clone().unwrap_or_default();
    let description = topic.description.clone().unwrap_or_default();

    rsx! {
        tr {
            td { strong { "{name}" } }
            td { code { "{slug}" } }
            td { "{topic.status().label()}" }
            td { "{format_timestamp(topic.updated_at.as_deref().or(topic.created_at.as_deref()))}" }
            td { class: "row-actions",
                details {
                    summary { "Edit" }
                    form { class: "form", method: "post", action: "{base}/update",
                        TextField { label: "Name".to_string(), name: "name".to_string(), value: name.clone(), required: true }
                        TextArea { label: "Description".to_string(), name: "description".to_string(), value: description }
                        SelectField { label: "Status".to_string(), name: "status".to_string(), value: topic.status().as_str().to_string(), options: status_choices() }
                        button { class: "btn btn-primary", r#type: "submit", "Save" }
                    }
                }
                ActionButton {
                    action: format!("{base}/delete"),
                    label: "Delete".to_string(),
                    class: "btn btn-danger".to_string(),
                    confirm: Some(format!("Delete topic \"{name}\"?")),
                }
            }
        }
    }
}

#[component]
pub fn AdminTopicsPage(props: AdminTopicsPageProps) -> Element {
    let chrome = Chrome::admin("Topics", PATH, props.viewer.clone(), props.flash.clone());
    let export = href("/admin/topics/export", props.query.filters());
    let fields = vec![
        FilterField::Search { key: "name", placeholder: "Name" },
        FilterField::Search { key: "slug", placeholder: "Slug" },
        FilterField::Select { key: "status", label: "Status", options: status_choices() },
    ];

    rsx! {
        Document { chrome,
            details { class: "card",
                summary { "Create topic" }
                form { class: "form", method: "post", action: PATH,
                    TextField { label: "Name".to_string(), name: "name".to_string(), value: String::new(), required: true }
                    TextArea { label: "Description".to_string(), name: "description".to_string(), value: String::new() }
                    SelectField { label: "Status".to_string(), name: "status".to_string(), value: TopicStatus::Active.as_str().to_string(), options: status_choices() }
                    button { class: "btn btn-primary", r#type: "submit", "Create" }
                }
            }
            div { class: "toolbar",
                a { class: "btn btn-secondary", href: "{export}", "data-no-overlay": "true", "Export CSV" }
            }
            FilterForm { action: PATH.to_string(), query: props.query.clone(), fields, results: "results".to_string() }
            div { id: "results",
                match props.topics.clone() {
                    ViewState::Error(error) => rsx! {
                        LoadError { error }
                    },
                    ViewState::Ready(page) if page.is_empty() => rsx! {
                        EmptyState { message: "No topics match these filters.".to_string() }
                    },
                    ViewState::Ready(page) => rsx! {
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Name" }
                                    th { "Slug" }
                                    th { "Status" }
                                    th { "Updated" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for topic in page.content.iter().cloned() {
                                    TopicRow { key: "{topic.id}", topic }
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
