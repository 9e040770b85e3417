use dioxus::prelude::*;
use vocab_core::model::{
    Contribution, ContributionDetail, ContributionQueueItem, ContributionStatus, ListQuery, Page,
    RejectReason, UserProfile,
};

use super::super::components::{
    EmptyState, FilterField, FilterForm, LoadError, Pagination, SelectField, TextArea, choices,
    href,
};
use super::super::layout::{Chrome, Document, Flash};
use super::super::state::ViewState;
use crate::vm::{MISSING, format_timestamp};

const PATH: &str = "/admin/reviews";

fn or_missing(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

fn selected_href(query: &ListQuery, id: &str) -> String {
    let mut pairs = query.to_query();
    pairs.push(("selected".to_string(), id.to_string()));
    href(PATH, &pairs)
}

#[derive(Props, Clone, PartialEq)]
pub struct AdminReviewsPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub query: ListQuery,
    pub queue: ViewState<Page<ContributionQueueItem>>,
    /// Contribution opened with `?selected=<id>`.
    pub selected: Option<ViewState<ContributionDetail>>,
}

#[component]
fn ReviewForm(contribution: Contribution) -> Element {
    let action = format!("{PATH}/{}", urlencoding::encode(contribution.id.as_str()));
    let reasons = choices(RejectReason::known(), |reason| reason.as_str().to_string(), |reason| reason.label().to_string());

    rsx! {
        form { class: "form review-form", method: "post", action: "{action}",
            fieldset {
                legend { "Decision" }
                label {
                    input { r#type: "radio", name: "decision", value: "approve", checked: true }
                    " Approve"
                }
                label {
                    input { r#type: "radio", name: "decision", value: "reject" }
                    " Reject"
                }
            }
            SelectField {
                label: "Reject reason".to_string(),
                name: "rejectReason".to_string(),
                value: RejectReason::Duplicate.as_str().to_string(),
                options: reasons,
            }
            TextArea { label: "Review note".to_string(), name: "reviewNote".to_string(), value: String::new() }
            button { class: "btn btn-primary", r#type: "submit", "Submit review" }
        }
    }
}

#[component]
fn DetailPanel(detail: ContributionDetail) -> Element {
    let Some(contribution) = detail.contribution.clone() else {
        return rsx! {
            EmptyState { message: "This contribution no longer exists.".to_string() }
        };
    };
    let status = contribution.status();
    let examples = contribution.example_texts();
    let topics = contribution
        .topic_ids
        .iter()
        .flatten()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let logs = detail.review_logs.clone().unwrap_or_default();

    rsx! {
        section { class: "card review-detail",
            h2 { {contribution.term.clone().unwrap_or_else(|| MISSING.to_string())} }
            dl { class: "facts",
                dt { "Contributor" }
                dd { "{contribution.contributor()}" }
                dt { "Status" }
                dd { "{status.label()}" }
                dt { "Language" }
                dd { {or_missing(contribution.language.as_deref())} }
                dt { "Part of speech" }
                dd { {or_missing(contribution.part_of_speech.as_deref())} }
                dt { "Phonetic" }
                dd { {or_missing(contribution.phonetic.as_deref())} }
                dt { "Definition" }
                dd { {or_missing(contribution.definition.as_deref())} }
                dt { "Definition (VI)" }
                dd { {or_missing(contribution.definition_vi.as_deref())} }
                dt { "Topics" }
                dd { {or_missing(Some(topics.as_str()))} }
                dt { "Reject reason" }
                dd { {RejectReason::describe(contribution.reject_reason.as_deref())} }
                dt { "Review note" }
                dd { {or_missing(contribution.review_note.as_deref())} }
                dt { "Submitted" }
                dd { "{format_timestamp(contribution.created_at.as_deref())}" }
            }
            if !examples.is_empty() {
                ul { class: "examples",
                    for (index, example) in examples.iter().enumerate() {
                        li { key: "{index}", "{example}" }
                    }
                }
            }
            if status.is_reviewable() {
                ReviewForm { contribution: contribution.clone() }
            } else {
                p { class: "muted", "This contribution has already been decided." }
            }
            h3 { "History" }
            if logs.is_empty() {
                p { class: "muted", "No review history." }
            } else {
                ol { class: "review-log",
                    for log in logs {
                        li { key: "{log.id}",
                            strong { {log.action.as_ref().map_or(MISSING, |action| action.label()).to_string()} }
                            " by "
                            {log.actor_display_name.clone().unwrap_or_else(|| MISSING.to_string())}
                            span { class: "muted", " {format_timestamp(log.created_at.as_deref())}" }
                            if let Some(note) = log.note.as_ref() {
                                p { "{note}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn AdminReviewsPage(props: AdminReviewsPageProps) -> Element {
    let chrome = Chrome::admin("Contribution reviews", PATH, props.viewer.clone(), props.flash.clone());
    let fields = vec![
        FilterField::Search { key: "query", placeholder: "Search terms" },
        FilterField::Select {
            key: "status",
            label: "Status",
            options: choices(ContributionStatus::known(), |status| status.as_str().to_string(), |status| status.label().to_string()),
        },
        FilterField::Select {
            key: "language",
            label: "Language",
            options: vec![("en".to_string(), "English".to_string()), ("vi".to_string(), "Vietnamese".to_string())],
        },
    ];

    rsx! {
        Document { chrome,
            div { class: "split",
                div { class: "split-main",
                    FilterForm { action: PATH.to_string(), query: props.query.clone(), fields, results: "results".to_string() }
                    div { id: "results",
                        match props.queue.clone() {
                            ViewState::Error(error) => rsx! {
                                LoadError { error }
                            },
                            ViewState::Ready(page) if page.is_empty() => rsx! {
                                EmptyState { message: "The review queue is empty.".to_string() }
                            },
                            ViewState::Ready(page) => rsx! {
                                ul { class: "queue",
                                    for item in page.content.iter() {
                                        li { key: "{item.id}", class: "queue-item",
                                            a {
                                                href: selected_href(&props.query, item.id.as_str()),
                                                {item.term.clone().unwrap_or_else(|| MISSING.to_string())}
                                            }
                                            span { class: "muted", " {item.contributor()}" }
                                            span { class: "pill", "{item.status().label()}" }
                                            span { class: "muted", "{format_timestamp(item.created_at.as_deref())}" }
                                        }
                                    }
                                }
                                Pagination { path: PATH.to_string(), query: props.query.clone(), window: page.window(), total: page.total_elements }
                            },
                        }
                    }
                }
                aside { class: "split-side",
                    match props.selected.clone() {
                        None => rsx! {
                            EmptyState { message: "Select a contribution to review it.".to_string() }
                        },
                        Some(ViewState::Error(error)) => rsx! {
                            LoadError { error }
                        },
                        Some(ViewState::Ready(detail)) => rsx! {
                            DetailPanel { detail }
                        },
                    }
                }
            }
        }
    }
}
