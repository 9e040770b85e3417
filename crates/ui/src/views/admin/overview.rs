use dioxus::prelude::*;
use vocab_core::model::{ActivityLog, UserProfile};

use super::super::components::{EmptyState, LoadError, StatusPill};
use super::super::layout::{Chrome, Document, Flash};
use super::super::state::ViewState;
use crate::vm::format_timestamp;

#[derive(Props, Clone, PartialEq)]
pub struct AdminOverviewPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub users: ViewState<u64>,
    pub topics: ViewState<u64>,
    pub vocab: ViewState<u64>,
    pub pending_reviews: ViewState<u64>,
    pub activity: ViewState<Vec<ActivityLog>>,
}

#[component]
fn StatTile(label: String, href: String, value: ViewState<u64>) -> Element {
    rsx! {
        a { class: "stat-tile", href: "{href}",
            span { class: "stat-label", "{label}" }
            match value {
                ViewState::Ready(count) => rsx! {
                    span { class: "stat-value", "{count}" }
                },
                ViewState::Error(_) => rsx! {
                    span { class: "stat-value stat-value--error", "—" }
                },
            }
        }
    }
}

#[component]
pub fn AdminOverviewPage(props: AdminOverviewPageProps) -> Element {
    let chrome = Chrome::admin("Admin overview", "/admin", props.viewer.clone(), props.flash.clone());

    rsx! {
        Document { chrome,
            div { class: "stat-grid",
                StatTile { label: "Users".to_string(), href: "/admin/users".to_string(), value: props.users.clone() }
                StatTile { label: "Topics".to_string(), href: "/admin/topics".to_string(), value: props.topics.clone() }
                StatTile { label: "Vocabulary".to_string(), href: "/admin/vocab".to_string(), value: props.vocab.clone() }
                StatTile { label: "Pending reviews".to_string(), href: "/admin/reviews".to_string(), value: props.pending_reviews.clone() }
            }
            section { class: "card",
                h2 { "Latest activity" }
                match props.activity.clone() {
                    ViewState::Error(error) => rsx! {
                        LoadError { error }
                    },
                    ViewState::Ready(logs) if logs.is_empty() => rsx! {
                        EmptyState { message: "No activity recorded yet.".to_string() }
                    },
                    ViewState::Ready(logs) => rsx! {
                        ul { class: "compact-list",
                            for log in logs {
                                li { key: "{log.id}",
                                    StatusPill {
                                        label: log.activity_type.as_ref().map_or("—", |kind| kind.label()).to_string(),
                                        tone: log.activity_type.as_ref().map_or("muted", |kind| kind.tone()).to_string(),
                                    }
                                    span { "{log.actor()}" }
                                    span { class: "muted", "{format_timestamp(log.created_at.as_deref())}" }
                                }
                            }
                        }
                        a { href: "/admin/activity-logs", "All activity" }
                    },
                }
            }
        }
    }
}
