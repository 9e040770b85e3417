use dioxus::prelude::*;
use vocab_core::model::{ActivityLog, ActivityType, ListQuery, Page, TargetType, UserProfile};

use super::super::components::{
    EmptyState, FilterField, FilterForm, LoadError, Pagination, StatusPill, choices,
};
use super::super::layout::{Chrome, Document, Flash};
use super::super::state::ViewState;
use crate::vm::{MISSING, format_timestamp};

const PATH: &str = "/admin/activity-logs";

#[derive(Props, Clone, PartialEq)]
pub struct AdminActivityPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub query: ListQuery,
    pub logs: ViewState<Page<ActivityLog>>,
}

#[component]
fn LogRow(log: ActivityLog) -> Element {
    let (label, tone) = log
        .activity_type
        .as_ref()
        .map_or((MISSING.to_string(), "muted"), |kind| (kind.label().to_string(), kind.tone()));
    let target = log
        .target_type
        .as_ref()
        .map_or_else(|| MISSING.to_string(), |target| target.label().to_string());
    let target_id = log.target_id.clone().unwrap_or_default();
    let metadata = log.metadata_pretty();

    rsx! {
        tr {
            td { "{format_timestamp(log.created_at.as_deref())}" }
            td { "{log.actor()}" }
            td { StatusPill { label, tone: tone.to_string() } }
            td {
                "{target}"
                if !target_id.is_empty() {
                    " "
                    code { "{target_id}" }
                }
            }
            td {
                if log.metadata.is_some() {
                    details {
                        summary { "Metadata" }
                        pre { "{metadata}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn AdminActivityPage(props: AdminActivityPageProps) -> Element {
    let chrome = Chrome::admin("Activity logs", PATH, props.viewer.clone(), props.flash.clone());
    let fields = vec![
        FilterField::Search { key: "userId", placeholder: "User id" },
        FilterField::Select {
            key: "activityType",
            label: "Activity",
            options: choices(ActivityType::known(), |kind| kind.as_str().to_string(), |kind| kind.label().to_string()),
        },
        FilterField::Select {
            key: "targetType",
            label: "Target",
            options: choices(TargetType::known(), |target| target.as_str().to_string(), |target| target.label().to_string()),
        },
        FilterField::Date { key: "from", label: "From" },
        FilterField::Date { key: "to", label: "To" },
    ];

    rsx! {
        Document { chrome,
            FilterForm { action: PATH.to_string(), query: props.query.clone(), fields, results: "results".to_string() }
            div { id: "results",
                match props.logs.clone() {
                    ViewState::Error(error) => rsx! {
                        LoadError { error }
                    },
                    ViewState::Ready(page) if page.is_empty() => rsx! {
                        EmptyState { message: "No activity matches these filters.".to_string() }
                    },
                    ViewState::Ready(page) => rsx! {
                        table { class: "table",
                            thead {
                                tr {
                                    th { "When" }
                                    th { "User" }
                                    th { "Activity" }
                                    th { "Target" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for log in page.content.iter().cloned() {
                                    LogRow { key: "{log.id}", log }
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
