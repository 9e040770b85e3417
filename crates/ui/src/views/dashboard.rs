use dioxus::prelude::*;
use vocab_core::model::{Page, UserProfile, UserVocabulary};

use super::components::{EmptyState, LoadError, StatusPill};
use super::layout::{Chrome, Document, Flash};
use super::practice::RecentSessions;
use super::state::ViewState;
use crate::vm::{RecentSessionVm, format_timestamp};

#[derive(Props, Clone, PartialEq)]
pub struct DashboardPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub my_vocab: ViewState<Page<UserVocabulary>>,
    pub recent: Vec<RecentSessionVm>,
}

#[component]
pub fn DashboardPage(props: DashboardPageProps) -> Element {
    let name = props.viewer.display_name();
    let goal = props.viewer.daily_goal.unwrap_or(0);
    let chrome = Chrome::learner("Overview", "/dashboard", props.viewer.clone(), props.flash.clone());
    let recent = props.recent.iter().take(5).cloned().collect::<Vec<_>>();

    rsx! {
        Document { chrome,
            section { class: "card hero",
                h2 { "Welcome back, {name}" }
                if goal > 0 {
                    p { class: "muted", "Daily goal: {goal} word(s)" }
                }
                form { class: "inline-form", method: "post", action: "/dashboard/practice/start",
                    button { class: "btn btn-primary", r#type: "submit", "Start daily session" }
                }
            }
            section { class: "card",
                h2 { "My Vocab" }
                match props.my_vocab.clone() {
                    ViewState::Error(error) => rsx! {
                        LoadError { error }
                    },
                    ViewState::Ready(page) if page.is_empty() => rsx! {
                        EmptyState { message: "Your list is empty. Add words from the library.".to_string() }
                        a { class: "btn btn-secondary", href: "/dashboard/library", "Browse the library" }
                    },
                    ViewState::Ready(page) => rsx! {
                        p { class: "stat", "{page.total_elements} word(s) tracked" }
                        ul { class: "compact-list",
                            for entry in page.content.iter().take(5) {
                                li { key: "{entry.id}",
                                    span { class: "term", "{entry.term()}" }
                                    StatusPill { label: entry.status().label().to_string(), tone: "info".to_string() }
                                    span { class: "muted", "{entry.progress_percent()}%" }
                                    span { class: "muted", "Next due {format_timestamp(entry.next_due_at.as_deref())}" }
                                }
                            }
                        }
                        a { href: "/dashboard/vocab", "Open My Vocab" }
                    },
                }
            }
            section { class: "card",
                h2 { "Recent practice" }
                RecentSessions { sessions: recent }
                a { href: "/dashboard/practice", "All sessions" }
            }
        }
    }
}
