use dioxus::prelude::*;
use services::forms::VocabForm;
use vocab_core::model::{Contribution, ListQuery, Page, RejectReason, Topic, UserProfile};

use super::components::{EmptyState, LoadError, Pagination};
use super::layout::{Chrome, Document, Flash};
use super::state::ViewState;
use super::vocab_fields::VocabFields;
use crate::vm::format_timestamp;

const PATH: &str = "/dashboard/vocab/new";

#[derive(Props, Clone, PartialEq)]
pub struct ContributePageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub form: VocabForm,
    pub topics: Vec<Topic>,
    pub query: ListQuery,
    pub contributions: ViewState<Page<Contribution>>,
}

#[component]
pub fn ContributePage(props: ContributePageProps) -> Element {
    let chrome = Chrome::learner("Contribute a word", PATH, props.viewer.clone(), props.flash.clone());

    rsx! {
        Document { chrome,
            section { class: "card",
                p { class: "muted", "Suggested words are reviewed by an admin before they join the library." }
                form { class: "form", method: "post", action: PATH,
                    VocabFields { form: props.form.clone(), topics: props.topics.clone() }
                    button { class: "btn btn-primary", r#type: "submit", "Submit for review" }
                }
            }
            section { class: "card",
                h2 { "My contributions" }
                match props.contributions.clone() {
                    ViewState::Error(error) => rsx! {
                        LoadError { error }
                    },
                    ViewState::Ready(page) if page.is_empty() => rsx! {
                        EmptyState { message: "You have not suggested any words yet.".to_string() }
                    },
                    ViewState::Ready(page) => rsx! {
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Term" }
                                    th { "Status" }
                                    th { "Reject reason" }
                                    th { "Review note" }
                                    th { "Submitted" }
                                }
                            }
                            tbody {
                                for contribution in page.content.iter() {
                                    tr { key: "{contribution.id}",
                                        td { class: "term", {contribution.term.clone().unwrap_or_default()} }
                                        td { "{contribution.status().label()}" }
                                        td { {RejectReason::describe(contribution.reject_reason.as_deref())} }
                                        td { {contribution.review_note.clone().unwrap_or_default()} }
                                        td { "{format_timestamp(contribution.created_at.as_deref())}" }
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
