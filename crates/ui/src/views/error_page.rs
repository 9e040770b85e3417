use dioxus::prelude::*;

use super::layout::{Chrome, Document, Flash};

#[derive(Props, Clone, PartialEq)]
pub struct ErrorPageProps {
    pub title: String,
    pub message: String,
}

/// Stand-alone page for failures outside any page section.
#[component]
pub fn ErrorPage(props: ErrorPageProps) -> Element {
    rsx! {
        Document { chrome: Chrome::public(props.title.clone(), Flash::default()),
            section { class: "card",
                p { "{props.message}" }
                a { class: "btn btn-secondary", href: "/dashboard", "Back to the dashboard" }
            }
        }
    }
}
