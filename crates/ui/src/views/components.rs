use dioxus::prelude::*;
use vocab_core::model::{ListQuery, PageWindow};

use super::state::ViewError;

/// `path?k=v&...` with every value percent-encoded.
#[must_use]
pub fn href(path: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}

/// Link to `page` of a list, keeping its filters and sort.
#[must_use]
pub fn page_href(path: &str, query: &ListQuery, page: u32) -> String {
    href(path, &query.at_page(page).to_query())
}

#[component]
pub fn StatusPill(label: String, tone: String) -> Element {
    rsx! {
        span { class: "pill pill--{tone}", "{label}" }
    }
}

#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        p { class: "empty-state", "{message}" }
    }
}

#[component]
pub fn LoadError(error: ViewError) -> Element {
    rsx! {
        div { class: "load-error", role: "alert",
            p { "Could not load this section." }
            p { class: "load-error-detail", "{error.message()}" }
        }
    }
}

#[component]
pub fn Pagination(path: String, query: ListQuery, window: PageWindow, total: u64) -> Element {
    if window.total_pages() <= 1 {
        return rsx! {
            p { class: "pager-summary", "{total} result(s)" }
        };
    }
    let pages = window.pages().iter().map(|page| {
        let link = page_href(&path, &query, *page);
        let label = page + 1;
        let class = if *page == window.current() { "pager-link pager-link--current" } else { "pager-link" };
        rsx! {
            a { key: "{page}", class: "{class}", href: "{link}", "{label}" }
        }
    });
    let previous = window.previous().map(|page| page_href(&path, &query, page));
    let next = window.next().map(|page| page_href(&path, &query, page));
    let current = window.current() + 1;
    let total_pages = window.total_pages();

    rsx! {
        nav { class: "pager", "aria-label": "Pagination",
            if let Some(link) = previous {
                a { class: "pager-link", href: "{link}", "Previous" }
            } else {
                span { class: "pager-link pager-link--disabled", "Previous" }
            }
            {pages}
            if let Some(link) = next {
                a { class: "pager-link", href: "{link}", "Next" }
            } else {
                span { class: "pager-link pager-link--disabled", "Next" }
            }
            span { class: "pager-summary", "Page {current} of {total_pages} · {total} result(s)" }
        }
    }
}

/// A control of a list filter form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterField {
    Search { key: &'static str, placeholder: &'static str },
    Select { key: &'static str, label: &'static str, options: Vec<(String, String)> },
    Date { key: &'static str, label: &'static str },
}

/// GET form for list filters; text fields search as you type.
#[component]
pub fn FilterForm(action: String, query: ListQuery, fields: Vec<FilterField>, results: String) -> Element {
    let controls = fields.into_iter().map(|field| match field {
        FilterField::Search { key, placeholder } => {
            let value = query.get(key).unwrap_or_default().to_string();
            rsx! {
                input {
                    key: "{key}",
                    r#type: "search",
                    name: key,
                    value: "{value}",
                    placeholder,
                    autocomplete: "off",
                }
            }
        }
        FilterField::Select { key, label, options } => {
            let current = query.get(key).unwrap_or_default().to_string();
            rsx! {
                label { key: "{key}", class: "filter-select",
                    span { "{label}" }
                    select { name: key,
                        option { value: "", selected: current.is_empty(), "All" }
                        for (value, text) in options {
                            option { selected: value == current, value: "{value}", "{text}" }
                        }
                    }
                }
            }
        }
        FilterField::Date { key, label } => {
            let value = query.get(key).unwrap_or_default().to_string();
            rsx! {
                label { key: "{key}", class: "filter-date",
                    span { "{label}" }
                    input { r#type: "date", name: key, value: "{value}" }
                }
            }
        }
    });
    let selector = format!("#{results}");

    rsx! {
        form { class: "filters", method: "get", action: "{action}", "data-live-search": "{selector}",
            {controls}
            button { class: "btn btn-secondary", r#type: "submit", "Filter" }
            a { class: "btn btn-ghost", href: "{action}", "Reset" }
        }
    }
}

/// `(value, label)` pairs for the known variants of a status enum.
#[must_use]
pub fn choices<T>(values: Vec<T>, wire: impl Fn(&T) -> String, label: impl Fn(&T) -> String) -> Vec<(String, String)> {
    values.iter().map(|value| (wire(value), label(value))).collect()
}

#[component]
pub fn TextField(
    label: String,
    name: String,
    value: String,
    #[props(default = "text".to_string())] kind: String,
    #[props(default)] required: bool,
) -> Element {
    rsx! {
        label { class: "field",
            span { class: "field-label", "{label}" }
            input { r#type: "{kind}", name: "{name}", value: "{value}", required }
        }
    }
}

#[component]
pub fn TextArea(label: String, name: String, value: String, #[props(default = 3)] rows: u32) -> Element {
    rsx! {
        label { class: "field",
            span { class: "field-label", "{label}" }
            textarea { name: "{name}", rows: "{rows}", "{value}" }
        }
    }
}

#[component]
pub fn SelectField(
    label: String,
    name: String,
    value: String,
    options: Vec<(String, String)>,
    #[props(default)] allow_blank: bool,
) -> Element {
    rsx! {
        label { class: "field",
            span { class: "field-label", "{label}" }
            select { name: "{name}",
                if allow_blank {
                    option { value: "", selected: value.is_empty(), "—" }
                }
                for (option_value, text) in options {
                    option { selected: option_value == value, value: "{option_value}", "{text}" }
                }
            }
        }
    }
}

/// Small POST form with a single button, optionally behind a confirm prompt.
#[component]
pub fn ActionButton(
    action: String,
    label: String,
    #[props(default = "btn btn-secondary".to_string())] class: String,
    #[props(default)] confirm: Option<String>,
) -> Element {
    rsx! {
        form { class: "inline-form", method: "post", action: "{action}", "data-confirm": confirm,
            button { class: "{class}", r#type: "submit", "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_core::model::PageRequest;

    #[test]
    fn page_links_keep_filters() {
        let query = ListQuery::new(PageRequest::new(0, 20).with_sort("createdAt,desc"))
            .filter("query", Some("big cat"))
            .filter("status", Some("ACTIVE"));
        assert_eq!(
            page_href("/admin/topics", &query, 3),
            "/admin/topics?page=3&size=20&sort=createdAt%2Cdesc&query=big%20cat&status=ACTIVE"
        );
        assert_eq!(href("/x", &[]), "/x");
    }
}
