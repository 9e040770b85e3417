use dioxus::prelude::*;
use vocab_core::model::{AccountStatus, ListQuery, Page, Role, UserProfile};

use super::super::components::{
    ActionButton, EmptyState, FilterField, FilterForm, LoadError, Pagination, SelectField,
    TextField, choices,
};
use super::super::layout::{Chrome, Document, Flash};
use super::super::state::ViewState;
use crate::vm::format_timestamp;

const PATH: &str = "/admin/users";

fn role_choices() -> Vec<(String, String)> {
    choices(Role::known(), |role| role.as_str().to_string(), |role| role.label().to_string())
}

fn status_choices() -> Vec<(String, String)> {
    choices(
        AccountStatus::known(),
        |status| status.as_str().to_string(),
        |status| status.label().to_string(),
    )
}

#[derive(Props, Clone, PartialEq)]
pub struct AdminUsersPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub query: ListQuery,
    pub users: ViewState<Page<UserProfile>>,
}

#[component]
fn CreateUserForm() -> Element {
    rsx! {
        details { class: "card",
            summary { "Create user" }
            form { class: "form", method: "post", action: PATH,
                TextField { label: "Email".to_string(), name: "email".to_string(), value: String::new(), kind: "email".to_string(), required: true }
                TextField { label: "Display name".to_string(), name: "displayName".to_string(), value: String::new(), required: true }
                TextField { label: "Password".to_string(), name: "password".to_string(), value: String::new(), kind: "password".to_string(), required: true }
                SelectField { label: "Role".to_string(), name: "role".to_string(), value: Role::User.as_str().to_string(), options: role_choices() }
                button { class: "btn btn-primary", r#type: "submit", "Create" }
            }
        }
    }
}

#[component]
fn UserRow(user: UserProfile, deleted_view: bool) -> Element {
    let base = format!("{PATH}/{}", urlencoding::encode(user.id.as_str()));
    let name = user.display_name();
    let email = user.email.clone().unwrap_or_default();
    let goal = user.daily_goal.map(|goal| goal.to_string()).unwrap_or_default();

    rsx! {
        tr {
            td {
                strong { "{name}" }
                br {}
                span { class: "muted", "{email}" }
            }
            td { "{user.role().label()}" }
            td { "{user.status().label()}" }
            td { "{format_timestamp(user.last_login_at.as_deref())}" }
            td { "{format_timestamp(user.created_at.as_deref())}" }
            td { class: "row-actions",
                a { class: "btn btn-ghost", href: "{base}/activity-logs", "Activity" }
                if deleted_view {
                    ActionButton { action: format!("{base}/restore"), label: "Restore".to_string() }
                } else {
                    details {
                        summary { "Edit" }
                        form { class: "form", method: "post", action: "{base}/update",
                            TextField { label: "Email".to_string(), name: "email".to_string(), value: email.clone(), kind: "email".to_string() }
                            TextField { label: "Username".to_string(), name: "username".to_string(), value: user.username.clone().unwrap_or_default() }
                            TextField { label: "Display name".to_string(), name: "displayName".to_string(), value: user.display_name.clone().unwrap_or_default() }
                            SelectField { label: "Role".to_string(), name: "role".to_string(), value: user.role().as_str().to_string(), options: role_choices() }
                            SelectField { label: "Status".to_string(), name: "status".to_string(), value: user.status().as_str().to_string(), options: status_choices() }
                            TextField { label: "Locale".to_string(), name: "locale".to_string(), value: user.locale.clone().unwrap_or_default() }
                            TextField { label: "Time zone".to_string(), name: "timeZone".to_string(), value: user.time_zone.clone().unwrap_or_default() }
                            TextField { label: "Daily goal".to_string(), name: "dailyGoal".to_string(), value: goal, kind: "number".to_string() }
                            button { class: "btn btn-primary", r#type: "submit", "Save" }
                        }
                        form { class: "form", method: "post", action: "{base}/reset-password",
                            TextField { label: "New password".to_string(), name: "newPassword".to_string(), value: String::new(), kind: "password".to_string(), required: true }
                            button { class: "btn btn-secondary", r#type: "submit", "Reset password" }
                        }
                    }
                    ActionButton {
                        action: format!("{base}/delete"),
                        label: "Delete".to_string(),
                        class: "btn btn-danger".to_string(),
                        confirm: Some(format!("Delete {name}? The account can be restored later.")),
                    }
                }
            }
        }
    }
}

#[component]
pub fn AdminUsersPage(props: AdminUsersPageProps) -> Element {
    let chrome = Chrome::admin("Users", PATH, props.viewer.clone(), props.flash.clone());
    let deleted_view = props.query.get("deleted") == Some("true");
    let fields = vec![
        FilterField::Search { key: "query", placeholder: "Name or email" },
        FilterField::Select { key: "role", label: "Role", options: role_choices() },
        FilterField::Select { key: "status", label: "Status", options: status_choices() },
        FilterField::Select {
            key: "deleted",
            label: "Deleted",
            options: vec![("false".to_string(), "Active accounts".to_string()), ("true".to_string(), "Deleted accounts".to_string())],
        },
    ];

    rsx! {
        Document { chrome,
            CreateUserForm {}
            FilterForm { action: PATH.to_string(), query: props.query.clone(), fields, results: "results".to_string() }
            div { id: "results",
                match props.users.clone() {
                    ViewState::Error(error) => rsx! {
                        LoadError { error }
                    },
                    ViewState::Ready(page) if page.is_empty() => rsx! {
                        EmptyState { message: "No users match these filters.".to_string() }
                    },
                    ViewState::Ready(page) => rsx! {
                        table { class: "table",
                            thead {
                                tr {
                                    th { "User" }
                                    th { "Role" }
                                    th { "Status" }
                                    th { "Last sign-in" }
                                    th { "Created" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for user in page.content.iter().cloned() {
                                    UserRow { key: "{user.id}", user, deleted_view }
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
