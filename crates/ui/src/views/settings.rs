use dioxus::prelude::*;
use services::forms::ProfileForm;
use vocab_core::model::UserProfile;

use super::components::TextField;
use super::layout::{Chrome, Document, Flash};
use crate::vm::format_timestamp;

const PATH: &str = "/dashboard/settings";

/// Prefill the profile form from the signed-in user.
#[must_use]
pub fn profile_form(viewer: &UserProfile) -> ProfileForm {
    ProfileForm {
        username: viewer.username.clone().unwrap_or_default(),
        display_name: viewer.display_name.clone().unwrap_or_default(),
        avatar_url: viewer.avatar_url.clone().unwrap_or_default(),
        locale: viewer.locale.clone().unwrap_or_default(),
        time_zone: viewer.time_zone.clone().unwrap_or_default(),
        daily_goal: viewer.daily_goal.map(|goal| goal.to_string()).unwrap_or_default(),
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct SettingsPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
}

#[component]
pub fn SettingsPage(props: SettingsPageProps) -> Element {
    let form = profile_form(&props.viewer);
    let email = props.viewer.email.clone().unwrap_or_default();
    let role = props.viewer.role().label().to_string();
    let last_login = format_timestamp(props.viewer.last_login_at.as_deref());
    let chrome = Chrome::learner("Settings", PATH, props.viewer.clone(), props.flash.clone());

    rsx! {
        Document { chrome,
            section { class: "card",
                h2 { "Account" }
                dl { class: "facts",
                    dt { "Email" }
                    dd { "{email}" }
                    dt { "Role" }
                    dd { "{role}" }
                    dt { "Last sign-in" }
                    dd { "{last_login}" }
                }
            }
            section { class: "card",
                h2 { "Profile" }
                form { class: "form", method: "post", action: PATH,
                    TextField { label: "Display name".to_string(), name: "displayName".to_string(), value: form.display_name }
                    TextField { label: "Username".to_string(), name: "username".to_string(), value: form.username }
                    TextField { label: "Avatar URL".to_string(), name: "avatarUrl".to_string(), value: form.avatar_url, kind: "url".to_string() }
                    TextField { label: "Locale".to_string(), name: "locale".to_string(), value: form.locale }
                    TextField { label: "Time zone".to_string(), name: "timeZone".to_string(), value: form.time_zone }
                    TextField { label: "Daily goal".to_string(), name: "dailyGoal".to_string(), value: form.daily_goal, kind: "number".to_string() }
                    button { class: "btn btn-primary", r#type: "submit", "Save profile" }
                }
            }
        }
    }
}
