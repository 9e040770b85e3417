use dioxus::prelude::*;
use vocab_core::model::UserProfile;

use super::scripts::page_scripts;

pub const APP_NAME: &str = "Vocab Console";
pub const STYLESHEET_PATH: &str = "/assets/app.css";

/// One-shot messages carried on a redirect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Flash {
    pub notice: Option<String>,
    pub error: Option<String>,
}

impl Flash {
    #[must_use]
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            notice: Some(message.into()),
            error: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            notice: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    Public,
    Learner,
    Admin,
}

impl Area {
    fn class(self) -> &'static str {
        match self {
            Area::Public => "area-public",
            Area::Learner => "area-learner",
            Area::Admin => "area-admin",
        }
    }

    fn nav(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Area::Public => &[],
            Area::Learner => &[
                ("/dashboard", "Overview"),
                ("/dashboard/library", "Library"),
                ("/dashboard/topics", "Topics"),
                ("/dashboard/vocab", "My Vocab"),
                ("/dashboard/vocab/new", "Contribute"),
                ("/dashboard/practice", "Practice"),
                ("/dashboard/settings", "Settings"),
            ],
            Area::Admin => &[
                ("/admin", "Overview"),
                ("/admin/users", "Users"),
                ("/admin/topics", "Topics"),
                ("/admin/vocab", "Vocabulary"),
                ("/admin/vocab/import", "Import"),
                ("/admin/reviews", "Reviews"),
                ("/admin/activity-logs", "Activity logs"),
            ],
        }
    }
}

/// What every page shares: title, navigation, viewer and flash.
#[derive(Clone, Debug, PartialEq)]
pub struct Chrome {
    pub title: String,
    pub area: Area,
    pub active: &'static str,
    pub viewer: Option<UserProfile>,
    pub flash: Flash,
}

impl Chrome {
    #[must_use]
    pub fn public(title: impl Into<String>, flash: Flash) -> Self {
        Self {
            title: title.into(),
            area: Area::Public,
            active: "",
            viewer: None,
            flash,
        }
    }

    #[must_use]
    pub fn learner(title: impl Into<String>, active: &'static str, viewer: UserProfile, flash: Flash) -> Self {
        Self {
            title: title.into(),
            area: Area::Learner,
            active,
            viewer: Some(viewer),
            flash,
        }
    }

    #[must_use]
    pub fn admin(title: impl Into<String>, active: &'static str, viewer: UserProfile, flash: Flash) -> Self {
        Self {
            title: title.into(),
            area: Area::Admin,
            active,
            viewer: Some(viewer),
            flash,
        }
    }
}

#[component]
pub fn FlashBanner(flash: Flash) -> Element {
    rsx! {
        if let Some(notice) = flash.notice.as_ref() {
            p { class: "flash flash--notice", role: "status", "{notice}" }
        }
        if let Some(error) = flash.error.as_ref() {
            p { class: "flash flash--error", role: "alert", "{error}" }
        }
    }
}

#[component]
fn NavBar(chrome: Chrome) -> Element {
    let links = chrome.area.nav().iter().map(|(href, label)| {
        let class = if *href == chrome.active { "nav-link nav-link--active" } else { "nav-link" };
        rsx! {
            a { key: "{href}", class: "{class}", href: "{href}", "{label}" }
        }
    });
    let is_admin = chrome.viewer.as_ref().is_some_and(UserProfile::is_admin);
    let switch = match chrome.area {
        Area::Learner if is_admin => Some(("/admin", "Admin console")),
        Area::Admin => Some(("/dashboard", "Learner view")),
        _ => None,
    };

    rsx! {
        header { class: "topbar",
            a { class: "brand", href: "/", "{APP_NAME}" }
            nav { class: "nav", {links} }
            if let Some(viewer) = chrome.viewer.as_ref() {
                div { class: "viewer",
                    if let Some((href, label)) = switch {
                        a { class: "nav-link nav-link--switch", href: "{href}", "{label}" }
                    }
                    span { class: "viewer-name", "{viewer.display_name()}" }
                    form { method: "post", action: "/logout", "data-no-overlay": "true",
                        button { class: "btn btn-ghost", r#type: "submit", "Log out" }
                    }
                }
            }
        }
    }
}

/// `head` and `body` of a page; [`crate::render_page`] adds the `html` root.
#[component]
pub fn Document(chrome: Chrome, children: Element) -> Element {
    let title = format!("{} · {APP_NAME}", chrome.title);
    let body_class = chrome.area.class();
    let scripts = page_scripts();

    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{title}" }
            link { rel: "stylesheet", href: STYLESHEET_PATH }
        }
        body { class: "{body_class}",
            div { id: "route-loading", class: "route-loading", hidden: true,
                div { class: "spinner" }
            }
            if chrome.area != Area::Public {
                NavBar { chrome: chrome.clone() }
            }
            main { class: "page",
                h1 { class: "page-title", "{chrome.title}" }
                FlashBanner { flash: chrome.flash.clone() }
                {children}
            }
            script { dangerous_inner_html: "{scripts}" }
        }
    }
}
