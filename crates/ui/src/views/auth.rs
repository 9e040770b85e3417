use dioxus::prelude::*;

use super::layout::{Chrome, Document, Flash};

#[derive(Props, Clone, PartialEq)]
pub struct LoginPageProps {
    pub flash: Flash,
    pub email: String,
}

#[component]
pub fn LoginPage(props: LoginPageProps) -> Element {
    rsx! {
        Document { chrome: Chrome::public("Sign in", props.flash.clone()),
            section { class: "card auth-card",
                form { class: "form", method: "post", action: "/login",
                    label { "Email"
                        input { r#type: "email", name: "email", value: "{props.email}", required: true, autocomplete: "email" }
                    }
                    label { "Password"
                        input { r#type: "password", name: "password", required: true, autocomplete: "current-password" }
                    }
                    button { class: "btn btn-primary", r#type: "submit", "Sign in" }
                }
                p { class: "muted",
                    "No account yet? "
                    a { href: "/register", "Create one" }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct RegisterPageProps {
    pub flash: Flash,
    pub email: String,
    pub display_name: String,
}

#[component]
pub fn RegisterPage(props: RegisterPageProps) -> Element {
    rsx! {
        Document { chrome: Chrome::public("Create account", props.flash.clone()),
            section { class: "card auth-card",
                form { class: "form", method: "post", action: "/register",
                    label { "Display name"
                        input { r#type: "text", name: "displayName", value: "{props.display_name}", required: true }
                    }
                    label { "Email"
                        input { r#type: "email", name: "email", value: "{props.email}", required: true, autocomplete: "email" }
                    }
                    label { "Password"
                        input { r#type: "password", name: "password", required: true, autocomplete: "new-password" }
                    }
                    button { class: "btn btn-primary", r#type: "submit", "Create account" }
                }
                p { class: "muted",
                    "Already registered? "
                    a { href: "/login", "Sign in" }
                }
            }
        }
    }
}
