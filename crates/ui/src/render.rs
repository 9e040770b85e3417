use dioxus::dioxus_core::Properties;
use dioxus::prelude::*;

/// Render a page component to a complete HTML document.
#[must_use]
pub fn render_page<P: Properties>(root: fn(P) -> Element, props: P) -> String {
    let mut dom = VirtualDom::new_with_props(root, props);
    dom.rebuild_in_place();
    format!(
        "<!DOCTYPE html><html lang=\"en\">{}</html>",
        dioxus_ssr::render(&dom)
    )
}

/// Stylesheet served at [`crate::views::STYLESHEET_PATH`].
pub const STYLESHEET: &str = include_str!("../assets/app.css");
