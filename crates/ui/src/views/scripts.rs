//! Small browser scripts embedded in every page.

/// Quiet period before a search box fires.
pub const SEARCH_DEBOUNCE_MS: u32 = 350;
/// Minimum time the navigation overlay stays visible.
pub const LOADING_OVERLAY_MIN_MS: u32 = 600;

/// Search-as-you-type for forms marked `data-live-search`.
///
/// Keystrokes are debounced; each request carries a sequence number and a
/// response is dropped unless it belongs to the latest request.
pub(crate) fn live_search_script(debounce_ms: u32) -> String {
    format!(
        r#"(function() {{
    const forms = document.querySelectorAll("form[data-live-search]");
    forms.forEach((form) => {{
        const target = document.querySelector(form.dataset.liveSearch);
        if (!target) return;
        const state = {{ timer: null, seq: 0 }};
        const run = () => {{
            const seq = ++state.seq;
            const params = new URLSearchParams(new FormData(form));
            params.delete("page");
            const url = (form.getAttribute("action") || window.location.pathname) + "?" + params.toString();
            fetch(url, {{ headers: {{ "X-Live-Search": String(seq) }}, credentials: "same-origin" }})
                .then((response) => response.ok ? response.text() : Promise.reject(response.status))
                .then((html) => {{
                    if (seq !== state.seq) return;
                    const doc = new DOMParser().parseFromString(html, "text/html");
                    const fresh = doc.querySelector(form.dataset.liveSearch);
                    if (!fresh) return;
                    target.innerHTML = fresh.innerHTML;
                    window.history.replaceState(null, "", url);
                }})
                .catch(() => {{}});
        }};
        form.querySelectorAll("input[type=search], select").forEach((input) => {{
            input.addEventListener(input.tagName === "SELECT" ? "change" : "input", () => {{
                if (state.timer) clearTimeout(state.timer);
                state.timer = setTimeout(run, {debounce_ms});
            }});
        }});
    }});
}})();"#,
        debounce_ms = debounce_ms,
    )
}

/// Overlay shown while the browser navigates away.
pub(crate) fn loading_overlay_script(min_ms: u32) -> String {
    format!(
        r#"(function() {{
    const overlay = document.getElementById("route-loading");
    if (!overlay) return;
    const state = {{ shownAt: 0, timer: null }};
    const show = () => {{
        state.shownAt = Date.now();
        if (state.timer) clearTimeout(state.timer);
        overlay.hidden = false;
    }};
    const hide = () => {{
        const wait = Math.max(0, {min_ms} - (Date.now() - state.shownAt));
        state.timer = setTimeout(() => {{ overlay.hidden = true; }}, wait);
    }};
    document.addEventListener("click", (event) => {{
        const link = event.target.closest("a[href]");
        if (!link || link.target || link.hasAttribute("download")) return;
        if (event.metaKey || event.ctrlKey || event.shiftKey || event.button !== 0) return;
        const url = new URL(link.href, window.location.href);
        if (url.origin !== window.location.origin || url.hash) return;
        show();
    }});
    document.addEventListener("submit", (event) => {{
        if (event.target.hasAttribute("data-no-overlay")) return;
        show();
    }});
    window.addEventListener("pageshow", hide);
}})();"#,
        min_ms = min_ms,
    )
}

/// Fill-in-the-blank cells keep one character and move focus forward.
pub(crate) const FILL_SLOTS_SCRIPT: &str = r#"(function() {
    const cells = Array.from(document.querySelectorAll("input[data-fill-slot]"));
    cells.forEach((cell, index) => {
        cell.addEventListener("input", () => {
            cell.value = cell.value.trim().slice(-1);
            if (cell.value && cells[index + 1]) cells[index + 1].focus();
        });
    });
})();"#;

/// Ask before destructive form submissions marked `data-confirm`.
pub(crate) const CONFIRM_SCRIPT: &str = r#"(function() {
    document.querySelectorAll("form[data-confirm]").forEach((form) => {
        form.addEventListener("submit", (event) => {
            if (!window.confirm(form.dataset.confirm)) {
                event.preventDefault();
                event.stopImmediatePropagation();
            }
        }, true);
    });
})();"#;

/// All page scripts, in load order.
#[must_use]
pub fn page_scripts() -> String {
    [
        CONFIRM_SCRIPT.to_string(),
        loading_overlay_script(LOADING_OVERLAY_MIN_MS),
        live_search_script(SEARCH_DEBOUNCE_MS),
        FILL_SLOTS_SCRIPT.to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_embed_their_timings() {
        let search = live_search_script(SEARCH_DEBOUNCE_MS);
        assert!(search.contains("setTimeout(run, 350)"));
        assert!(search.contains("if (seq !== state.seq) return;"));
        assert!(loading_overlay_script(LOADING_OVERLAY_MIN_MS).contains("Math.max(0, 600 -"));
        assert!(page_scripts().contains("data-fill-slot"));
    }
}
