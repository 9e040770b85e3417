//! `?notice=` / `?error=` messages carried on redirects.

use std::collections::HashMap;

use ui::views::Flash;

pub const NOTICE_PARAM: &str = "notice";
pub const ERROR_PARAM: &str = "error";

fn with_param(path: &str, key: &str, message: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{key}={}", urlencoding::encode(message))
}

#[must_use]
pub fn with_notice(path: &str, message: &str) -> String {
    with_param(path, NOTICE_PARAM, message)
}

#[must_use]
pub fn with_error(path: &str, message: &str) -> String {
    with_param(path, ERROR_PARAM, message)
}

/// Flash messages of the current request's query string.
#[must_use]
pub fn flash_from(params: &HashMap<String, String>) -> Flash {
    let read = |key: &str| {
        params
            .get(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };
    Flash {
        notice: read(NOTICE_PARAM),
        error: read(ERROR_PARAM),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_appended_to_the_query() {
        assert_eq!(with_notice("/dashboard", "Saved!"), "/dashboard?notice=Saved%21");
        assert_eq!(
            with_error("/admin/users?page=2", "No way"),
            "/admin/users?page=2&error=No%20way"
        );
    }

    #[test]
    fn blank_messages_are_ignored() {
        let params = HashMap::from([
            ("notice".to_string(), "  ".to_string()),
            ("error".to_string(), "Boom".to_string()),
        ]);
        let flash = flash_from(&params);
        assert_eq!(flash.notice, None);
        assert_eq!(flash.error.as_deref(), Some("Boom"));
    }
}
