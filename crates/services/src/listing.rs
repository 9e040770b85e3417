//! Turning a list page's query string into an API list request.

use std::collections::HashMap;

use vocab_core::model::{ListQuery, PageRequest};

/// Paging defaults and accepted filters of one list screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListSpec {
    pub default_size: u32,
    pub max_size: u32,
    pub default_sort: Option<&'static str>,
    pub filters: &'static [&'static str],
}

impl ListSpec {
    const fn new(default_sort: Option<&'static str>, filters: &'static [&'static str]) -> Self {
        Self {
            default_size: PageRequest::DEFAULT_SIZE,
            max_size: PageRequest::MAX_SIZE,
            default_sort,
            filters,
        }
    }

    const fn sized(mut self, default_size: u32, max_size: u32) -> Self {
        self.default_size = default_size;
        self.max_size = max_size;
        self
    }

    /// Read `page`, `size`, `sort` and this screen's filters.
    ///
    /// Unparseable numbers fall back to the defaults; sizes are clamped.
    #[must_use]
    pub fn parse(&self, params: &HashMap<String, String>) -> ListQuery {
        let page = params
            .get("page")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(0);
        let size = params
            .get("size")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(self.default_size)
            .clamp(1, self.max_size);
        let sort = params
            .get("sort")
            .map(|raw| raw.trim())
            .filter(|raw| !raw.is_empty())
            .or(self.default_sort)
            .unwrap_or_default();

        let request = PageRequest::new(page, size).with_sort(sort);
        self.filters
            .iter()
            .fold(ListQuery::new(request), |query, key| {
                query.filter(key, params.get(*key).map(String::as_str))
            })
    }
}

pub const LIBRARY: ListSpec = ListSpec::new(Some("term,asc"), &["query", "topicId", "language"]);
pub const TOPICS: ListSpec = ListSpec::new(Some("name,asc"), &["query"]);
pub const MY_VOCAB: ListSpec = ListSpec::new(Some("updatedAt,desc"), &["query", "status"]);
pub const MY_CONTRIBUTIONS: ListSpec = ListSpec::new(Some("createdAt,desc"), &["status"]);
pub const ADMIN_USERS: ListSpec =
    ListSpec::new(Some("createdAt,desc"), &["query", "role", "status", "deleted"]);
pub const ADMIN_TOPICS: ListSpec =
    ListSpec::new(Some("createdAt,desc"), &["name", "slug", "status"]);
pub const ADMIN_VOCAB: ListSpec = ListSpec::new(
    Some("createdAt,desc"),
    &["query", "status", "language", "topicId"],
);
pub const REVIEWS: ListSpec =
    ListSpec::new(Some("createdAt,desc"), &["query", "status", "language"]).sized(15, 50);
pub const ACTIVITY_LOGS: ListSpec = ListSpec::new(
    Some("createdAt,desc"),
    &["userId", "activityType", "targetType", "from", "to"],
);

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let query = LIBRARY.parse(&params(&[("page", "-3"), ("size", "abc")]));
        assert_eq!(query.page.page, 0);
        assert_eq!(query.page.size, 20);
        assert_eq!(query.page.sort.as_deref(), Some("term,asc"));
    }

    #[test]
    fn size_is_clamped_per_screen() {
        assert_eq!(LIBRARY.parse(&params(&[("size", "500")])).page.size, 100);
        assert_eq!(REVIEWS.parse(&params(&[("size", "500")])).page.size, 50);
        assert_eq!(REVIEWS.parse(&params(&[])).page.size, 15);
        assert_eq!(LIBRARY.parse(&params(&[("size", "0")])).page.size, 20);
    }

    #[test]
    fn only_known_non_blank_filters_survive() {
        let query = ADMIN_TOPICS.parse(&params(&[
            ("name", "  food "),
            ("slug", "   "),
            ("status", "ACTIVE"),
            ("query", "ignored"),
            ("page", "2"),
            ("sort", "name,asc"),
        ]));
        assert_eq!(query.page.page, 2);
        assert_eq!(query.page.sort.as_deref(), Some("name,asc"));
        assert_eq!(
            query.filters(),
            &[
                ("name".to_string(), "food".to_string()),
                ("status".to_string(), "ACTIVE".to_string()),
            ]
        );
    }
}
