use serde::{Deserialize, Serialize};

/// Spring-style page envelope returned by every list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: 0,
            size: 0,
        }
    }
}

impl<T> Page<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Pagination window centred on the page the server says it returned.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.number, self.total_pages)
    }
}

/// Paging and sort parameters sent with list requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Option<String>,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 20;
    pub const MAX_SIZE: u32 = 100;

    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, Self::MAX_SIZE),
            sort: None,
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        let sort = sort.into();
        self.sort = if sort.trim().is_empty() { None } else { Some(sort) };
        self
    }

    /// Query pairs in the order the API documents them.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        pairs
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}

/// A page request plus the non-blank filters of a list screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: PageRequest,
    filters: Vec<(String, String)>,
}

impl ListQuery {
    #[must_use]
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            filters: Vec::new(),
        }
    }

    /// Add a filter; blank values are dropped and a repeated key replaces the old value.
    #[must_use]
    pub fn filter(mut self, key: &str, value: Option<&str>) -> Self {
        self.filters.retain(|(existing, _)| existing != key);
        if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
            self.filters.push((key.to_string(), value.to_string()));
        }
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    /// Same query, another page.
    #[must_use]
    pub fn at_page(&self, page: u32) -> Self {
        let mut next = self.clone();
        next.page.page = page;
        next
    }

    /// Paging pairs followed by the filters.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = self.page.to_query();
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

/// The run of page numbers shown in a pager, zero-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageWindow {
    current: u32,
    total_pages: u32,
    pages: Vec<u32>,
}

impl PageWindow {
    /// Pages shown on each side of the current one.
    pub const RADIUS: u32 = 2;

    /// Build a window; `total_pages` is at least 1 and `current` is clamped into range.
    #[must_use]
    pub fn new(current: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        let last = total_pages - 1;
        let current = current.min(last);
        let start = current.saturating_sub(Self::RADIUS);
        let end = current.saturating_add(Self::RADIUS).min(last);

        Self {
            current,
            total_pages,
            pages: (start..=end).collect(),
        }
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    #[must_use]
    pub fn previous(&self) -> Option<u32> {
        self.current.checked_sub(1)
    }

    #[must_use]
    pub fn next(&self) -> Option<u32> {
        let next = self.current + 1;
        (next < self.total_pages).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_clamps_to_available_pages() {
        let window = PageWindow::new(9, 4);
        assert_eq!(window.current(), 3);
        assert_eq!(window.pages(), &[1, 2, 3]);
        assert_eq!(window.next(), None);
        assert_eq!(window.previous(), Some(2));
    }

    #[test]
    fn window_spans_two_pages_each_side() {
        let window = PageWindow::new(5, 20);
        assert_eq!(window.pages(), &[3, 4, 5, 6, 7]);
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let window = PageWindow::new(0, 0);
        assert_eq!(window.total_pages(), 1);
        assert_eq!(window.pages(), &[0]);
        assert_eq!(window.previous(), None);
        assert_eq!(window.next(), None);
    }

    #[test]
    fn page_decodes_with_missing_counters() {
        let page: Page<serde_json::Value> =
            serde_json::from_str(r#"{"content":[{"id":"a"}]}"#).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.window().total_pages(), 1);
    }

    #[test]
    fn list_query_drops_blank_filters() {
        let query = ListQuery::new(PageRequest::default())
            .filter("query", Some(" cat "))
            .filter("status", Some(""))
            .filter("language", None)
            .filter("query", Some("dog"));

        assert_eq!(query.get("query"), Some("dog"));
        assert_eq!(query.get("status"), None);
        assert_eq!(query.at_page(3).to_query()[0], ("page".into(), "3".into()));
        assert_eq!(query.to_query().len(), 3);
    }

    #[test]
    fn page_request_clamps_size_and_drops_blank_sort() {
        let request = PageRequest::new(2, 500).with_sort("  ");
        assert_eq!(request.size, PageRequest::MAX_SIZE);
        assert_eq!(request.sort, None);
        assert_eq!(
            request.to_query(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "100".to_string()),
            ]
        );
    }
}
