//! Page/limit handling shared by the catalog listing and search.
//!
//! Query parameters are permissive: only the leading digits of a value count
//! (`2.5` and `2abc` both read as 2), and anything absent, without leading
//! digits or non-positive falls back to the default instead of failing the
//! request.

use std::ops::Range;

use serde::Serialize;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Zero for either value selects its default.
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Build from raw query-string values.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            page.and_then(parse_positive).unwrap_or(DEFAULT_PAGE),
            limit.and_then(parse_positive).unwrap_or(DEFAULT_LIMIT),
        )
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Index range of this page within `total` items; empty past the end.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page - 1).saturating_mul(self.limit).min(total);
        let end = start.saturating_add(self.limit).min(total);
        start..end
    }

    /// `ceil(total / limit)`; zero when there is nothing to page.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit)
    }

    /// Describe this page of `total` items holding `on_page` of them.
    pub fn stats(&self, total: usize, on_page: usize) -> PageStats {
        PageStats {
            total_pages: self.total_pages(total),
            current_page: self.page,
            cars_on_page: on_page,
        }
    }

    /// Slice out this page and describe it.
    pub fn apply<T: Clone>(&self, items: &[T]) -> (Vec<T>, PageStats) {
        let page = items[self.range(items.len())].to_vec();
        let stats = self.stats(items.len(), page.len());
        (page, stats)
    }
}

/// Per-page metadata attached to paginated responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStats {
    pub total_pages: usize,
    pub current_page: usize,
    pub cars_on_page: usize,
}

fn parse_positive(raw: &str) -> Option<usize> {
    let raw = raw.trim_start();
    let unsigned = raw.strip_prefix('+').unwrap_or(raw);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse::<usize>().ok().filter(|n| *n > 0)
}
