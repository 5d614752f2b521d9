use super::lenient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Pagination {
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub current_page: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub per_page: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub total_records: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub total_pages: u64,
    #[serde(deserialize_with = "lenient::bool_or_false", default)]
    pub has_next: bool,
    #[serde(deserialize_with = "lenient::bool_or_false", default)]
    pub has_prev: bool,
}

impl Pagination {
    /// Build pagination metadata for `total` records split into pages of `per_page`
    pub fn compute(page: u64, per_page: u64, total: u64) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let total_pages = total.div_ceil(per_page);
        Self {
            current_page: page,
            per_page,
            total_records: total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Estimate metadata for a page of `count` rows that arrived without any.
    ///
    /// Earlier pages are assumed full; a full page may have a successor.
    pub fn estimate(page: u64, per_page: u64, count: u64) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let total_records = (page - 1) * per_page + count;
        let has_next = count >= per_page;
        Self {
            current_page: page,
            per_page,
            total_records,
            total_pages: if has_next { page + 1 } else { page },
            has_next,
            has_prev: page > 1,
        }
    }

    /// Index range of the current page within the full list
    pub fn slice_range(&self) -> std::ops::Range<usize> {
        let start = ((self.current_page.saturating_sub(1)) * self.per_page) as usize;
        let start = start.min(self.total_records as usize);
        let end = (start + self.per_page as usize).min(self.total_records as usize);
        start..end
    }
}

/// A page of records plus its pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Clone> Paginated<T> {
    /// Slice an unpaginated list on the client
    pub fn from_full_list(all: &[T], page: u64, per_page: u64) -> Self {
        let pagination = Pagination::compute(page, per_page, all.len() as u64);
        let items = all[pagination.slice_range()].to_vec();
        Self { items, pagination }
    }
}
