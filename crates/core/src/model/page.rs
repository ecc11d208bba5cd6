use serde::Serialize;

/// Fixed page size used when browsing questions.
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// One page of results plus the pagination metadata the presentation layer
/// needs for its chrome.
///
/// Pages are 1-based. A page number beyond the last available page yields an
/// empty `items` list with the metadata intact, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, per_page: u32, total_items: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            u32::try_from(total_items.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
        };
        Self {
            items,
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
