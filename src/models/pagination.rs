//! Client-side table paging state and the page envelope it produces.

use serde::Serialize;

/// Page sizes offered by the users table.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

/// Rows-per-page used until the viewer picks another.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Search and paging state of the users table.
///
/// Pages are zero-based. Changing the query or the page size sends the table
/// back to page 0; the paginator itself is stateless and relies on this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    query: String,
    page: usize,
    page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableState {
    pub fn new(query: impl Into<String>, page: usize, page_size: usize) -> Self {
        Self {
            query: query.into(),
            page,
            page_size: page_size.max(1),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 0;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }
}

/// One visible page of users plus the filtered total.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, total: usize, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        Self {
            items,
            total,
            page,
            per_page,
            total_pages: total.div_ceil(per_page),
        }
    }
}
