//! Translation between caller-facing page numbers and storage page indices.
//!
//! Callers count pages from 1; storage counts from 0. Nothing outside this
//! module performs the conversion.

/// Zero-based page index for a 1-based page number.
///
/// Any non-positive page collapses to the first page.
pub fn page_index(page: i32) -> u64 {
    if page > 0 { (page - 1) as u64 } else { 0 }
}

/// Page length, with non-positive sizes clamped to 1.
pub fn page_size(size: i32) -> u64 {
    size.max(1) as u64
}

/// Storage-facing page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(index: u64, size: u64) -> Self {
        Self { index, size }
    }

    /// Build a request from the caller's 1-based page and size.
    pub fn from_client(page: i32, size: i32) -> Self {
        Self::new(page_index(page), page_size(size))
    }

    /// Number of items to skip before this page.
    pub fn offset(&self) -> u64 {
        self.index.saturating_mul(self.size)
    }
}

/// One page of a query result plus totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u64,
    pub total_elements: u64,
    /// Zero-based index this page was fetched with
    pub index: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_elements: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_pages: total_pages(total_elements, request.size),
            total_elements,
            index: request.index,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            index: self.index,
        }
    }
}

/// `ceil(total / size)`; zero when either is zero.
pub fn total_pages(total_elements: u64, size: u64) -> u64 {
    if size == 0 {
        return 0;
    }
    total_elements.div_ceil(size)
}
