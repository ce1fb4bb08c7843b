use serde::Serialize;

use crate::query::condition::Order;

/// Paging parameters: a zero-based page index, a page size, and optional sort
/// entries naming entity properties
#[derive(Clone, Debug)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Vec<(String, Order)>,
}

impl PageRequest {
    pub fn of(page: usize, size: usize) -> Self {
        Self { page, size, sort: Vec::new() }
    }

    pub fn sorted_by(mut self, property: impl Into<String>, direction: Order) -> Self {
        self.sort.push((property.into(), direction));
        self
    }

    /// Row offset of this page: `page * size`
    pub fn offset(&self) -> usize {
        self.page * self.size
    }
}

/// One bounded slice of a result set plus the total matching count
///
/// Invariants: `content.len() <= size` and `total >= content.len()`.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total:   i64,
    pub page:    usize,
    pub size:    usize,
}

impl<T> Page<T> {
    pub(crate) fn new(content: Vec<T>, total: i64, request: &PageRequest) -> Self {
        Self { content, total, page: request.page, size: request.size }
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn total_pages(&self) -> usize {
        if self.size == 0 { 0 } else { (self.total as usize).div_ceil(self.size) }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
