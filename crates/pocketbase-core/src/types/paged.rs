//! Paginated listing response.

use serde::Deserialize;

/// One page of records plus pagination metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<R> {
    /// Records on the current page.
    #[serde(default = "Vec::new")]
    pub items: Vec<R>,

    /// The 1-based page number returned by the server.
    #[serde(rename = "page", default)]
    pub page_offset: u32,

    /// The number of items per page.
    #[serde(rename = "perPage", default)]
    pub items_per_page: u32,

    /// Total number of items across all pages.
    #[serde(default)]
    pub total_items: u64,

    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u64,
}

impl<R> Paged<R> {
    /// Wire names of the pagination envelope.
    pub const FIELDS: &'static [&'static str] =
        &["items", "page", "perPage", "totalItems", "totalPages"];

    /// Returns true if the page holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
