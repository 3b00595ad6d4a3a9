//! Page selection for listing requests.

use crate::error::{Error, InvalidInputError};

/// Pagination options for querying records.
///
/// Both values are 1-based and at least 1. The defaults (page 1, 30 items)
/// match the server defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationOptions {
    page_number: u32,
    items_per_page: u32,
}

impl PaginationOptions {
    /// Default page number.
    pub const DEFAULT_PAGE_NUMBER: u32 = 1;

    /// Default number of items per page.
    pub const DEFAULT_ITEMS_PER_PAGE: u32 = 30;

    /// Create pagination options.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is zero.
    pub fn new(page_number: u32, items_per_page: u32) -> Result<Self, Error> {
        if page_number == 0 {
            return Err(InvalidInputError::Pagination {
                reason: "page number must be at least 1".to_string(),
            }
            .into());
        }
        if items_per_page == 0 {
            return Err(InvalidInputError::Pagination {
                reason: "items per page must be at least 1".to_string(),
            }
            .into());
        }
        Ok(Self {
            page_number,
            items_per_page,
        })
    }

    /// The page to retrieve.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// The number of items per page.
    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// Renders the two query parameters, e.g. `page=1&perPage=30`.
    pub fn to_query_parameters(&self) -> String {
        format!("page={}&perPage={}", self.page_number, self.items_per_page)
    }
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page_number: Self::DEFAULT_PAGE_NUMBER,
            items_per_page: Self::DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_parameters() {
        assert_eq!(
            PaginationOptions::default().to_query_parameters(),
            "page=1&perPage=30"
        );
    }

    #[test]
    fn custom_values() {
        let options = PaginationOptions::new(37, 13).unwrap();
        assert_eq!(options.page_number(), 37);
        assert_eq!(options.items_per_page(), 13);
        assert_eq!(options.to_query_parameters(), "page=37&perPage=13");
    }

    #[test]
    fn zero_is_rejected() {
        assert!(PaginationOptions::new(0, 10).is_err());
        assert!(PaginationOptions::new(1, 0).is_err());
    }
}
