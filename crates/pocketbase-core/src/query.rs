//! Listing query: filter, sort order and page selection.

use url::form_urlencoded;

use crate::types::PaginationOptions;

/// An immutable listing query.
///
/// Every `with_*` call returns a new value. An empty filter means no
/// filtering and an empty sort means server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filter: String,
    sorting: String,
    pagination: PaginationOptions,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the filter expression.
    ///
    /// Accepts a string or a built node such as
    /// [`OperatorNode`](crate::filter::OperatorNode).
    pub fn with_filter(self, filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ..self
        }
    }

    /// Replace the sort order. Accepts a string or a [`Sort`](crate::Sort).
    pub fn with_sorting(self, sorting: impl Into<String>) -> Self {
        Self {
            sorting: sorting.into(),
            ..self
        }
    }

    pub fn with_pagination(self, pagination: PaginationOptions) -> Self {
        Self { pagination, ..self }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sorting(&self) -> &str {
        &self.sorting
    }

    pub fn pagination(&self) -> PaginationOptions {
        self.pagination
    }

    /// Query parameters in request order, empty ones omitted.
    ///
    /// The filter is wrapped in parentheses.
    pub fn parameters(&self) -> Vec<String> {
        let mut parameters = Vec::with_capacity(3);
        if !self.filter.is_empty() {
            parameters.push(format!("filter={}", encode(&format!("({})", self.filter))));
        }
        if !self.sorting.is_empty() {
            parameters.push(format!("sort={}", encode(&self.sorting)));
        }
        parameters.push(self.pagination.to_query_parameters());
        parameters
    }

    /// Render as `?filter=(...)&sort=...&page=N&perPage=M`.
    pub fn to_query_string(&self) -> String {
        append_query_parameters(&self.parameters())
    }
}

/// Join non-empty parameter strings with `&`, prefixed by `?` when at least one remains.
pub fn append_query_parameters<S: AsRef<str>>(parameters: &[S]) -> String {
    let joined = parameters
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("&");

    if joined.is_empty() {
        joined
    } else {
        format!("?{joined}")
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
