//! Sort order builder.

use std::fmt;

/// An ordered list of sort keys, rendered as `-name,age,-date`.
///
/// Field names are not validated and duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sort {
    keys: Vec<String>,
}

impl Sort {
    /// Sort by `field`, ascending.
    pub fn by(field: impl Into<String>) -> Self {
        Self::default().then_by(field)
    }

    /// Sort by `field`, descending.
    pub fn by_descending(field: impl AsRef<str>) -> Self {
        Self::default().then_by_descending(field)
    }

    /// Append an ascending key.
    pub fn then_by(mut self, field: impl Into<String>) -> Self {
        self.keys.push(field.into());
        self
    }

    /// Append a descending key.
    pub fn then_by_descending(mut self, field: impl AsRef<str>) -> Self {
        self.keys.push(format!("-{}", field.as_ref()));
        self
    }

    pub fn build(&self) -> String {
        self.keys.join(",")
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

impl From<Sort> for String {
    fn from(sort: Sort) -> String {
        sort.build()
    }
}
