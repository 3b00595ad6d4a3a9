//! Built-in naming rules.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

use regex::Regex;

use super::{CollectionNamingRule, RecordType};

/// Replace the current name with the record type name, first letter lowercased.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedWithTypeName;

impl CollectionNamingRule for SeedWithTypeName {
    fn build_name(&self, record: &RecordType, _current: &str) -> String {
        lowercase_first(record.name())
    }
}

/// Remove a trailing suffix, `Record` by default.
#[derive(Debug, Clone)]
pub struct TrimSuffix {
    suffix: Suffix,
}

#[derive(Debug, Clone)]
enum Suffix {
    Literal(String),
    Pattern(Regex),
}

impl TrimSuffix {
    pub const DEFAULT_SUFFIX: &'static str = "Record";

    /// Trim a literal suffix.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: Suffix::Literal(suffix.into()),
        }
    }

    /// Trim whatever `pattern` matches at the end of the name.
    ///
    /// The pattern is anchored with `$`.
    pub fn matching(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("(?:{pattern})$"))?;
        Ok(Self {
            suffix: Suffix::Pattern(regex),
        })
    }
}

impl Default for TrimSuffix {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SUFFIX)
    }
}

impl CollectionNamingRule for TrimSuffix {
    fn build_name(&self, _record: &RecordType, current: &str) -> String {
        match &self.suffix {
            Suffix::Literal(suffix) => current
                .strip_suffix(suffix.as_str())
                .unwrap_or(current)
                .to_string(),
            Suffix::Pattern(regex) => regex.replace(current, "").into_owned(),
        }
    }
}

/// Lowercase the first character.
#[derive(Debug, Clone, Copy, Default)]
pub struct UseCamelCase;

impl CollectionNamingRule for UseCamelCase {
    fn build_name(&self, _record: &RecordType, current: &str) -> String {
        lowercase_first(current)
    }
}

/// Append `s` unless the name already ends in `s`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsePlural;

impl CollectionNamingRule for UsePlural {
    fn build_name(&self, _record: &RecordType, current: &str) -> String {
        if current.ends_with('s') {
            current.to_string()
        } else {
            format!("{current}s")
        }
    }
}

type Transformation = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Apply a caller-supplied transformation to every record type.
pub struct UseTransformation {
    transform: Transformation,
}

impl UseTransformation {
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            transform: Box::new(transform),
        }
    }
}

impl fmt::Debug for UseTransformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UseTransformation").finish_non_exhaustive()
    }
}

impl CollectionNamingRule for UseTransformation {
    fn build_name(&self, _record: &RecordType, current: &str) -> String {
        (self.transform)(current)
    }
}

/// Apply a transformation only when resolving exactly `T`.
///
/// Any other type passes through unchanged, which makes this the way to
/// override the name of a single record type.
pub struct ForRecord<T: ?Sized + 'static> {
    transform: Transformation,
    target: PhantomData<fn() -> T>,
}

impl<T: ?Sized + 'static> ForRecord<T> {
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            transform: Box::new(transform),
            target: PhantomData,
        }
    }

    /// Replace the name of `T` with a fixed collection name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(move |_| name.clone())
    }
}

impl<T: ?Sized + 'static> fmt::Debug for ForRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForRecord")
            .field("target", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized + 'static> CollectionNamingRule for ForRecord<T> {
    fn build_name(&self, record: &RecordType, current: &str) -> String {
        if record.id() == TypeId::of::<T>() {
            (self.transform)(current)
        } else {
            current.to_string()
        }
    }
}

fn lowercase_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
