//! Record model and write-payload validation.
//!
//! Record types declare their fields explicitly through [`Record::fields`].
//! The declaration drives both the [`RecordValidator`] and the
//! case-insensitive response decoding.

mod validator;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use validator::RecordValidator;

/// Fields every persisted record carries, in wire spelling.
pub const BASE_FIELDS: &[&str] = &["id", "created", "updated", "collectionId", "collectionName"];

/// Identity, audit and collection membership shared by all records.
///
/// Flatten it into a record type with `#[serde(flatten)]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    /// Unique identifier within the collection.
    pub id: String,

    /// Creation instant.
    #[serde(with = "crate::datetime")]
    pub created: DateTime<Utc>,

    /// Last modification instant.
    #[serde(with = "crate::datetime")]
    pub updated: DateTime<Utc>,

    /// Identifier of the owning collection.
    pub collection_id: String,

    /// Name of the owning collection.
    pub collection_name: String,
}

/// A record type stored in a PocketBase collection.
///
/// # Example
///
/// ```
/// use pocketbase_core::{FieldKind, FieldSpec, Record, RecordMeta};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct TodoItemRecord {
///     #[serde(flatten)]
///     meta: RecordMeta,
///     description: String,
///     is_completed: bool,
/// }
///
/// impl Record for TodoItemRecord {
///     fn fields() -> &'static [FieldSpec] {
///         const FIELDS: &[FieldSpec] = &[
///             FieldSpec::new("description", FieldKind::Text),
///             FieldSpec::new("isCompleted", FieldKind::Bool),
///         ];
///         FIELDS
///     }
///
///     fn meta(&self) -> &RecordMeta {
///         &self.meta
///     }
/// }
/// ```
pub trait Record: DeserializeOwned + Send + Sync + 'static {
    /// Fields declared by this record type, excluding [`BASE_FIELDS`].
    fn fields() -> &'static [FieldSpec];

    /// Identity and audit data of this record.
    fn meta(&self) -> &RecordMeta;

    /// Short type name used in diagnostics.
    fn type_name() -> &'static str {
        short_type_name::<Self>()
    }
}

/// Declared type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    Bool,
    DateTime,
    Array,
    Object,
    /// Accepts any JSON value.
    Any,
}

impl FieldKind {
    /// Returns true if a JSON value of this shape fits the declared type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Any => true,
            FieldKind::Text => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::DateTime => value
                .as_str()
                .is_some_and(|s| s.is_empty() || crate::datetime::parse(s).is_ok()),
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Bool => "bool",
            FieldKind::DateTime => "datetime",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
            FieldKind::Any => "any",
        }
    }
}

/// Declaration of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name of the field.
    pub name: &'static str,
    /// Declared type.
    pub kind: FieldKind,
    /// Whether `null` is an acceptable value.
    pub nullable: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Human-readable declared type, e.g. `number?` for a nullable number.
    pub fn describe(&self) -> String {
        if self.nullable {
            format!("{}?", self.kind.as_str())
        } else {
            self.kind.as_str().to_string()
        }
    }
}

/// Name of a JSON value's runtime type, for diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "text",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Last path segment of a type name, without generic arguments.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FamousAuthorRecord;

    #[test]
    fn short_type_name_strips_module_path() {
        assert_eq!(short_type_name::<FamousAuthorRecord>(), "FamousAuthorRecord");
        assert_eq!(short_type_name::<Vec<u8>>(), "Vec");
    }

    #[test]
    fn field_kind_acceptance() {
        assert!(FieldKind::Text.accepts(&json!("hello")));
        assert!(!FieldKind::Text.accepts(&json!(1)));
        assert!(FieldKind::Number.accepts(&json!(1.5)));
        assert!(FieldKind::Number.accepts(&json!(3)));
        assert!(FieldKind::Integer.accepts(&json!(3)));
        assert!(!FieldKind::Integer.accepts(&json!(3.5)));
        assert!(FieldKind::Bool.accepts(&json!(false)));
        assert!(FieldKind::DateTime.accepts(&json!("2024-01-01 00:00:00.000Z")));
        assert!(!FieldKind::DateTime.accepts(&json!("yesterday")));
        assert!(FieldKind::Array.accepts(&json!(["a"])));
        assert!(FieldKind::Object.accepts(&json!({"a": 1})));
        assert!(FieldKind::Any.accepts(&json!(null)));
    }

    #[test]
    fn meta_deserializes_camel_case() {
        let meta: RecordMeta = serde_json::from_value(json!({
            "id": "abc123",
            "created": "2024-01-01 10:00:00.000Z",
            "updated": "2024-01-02 10:00:00.000Z",
            "collectionId": "pbc_1",
            "collectionName": "todoItems"
        }))
        .unwrap();

        assert_eq!(meta.id, "abc123");
        assert_eq!(meta.collection_name, "todoItems");
        assert!(meta.updated >= meta.created);
    }

    #[test]
    fn nullable_description() {
        assert_eq!(FieldSpec::new("age", FieldKind::Number).describe(), "number");
        assert_eq!(
            FieldSpec::new("age", FieldKind::Number).nullable().describe(),
            "number?"
        );
    }
}
