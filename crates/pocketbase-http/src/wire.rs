//! Response decoding.
//!
//! PocketBase field names are matched case-insensitively: keys that equal a
//! known field name ignoring ASCII case are renamed to the canonical
//! spelling before serde sees them.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use pocketbase_core::record::BASE_FIELDS;
use pocketbase_core::{AuthResponse, AuthenticatedUser, Error, Paged, Record, Result};

/// Decode a single record.
pub(crate) fn decode_record<R: Record>(body: &str) -> Result<R> {
    let mut value = parse(body, R::type_name())?;
    canonicalize_record::<R>(&mut value);
    convert(value, body, R::type_name())
}

/// Decode a page of records.
pub(crate) fn decode_page<R: Record>(body: &str) -> Result<Paged<R>> {
    const EXPECTED: &str = "page of records";

    let mut value = parse(body, EXPECTED)?;
    if let Some(envelope) = value.as_object_mut() {
        canonicalize(envelope, Paged::<R>::FIELDS);
        if let Some(Value::Array(items)) = envelope.get_mut("items") {
            items.iter_mut().for_each(canonicalize_record::<R>);
        }
    }
    convert(value, body, EXPECTED)
}

/// Decode the `auth-with-password` response.
pub(crate) fn decode_auth(body: &str) -> Result<AuthResponse> {
    const EXPECTED: &str = "authentication response";

    let mut value = parse(body, EXPECTED)?;
    if let Some(envelope) = value.as_object_mut() {
        canonicalize(envelope, AuthResponse::FIELDS);
        if let Some(Value::Object(record)) = envelope.get_mut("record") {
            canonicalize(record, AuthenticatedUser::FIELDS);
        }
    }
    convert(value, body, EXPECTED)
}

fn parse(body: &str, expected: &'static str) -> Result<Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) | Err(_) => Err(malformed(expected, body)),
        Ok(value) => Ok(value),
    }
}

fn convert<T: DeserializeOwned>(value: Value, body: &str, expected: &'static str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(error = %e, expected, "response does not match the expected shape");
        malformed(expected, body)
    })
}

fn malformed(expected: &'static str, body: &str) -> Error {
    Error::MalformedResponse {
        expected,
        body: body.to_string(),
    }
}

fn canonicalize_record<R: Record>(value: &mut Value) {
    if let Value::Object(map) = value {
        let known: Vec<&str> = BASE_FIELDS
            .iter()
            .copied()
            .chain(R::fields().iter().map(|spec| spec.name))
            .collect();
        canonicalize(map, &known);
    }
}

/// Rename keys to the known spelling they match ignoring case.
///
/// A key is left alone if its canonical spelling is already present.
pub(crate) fn canonicalize(map: &mut Map<String, Value>, known: &[&str]) {
    let renames: Vec<(String, &str)> = map
        .keys()
        .filter_map(|key| {
            known
                .iter()
                .find(|name| **name != key.as_str() && name.eq_ignore_ascii_case(key))
                .map(|name| (key.clone(), *name))
        })
        .collect();

    for (from, to) in renames {
        if map.contains_key(to) {
            continue;
        }
        if let Some(value) = map.remove(&from) {
            map.insert(to.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocketbase_core::{FieldKind, FieldSpec, RecordMeta};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct NoteRecord {
        #[serde(flatten)]
        meta: RecordMeta,
        title: String,
        is_pinned: bool,
    }

    impl Record for NoteRecord {
        fn fields() -> &'static [FieldSpec] {
            const FIELDS: &[FieldSpec] = &[
                FieldSpec::new("title", FieldKind::Text),
                FieldSpec::new("isPinned", FieldKind::Bool),
            ];
            FIELDS
        }

        fn meta(&self) -> &RecordMeta {
            &self.meta
        }
    }

    fn note(keys: [&str; 7]) -> Value {
        let values = [
            json!("n1"),
            json!("2024-01-01 10:00:00.000Z"),
            json!("2024-01-01 10:00:00.000Z"),
            json!("pbc_notes"),
            json!("notes"),
            json!("Groceries"),
            json!(true),
        ];
        Value::Object(
            keys.iter()
                .map(|k| k.to_string())
                .zip(values)
                .collect(),
        )
    }

    #[test]
    fn record_keys_match_ignoring_case() {
        let body = note([
            "ID",
            "Created",
            "UPDATED",
            "collectionid",
            "CollectionName",
            "Title",
            "ISPINNED",
        ])
        .to_string();

        let record: NoteRecord = decode_record(&body).unwrap();
        assert_eq!(record.meta.id, "n1");
        assert_eq!(record.meta.collection_id, "pbc_notes");
        assert_eq!(record.title, "Groceries");
        assert!(record.is_pinned);
    }

    #[test]
    fn page_items_are_canonicalized() {
        let item = note([
            "id",
            "created",
            "updated",
            "collectionId",
            "collectionName",
            "TITLE",
            "isPinned",
        ]);
        let body = json!({
            "Page": 1,
            "PerPage": 30,
            "TotalItems": 1,
            "TotalPages": 1,
            "Items": [item]
        })
        .to_string();

        let page: Paged<NoteRecord> = decode_page(&body).unwrap();
        assert_eq!(page.items_per_page, 30);
        assert_eq!(page.items[0].title, "Groceries");
    }

    #[test]
    fn null_body_is_malformed() {
        let err = decode_record::<NoteRecord>("null").unwrap_err();
        match err {
            Error::MalformedResponse { expected, body } => {
                assert_eq!(expected, "NoteRecord");
                assert_eq!(body, "null");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_and_mismatched_bodies_are_malformed() {
        assert!(decode_record::<NoteRecord>("").unwrap_err().is_malformed());
        assert!(
            decode_record::<NoteRecord>(r#"{"id": 5}"#)
                .unwrap_err()
                .is_malformed()
        );
        assert!(decode_auth(r#"{"token": "t"}"#).unwrap_err().is_malformed());
    }

    #[test]
    fn existing_canonical_key_wins() {
        let mut map = json!({"title": "a", "Title": "b"})
            .as_object()
            .cloned()
            .unwrap();
        canonicalize(&mut map, &["title"]);
        assert_eq!(map["title"], "a");
        assert_eq!(map["Title"], "b");
    }
}
