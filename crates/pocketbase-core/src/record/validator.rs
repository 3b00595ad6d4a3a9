//! Write-payload checks against a record type's declared fields.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde_json::{Map, Value};

use super::{FieldKind, FieldSpec, Record, json_type_name};
use crate::error::{Error, MismatchedType};

const BASE_FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec::new("id", FieldKind::Text),
    FieldSpec::new("created", FieldKind::DateTime),
    FieldSpec::new("updated", FieldKind::DateTime),
    FieldSpec::new("collectionId", FieldKind::Text),
    FieldSpec::new("collectionName", FieldKind::Text),
];

/// Checks payloads for fields `R` does not declare and for values the
/// declared field type does not accept.
///
/// Field names match case-insensitively. `null` values are never reported
/// as mismatches.
pub struct RecordValidator<R> {
    record: PhantomData<fn() -> R>,
}

impl<R: Record> RecordValidator<R> {
    pub fn new() -> Self {
        Self {
            record: PhantomData,
        }
    }

    fn find(name: &str) -> Option<&'static FieldSpec> {
        BASE_FIELD_SPECS
            .iter()
            .chain(R::fields())
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
    }

    /// Payload keys that match no declared field, in payload order.
    pub fn unknown_properties(&self, payload: &Map<String, Value>) -> Vec<String> {
        payload
            .keys()
            .filter(|key| Self::find(key).is_none())
            .cloned()
            .collect()
    }

    /// Known fields whose supplied value does not fit the declared type.
    pub fn mismatched_property_types(
        &self,
        payload: &Map<String, Value>,
    ) -> BTreeMap<String, MismatchedType> {
        payload
            .iter()
            .filter(|(_, value)| !value.is_null())
            .filter_map(|(key, value)| {
                let spec = Self::find(key)?;
                (!spec.kind.accepts(value)).then(|| {
                    (
                        key.clone(),
                        MismatchedType {
                            expected: spec.describe(),
                            provided: json_type_name(value).to_string(),
                        },
                    )
                })
            })
            .collect()
    }

    /// Fail with [`Error::UnknownProperties`] if any key is undeclared.
    pub fn ensure_no_unknown_properties(&self, payload: &Map<String, Value>) -> Result<(), Error> {
        let names = self.unknown_properties(payload);
        if names.is_empty() {
            Ok(())
        } else {
            Err(Error::UnknownProperties {
                record: R::type_name(),
                names,
            })
        }
    }

    /// Fail with [`Error::MismatchedPropertyTypes`] if any value has the wrong type.
    pub fn ensure_no_mismatched_types(&self, payload: &Map<String, Value>) -> Result<(), Error> {
        let mismatches = self.mismatched_property_types(payload);
        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(Error::MismatchedPropertyTypes {
                record: R::type_name(),
                mismatches,
            })
        }
    }
}

impl<R: Record> Default for RecordValidator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for RecordValidator<R> {
    fn clone(&self) -> Self {
        Self {
            record: PhantomData,
        }
    }
}

impl<R: Record> fmt::Debug for RecordValidator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordValidator")
            .field("record", &R::type_name())
            .finish()
    }
}
