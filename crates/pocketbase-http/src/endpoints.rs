//! PocketBase REST paths.
//!
//! Collection names and record ids are percent-encoded as single path
//! segments.

use urlencoding::encode;

/// Password authentication for an auth collection.
pub fn auth_with_password(collection: &str) -> String {
    format!("api/collections/{}/auth-with-password", encode(collection))
}

/// The record list of a collection.
pub fn records(collection: &str) -> String {
    format!("api/collections/{}/records", encode(collection))
}

/// A single record.
pub fn record(collection: &str, record_id: &str) -> String {
    format!("{}/{}", records(collection), encode(record_id))
}
