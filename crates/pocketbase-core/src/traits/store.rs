//! Record store trait.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::query::Query;
use crate::record::Record;
use crate::types::{AuthenticatedUser, Paged};
use crate::Result;

/// A backend that stores records in named collections.
///
/// Implementations own the authentication state and map every failure into
/// [`Error`](crate::Error). Payloads reach the store already validated.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Authenticate with the configured credentials, replacing any held token.
    async fn authenticate(&self) -> Result<AuthenticatedUser>;

    /// Returns true if a token is currently held.
    async fn is_authenticated(&self) -> bool;

    /// Create a record in `collection`.
    async fn create_record<R: Record>(&self, collection: &str, payload: &Value) -> Result<R>;

    /// Fetch one record by id.
    async fn get_record<R: Record>(&self, collection: &str, record_id: &str) -> Result<R>;

    /// Fetch one page of records matching `query`.
    async fn list_records<R: Record>(&self, collection: &str, query: &Query) -> Result<Paged<R>>;

    /// Patch the given fields of a record.
    async fn update_record<R: Record>(
        &self,
        collection: &str,
        record_id: &str,
        payload: &Map<String, Value>,
    ) -> Result<R>;

    /// Delete a record by id.
    async fn delete_record(&self, collection: &str, record_id: &str) -> Result<()>;
}
