//! Typed repository over a record store.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::config::RecordOperationBehavior;
use crate::error::{Error, InvalidInputError};
use crate::naming::CollectionNamingPipeline;
use crate::query::Query;
use crate::record::{Record, RecordValidator};
use crate::traits::RecordStore;
use crate::types::{Paged, PaginationOptions};
use crate::Result;

/// CRUD and search for one record type.
///
/// The collection name is resolved once, at construction. Write payloads
/// are validated according to the configured [`RecordOperationBehavior`]
/// before any request is sent.
pub struct Repository<R, S> {
    store: Arc<S>,
    collection: String,
    behavior: RecordOperationBehavior,
    validator: Option<RecordValidator<R>>,
}

impl<R: Record, S: RecordStore> Repository<R, S> {
    pub fn new(
        store: Arc<S>,
        naming: &CollectionNamingPipeline,
        behavior: RecordOperationBehavior,
    ) -> Self {
        let collection = naming.collection_name_of::<R>();
        debug!(record = R::type_name(), %collection, ?behavior, "repository created");
        Self {
            store,
            collection,
            behavior,
            validator: behavior.validates().then(RecordValidator::new),
        }
    }

    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    pub fn behavior(&self) -> RecordOperationBehavior {
        self.behavior
    }

    /// The validator applied to writes, absent under `IGNORE_ALL`.
    pub fn validator(&self) -> Option<&RecordValidator<R>> {
        self.validator.as_ref()
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Create a record from any serializable payload.
    ///
    /// Object payloads are validated like updates.
    #[instrument(skip_all, fields(collection = %self.collection))]
    pub async fn create<P>(&self, payload: &P) -> Result<R>
    where
        P: Serialize + ?Sized + Sync,
    {
        let payload = to_json(payload)?;
        if let Value::Object(fields) = &payload {
            self.validate(fields)?;
        }
        self.store.create_record(&self.collection, &payload).await
    }

    /// Fetch one record by id.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn get(&self, record_id: &str) -> Result<R> {
        self.store.get_record(&self.collection, record_id).await
    }

    /// Fetch the first page with default pagination and no filter.
    pub async fn list(&self) -> Result<Paged<R>> {
        self.search(&Query::new()).await
    }

    /// Fetch the first page of records matching `filter`.
    pub async fn list_records(&self, filter: impl Into<String>) -> Result<Paged<R>> {
        self.search(&Query::new().with_filter(filter)).await
    }

    /// Run a complete query.
    #[instrument(skip_all, fields(collection = %self.collection))]
    pub async fn search(&self, query: &Query) -> Result<Paged<R>> {
        self.store.list_records(&self.collection, query).await
    }

    /// Start a deferred query. Nothing is sent until
    /// [`QueryBuilder::execute`] is awaited.
    pub fn query(&self) -> QueryBuilder<'_, R, S> {
        QueryBuilder {
            repository: self,
            query: Query::new(),
        }
    }

    /// Update a record from any payload that serializes to a JSON object.
    pub async fn update<P>(&self, record_id: &str, payload: &P) -> Result<R>
    where
        P: Serialize + ?Sized + Sync,
    {
        match to_json(payload)? {
            Value::Object(fields) => self.update_fields(record_id, fields).await,
            other => Err(InvalidInputError::Payload {
                reason: format!("update payload must be an object, got {other}"),
            }
            .into()),
        }
    }

    /// Update a record from a field-value mapping.
    #[instrument(skip(self, payload), fields(collection = %self.collection))]
    pub async fn update_fields(&self, record_id: &str, payload: Map<String, Value>) -> Result<R> {
        self.validate(&payload)?;
        self.store
            .update_record(&self.collection, record_id, &payload)
            .await
    }

    /// Delete a record by id.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn delete(&self, record_id: &str) -> Result<()> {
        self.store.delete_record(&self.collection, record_id).await
    }

    fn validate(&self, fields: &Map<String, Value>) -> Result<()> {
        let Some(validator) = &self.validator else {
            return Ok(());
        };
        if self.behavior.checks_unknown_properties() {
            validator.ensure_no_unknown_properties(fields)?;
        }
        if self.behavior.checks_property_types() {
            validator.ensure_no_mismatched_types(fields)?;
        }
        Ok(())
    }
}

impl<R, S> Clone for Repository<R, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            collection: self.collection.clone(),
            behavior: self.behavior,
            validator: self.validator.clone(),
        }
    }
}

impl<R: Record, S> fmt::Debug for Repository<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("record", &R::type_name())
            .field("collection", &self.collection)
            .field("behavior", &self.behavior)
            .finish_non_exhaustive()
    }
}

fn to_json<P: Serialize + ?Sized>(payload: &P) -> Result<Value> {
    serde_json::to_value(payload).map_err(|e| {
        Error::from(InvalidInputError::Payload {
            reason: e.to_string(),
        })
    })
}

/// A query under construction, bound to a repository.
#[must_use = "a query does nothing until executed"]
pub struct QueryBuilder<'a, R, S> {
    repository: &'a Repository<R, S>,
    query: Query,
}

impl<'a, R: Record, S: RecordStore> QueryBuilder<'a, R, S> {
    pub fn with_filter(self, filter: impl Into<String>) -> Self {
        Self {
            query: self.query.with_filter(filter),
            ..self
        }
    }

    pub fn with_sorting(self, sorting: impl Into<String>) -> Self {
        Self {
            query: self.query.with_sorting(sorting),
            ..self
        }
    }

    pub fn with_pagination(self, pagination: PaginationOptions) -> Self {
        Self {
            query: self.query.with_pagination(pagination),
            ..self
        }
    }

    /// The query as built so far.
    pub fn build(&self) -> Query {
        self.query.clone()
    }

    /// Send the query.
    pub async fn execute(self) -> Result<Paged<R>> {
        self.repository.search(&self.query).await
    }
}
