//! Entry point that turns a configuration into repositories.

use std::sync::Arc;

use tracing::debug;

use pocketbase_core::{
    AuthenticatedUser, ClientConfig, CollectionNamingPipeline, Record, RecordOperationBehavior,
    RecordStore, Repository, Result,
};

use crate::store::PocketBaseClient;

/// A configured PocketBase connection.
///
/// Every repository handed out shares the same client, and therefore the
/// same authentication state, and the same naming pipeline.
///
/// ```no_run
/// # use pocketbase_core::{ClientConfig, Credentials, ServerUrl};
/// # use pocketbase_http::PocketBase;
/// # async fn run() -> pocketbase_core::Result<()> {
/// let config = ClientConfig::new(
///     ServerUrl::new("http://127.0.0.1:8090")?,
///     Credentials::new("admin@example.com", "secret"),
/// );
/// let pocketbase = PocketBase::new(config)?;
/// let user = pocketbase.authenticate().await?;
/// println!("signed in as {}", user.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PocketBase {
    client: Arc<PocketBaseClient>,
    behavior: RecordOperationBehavior,
    naming: Arc<CollectionNamingPipeline>,
}

impl PocketBase {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = PocketBaseClient::new(&config)?;
        debug!(server = %config.server_url, behavior = ?config.behavior, "PocketBase configured");
        Ok(Self {
            client: Arc::new(client),
            behavior: config.behavior,
            naming: config.naming,
        })
    }

    pub fn client(&self) -> &Arc<PocketBaseClient> {
        &self.client
    }

    /// The naming pipeline; add rules here before creating repositories.
    pub fn naming(&self) -> &CollectionNamingPipeline {
        &self.naming
    }

    pub fn behavior(&self) -> RecordOperationBehavior {
        self.behavior
    }

    /// Register `R` and return its repository.
    pub fn repository<R: Record>(&self) -> Repository<R, PocketBaseClient> {
        Repository::new(self.client.clone(), &self.naming, self.behavior)
    }

    /// Authenticate eagerly instead of on first use.
    pub async fn authenticate(&self) -> Result<AuthenticatedUser> {
        self.client.authenticate().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.client.is_authenticated().await
    }
}
