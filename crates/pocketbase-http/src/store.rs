//! The authenticated request pipeline.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use pocketbase_core::types::ServerUrl;
use pocketbase_core::{
    AuthToken, AuthenticatedUser, ClientConfig, Credentials, Error, Paged, Query, Record,
    RecordStore, Result,
};

use crate::client::HttpClient;
use crate::endpoints;
use crate::wire;

/// Authentication state of a client.
enum AuthState {
    Unauthenticated,
    Authenticated(AuthToken),
}

/// HTTP client for one PocketBase server.
///
/// The client starts unauthenticated. With silent authentication enabled
/// (the default) the first request authenticates with the configured
/// credentials; otherwise requests fail with
/// [`Error::UnauthenticatedClient`] until [`authenticate`] succeeds.
///
/// Clones share the authentication state. Concurrent first requests may
/// each authenticate; the last token stored is kept.
///
/// [`authenticate`]: RecordStore::authenticate
#[derive(Clone)]
pub struct PocketBaseClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    credentials: Credentials,
    silent_authentication: bool,
    auth: RwLock<AuthState>,
}

impl PocketBaseClient {
    /// Create a client from the connection part of `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(ClientInner {
                http: HttpClient::new(config.server_url.clone())?,
                credentials: config.credentials.clone(),
                silent_authentication: config.silent_authentication,
                auth: RwLock::new(AuthState::Unauthenticated),
            }),
        })
    }

    pub fn server_url(&self) -> &ServerUrl {
        self.inner.http.server()
    }

    pub fn silent_authentication(&self) -> bool {
        self.inner.silent_authentication
    }

    async fn current_token(&self) -> Option<AuthToken> {
        match &*self.inner.auth.read().await {
            AuthState::Authenticated(token) => Some(token.clone()),
            AuthState::Unauthenticated => None,
        }
    }

    /// Returns a token, authenticating first if allowed.
    ///
    /// A silently obtained token is used as is, even if a concurrent
    /// authentication has since replaced or cleared the stored one.
    async fn token(&self) -> Result<AuthToken> {
        if let Some(token) = self.current_token().await {
            return Ok(token);
        }
        if !self.inner.silent_authentication {
            return Err(Error::UnauthenticatedClient);
        }

        debug!("no token held, authenticating silently");
        let (token, _) = self.sign_in().await?;
        Ok(token)
    }

    /// Password authentication.
    ///
    /// The stored token is cleared before the request and set only once the
    /// response decodes.
    async fn sign_in(&self) -> Result<(AuthToken, AuthenticatedUser)> {
        *self.inner.auth.write().await = AuthState::Unauthenticated;

        let credentials = &self.inner.credentials;
        let path = endpoints::auth_with_password(credentials.collection_name());
        let response = self
            .inner
            .http
            .post(&path, None, &credentials.auth_request())
            .await?;

        if !response.is_success() {
            warn!(status = %response.status, "authentication rejected");
            return Err(Error::AuthenticationFailed {
                status: response.status.as_u16(),
                body: response.body,
            });
        }

        let auth = wire::decode_auth(&response.body)?;
        *self.inner.auth.write().await = AuthState::Authenticated(auth.token.clone());
        info!(user = %auth.record.id, "authenticated");
        Ok((auth.token, auth.record))
    }
}

#[async_trait]
impl RecordStore for PocketBaseClient {
    #[instrument(skip(self), fields(
        identity = %self.inner.credentials.identity(),
        collection = %self.inner.credentials.collection_name()
    ))]
    async fn authenticate(&self) -> Result<AuthenticatedUser> {
        let (_, user) = self.sign_in().await?;
        Ok(user)
    }

    async fn is_authenticated(&self) -> bool {
        self.current_token().await.is_some()
    }

    #[instrument(skip(self, payload))]
    async fn create_record<R: Record>(&self, collection: &str, payload: &Value) -> Result<R> {
        debug!("creating record");
        let token = self.token().await?;
        let response = self
            .inner
            .http
            .post(&endpoints::records(collection), Some(&token), payload)
            .await?;

        if !response.is_success() {
            warn!(status = %response.status, "record creation rejected");
            return Err(Error::RecordCreationFailed {
                payload: payload.clone(),
                status: response.status.as_u16(),
                body: response.body,
            });
        }
        wire::decode_record(&response.body)
    }

    #[instrument(skip(self))]
    async fn get_record<R: Record>(&self, collection: &str, record_id: &str) -> Result<R> {
        debug!("fetching record");
        let token = self.token().await?;
        let response = self
            .inner
            .http
            .get(&endpoints::record(collection, record_id), Some(&token))
            .await?;

        if !response.is_success() {
            warn!(status = %response.status, "record fetch rejected");
            return Err(Error::RecordSearchFailed {
                status: response.status.as_u16(),
                body: response.body,
            });
        }
        wire::decode_record(&response.body)
    }

    #[instrument(skip(self, query), fields(filter = query.filter(), sort = query.sorting()))]
    async fn list_records<R: Record>(&self, collection: &str, query: &Query) -> Result<Paged<R>> {
        debug!("listing records");
        let token = self.token().await?;
        let path = format!("{}{}", endpoints::records(collection), query.to_query_string());
        let response = self.inner.http.get(&path, Some(&token)).await?;

        if !response.is_success() {
            warn!(status = %response.status, "record listing rejected");
            return Err(Error::RecordSearchFailed {
                status: response.status.as_u16(),
                body: response.body,
            });
        }
        wire::decode_page(&response.body)
    }

    #[instrument(skip(self, payload))]
    async fn update_record<R: Record>(
        &self,
        collection: &str,
        record_id: &str,
        payload: &Map<String, Value>,
    ) -> Result<R> {
        debug!(fields = payload.len(), "updating record");
        let token = self.token().await?;
        let response = self
            .inner
            .http
            .patch(&endpoints::record(collection, record_id), Some(&token), payload)
            .await?;

        if !response.is_success() {
            warn!(status = %response.status, "record update rejected");
            return Err(Error::RecordUpdateFailed {
                record_id: record_id.to_string(),
                payload: Value::Object(payload.clone()),
                status: response.status.as_u16(),
                body: response.body,
            });
        }
        wire::decode_record(&response.body)
    }

    #[instrument(skip(self))]
    async fn delete_record(&self, collection: &str, record_id: &str) -> Result<()> {
        debug!("deleting record");
        let token = self.token().await?;
        let response = self
            .inner
            .http
            .delete(&endpoints::record(collection, record_id), Some(&token))
            .await?;

        if !response.is_success() {
            warn!(status = %response.status, "record deletion rejected");
            return Err(Error::RecordDeletionFailed {
                record_id: record_id.to_string(),
                status: response.status.as_u16(),
                body: response.body,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for PocketBaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PocketBaseClient")
            .field("server", self.inner.http.server())
            .field("credentials", &self.inner.credentials)
            .field("silent_authentication", &self.inner.silent_authentication)
            .field("auth", &"[REDACTED]")
            .finish()
    }
}
