//! Thin `reqwest` wrapper that returns status and raw body.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use tracing::{debug, instrument, trace};

use pocketbase_core::types::ServerUrl;
use pocketbase_core::{AuthToken, Error, TransportError};

/// A response whose body has been read in full.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// HTTP client bound to one PocketBase server.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    server: ServerUrl,
}

impl HttpClient {
    pub fn new(server: ServerUrl) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pocketbase-http/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport_error)?;

        Ok(Self { client, server })
    }

    pub fn server(&self) -> &ServerUrl {
        &self.server
    }

    pub async fn get(&self, path: &str, token: Option<&AuthToken>) -> Result<RawResponse, Error> {
        self.send(Method::GET, path, token, None::<&()>).await
    }

    pub async fn post<B>(
        &self,
        path: &str,
        token: Option<&AuthToken>,
        body: &B,
    ) -> Result<RawResponse, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send(Method::POST, path, token, Some(body)).await
    }

    pub async fn patch<B>(
        &self,
        path: &str,
        token: Option<&AuthToken>,
        body: &B,
    ) -> Result<RawResponse, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send(Method::PATCH, path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&AuthToken>) -> Result<RawResponse, Error> {
        self.send(Method::DELETE, path, token, None::<&()>).await
    }

    #[instrument(skip(self, token, body), fields(server = %self.server))]
    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&AuthToken>,
        body: Option<&B>,
    ) -> Result<RawResponse, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.server.api_url(path);
        debug!(%method, %url, authenticated = token.is_some(), "sending request");

        let mut request: RequestBuilder = self
            .client
            .request(method, &url)
            .header(ACCEPT, "application/json");
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, token.bearer());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::Transport(TransportError::Body {
                message: e.to_string(),
            })
        })?;
        trace!(%status, bytes = body.len(), "response received");

        Ok(RawResponse { status, body })
    }
}

/// Classify a `reqwest` failure.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_body() || err.is_decode() {
        TransportError::Body {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
