//! Error types for the PocketBase SDK.
//!
//! This module provides a unified error type with one variant per failure
//! kind. Every variant keeps the context needed to diagnose the failure: the
//! HTTP status, the raw response body, the offending payload or record id.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// The unified error type for PocketBase operations.
///
/// Callers can tell apart "not authenticated" ([`Error::is_unauthenticated`]),
/// "bad request shape" ([`Error::is_validation`]), "remote rejected"
/// ([`Error::is_rejected`]) and "remote returned garbage"
/// ([`Error::is_malformed`]).
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The password authentication request was rejected.
    #[error("unable to authenticate the client with the provided credentials (HTTP {status})")]
    AuthenticationFailed { status: u16, body: String },

    /// The client holds no token and silent authentication is disabled.
    #[error("the client is not yet authenticated")]
    UnauthenticatedClient,

    /// A success response could not be decoded into the expected shape.
    #[error("unable to read a {expected} from the received response")]
    MalformedResponse { expected: &'static str, body: String },

    /// The server refused to create a record.
    #[error("the creation of the new record failed (HTTP {status})")]
    RecordCreationFailed {
        payload: Value,
        status: u16,
        body: String,
    },

    /// The server refused to update a record.
    #[error("the update of record '{record_id}' failed (HTTP {status})")]
    RecordUpdateFailed {
        record_id: String,
        payload: Value,
        status: u16,
        body: String,
    },

    /// The server refused to delete a record.
    #[error("the deletion of record '{record_id}' failed (HTTP {status})")]
    RecordDeletionFailed {
        record_id: String,
        status: u16,
        body: String,
    },

    /// A fetch by id or a listing failed.
    #[error("unable to retrieve the search result (HTTP {status})")]
    RecordSearchFailed { status: u16, body: String },

    /// A write payload names fields the record type does not declare.
    #[error("one or more keys don't exist in the definition of {record}: {}", names.join(", "))]
    UnknownProperties {
        record: &'static str,
        names: Vec<String>,
    },

    /// A write payload carries values whose type the field does not accept.
    #[error("one or more properties of {record} have an unexpected type: {}", format_mismatches(mismatches))]
    MismatchedPropertyTypes {
        record: &'static str,
        mismatches: BTreeMap<String, MismatchedType>,
    },

    /// Input validation errors (server URL, pagination, payload shape).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if the client could not obtain or present a token.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            Error::UnauthenticatedClient | Error::AuthenticationFailed { .. }
        )
    }

    /// Returns true if the request was refused locally before reaching the server.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::UnknownProperties { .. }
                | Error::MismatchedPropertyTypes { .. }
                | Error::InvalidInput(_)
        )
    }

    /// Returns true if the server answered with a non-success status.
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            Error::RecordCreationFailed { .. }
                | Error::RecordUpdateFailed { .. }
                | Error::RecordDeletionFailed { .. }
                | Error::RecordSearchFailed { .. }
        )
    }

    /// Returns true if the server answered successfully with an unreadable body.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedResponse { .. })
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::AuthenticationFailed { status, .. }
            | Error::RecordCreationFailed { status, .. }
            | Error::RecordUpdateFailed { status, .. }
            | Error::RecordDeletionFailed { status, .. }
            | Error::RecordSearchFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body carried by this error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::AuthenticationFailed { body, .. }
            | Error::MalformedResponse { body, .. }
            | Error::RecordCreationFailed { body, .. }
            | Error::RecordUpdateFailed { body, .. }
            | Error::RecordDeletionFailed { body, .. }
            | Error::RecordSearchFailed { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The response body could not be read.
    #[error("failed to read response body: {message}")]
    Body { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid server URL.
    #[error("invalid server URL '{value}': {reason}")]
    ServerUrl { value: String, reason: String },

    /// Pagination values out of range.
    #[error("invalid pagination: {reason}")]
    Pagination { reason: String },

    /// A payload could not be turned into a JSON object.
    #[error("invalid payload: {reason}")]
    Payload { reason: String },
}

/// Expected and provided type names for a mismatched field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchedType {
    /// The declared type of the field.
    pub expected: String,
    /// The JSON type of the supplied value.
    pub provided: String,
}

impl fmt::Display for MismatchedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, got {}", self.expected, self.provided)
    }
}

fn format_mismatches(mismatches: &BTreeMap<String, MismatchedType>) -> String {
    mismatches
        .iter()
        .map(|(field, details)| format!("{field} ({details})"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Adapter for callback-style error handling.
///
/// Converts a failed [`Result`](crate::Result) into a handler invocation
/// plus `None`, never a guessed default value.
///
/// ```
/// use pocketbase_core::{Error, Recover};
///
/// let failed: pocketbase_core::Result<u32> = Err(Error::UnauthenticatedClient);
/// let mut seen = None;
/// assert_eq!(failed.recover_with(|e| seen = Some(e.to_string())), None);
/// assert!(seen.is_some());
/// ```
pub trait Recover<T> {
    /// Returns the success value, or invokes `handler` with the error and returns `None`.
    fn recover_with<F>(self, handler: F) -> Option<T>
    where
        F: FnOnce(Error);
}

impl<T> Recover<T> for std::result::Result<T, Error> {
    fn recover_with<F>(self, handler: F) -> Option<T>
    where
        F: FnOnce(Error),
    {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                handler(error);
                None
            }
        }
    }
}
