//! The authenticated user and the password-auth response envelope.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::tokens::AuthToken;

/// The user record returned by a successful password authentication.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: String,

    #[serde(with = "crate::datetime")]
    pub created: DateTime<Utc>,

    #[serde(with = "crate::datetime")]
    pub updated: DateTime<Utc>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub verified: bool,

    #[serde(default)]
    pub email_visibility: bool,
}

impl AuthenticatedUser {
    /// Wire names of the user fields.
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "created",
        "updated",
        "username",
        "email",
        "verified",
        "emailVisibility",
    ];
}

/// Response body of `auth-with-password`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: AuthToken,
    pub record: AuthenticatedUser,
}

impl AuthResponse {
    /// Wire names of the envelope fields.
    pub const FIELDS: &'static [&'static str] = &["token", "record"];
}
