//! Password authentication credentials.

use std::fmt;

use serde::Serialize;

/// Default collection that password authentication targets.
pub const DEFAULT_AUTH_COLLECTION: &str = "users";

/// Credentials of the account the client authenticates as.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use pocketbase_core::Credentials;
///
/// let creds = Credentials::new("technical@account.com", "secret")
///     .with_collection("_superusers");
/// assert_eq!(creds.identity(), "technical@account.com");
/// assert_eq!(creds.collection_name(), "_superusers");
/// ```
#[derive(Clone)]
pub struct Credentials {
    identity: String,
    password: String,
    collection_name: String,
}

impl Credentials {
    /// Create credentials authenticating against the `users` collection.
    ///
    /// # Arguments
    ///
    /// * `identity` - Username or email address of the account
    /// * `password` - The account password
    pub fn new(identity: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            password: password.into(),
            collection_name: DEFAULT_AUTH_COLLECTION.to_string(),
        }
    }

    /// Target another auth collection (e.g. `_superusers`).
    pub fn with_collection(mut self, collection_name: impl Into<String>) -> Self {
        self.collection_name = collection_name.into();
        self
    }

    /// Returns the identity (username or email).
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Returns the collection the account authenticates against.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Request body for `auth-with-password`.
    pub fn auth_request(&self) -> PasswordAuthRequest<'_> {
        PasswordAuthRequest {
            identity: &self.identity,
            password: &self.password,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("password", &"[REDACTED]")
            .field("collection_name", &self.collection_name)
            .finish()
    }
}

/// Body of a password authentication request.
#[derive(Serialize)]
pub struct PasswordAuthRequest<'a> {
    pub identity: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hides_password_in_debug() {
        let creds = Credentials::new("alice@example.com", "secret123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice@example.com"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn defaults_to_users_collection() {
        let creds = Credentials::new("alice", "pw");
        assert_eq!(creds.collection_name(), "users");
    }

    #[test]
    fn auth_request_serializes_identity_and_password() {
        let creds = Credentials::new("alice", "pw").with_collection("_superusers");
        let body = serde_json::to_value(creds.auth_request()).unwrap();
        assert_eq!(body, serde_json::json!({"identity": "alice", "password": "pw"}));
    }
}
