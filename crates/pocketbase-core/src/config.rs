//! Client configuration.

use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

use crate::credentials::Credentials;
use crate::naming::CollectionNamingPipeline;
use crate::types::ServerUrl;

/// Which payload checks to skip before a write.
///
/// Flags combine with `|`. [`RecordOperationBehavior::STRICT`] (the
/// default) runs every check.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RecordOperationBehavior(u8);

impl RecordOperationBehavior {
    pub const STRICT: Self = Self(0);
    pub const IGNORE_UNKNOWN_PROPERTIES: Self = Self(1);
    pub const IGNORE_PROPERTY_TYPE_MISMATCHES: Self = Self(2);
    pub const IGNORE_ALL: Self = Self(3);

    /// Returns true if every flag in `other` is set.
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn checks_unknown_properties(&self) -> bool {
        !self.contains(Self::IGNORE_UNKNOWN_PROPERTIES)
    }

    pub fn checks_property_types(&self) -> bool {
        !self.contains(Self::IGNORE_PROPERTY_TYPE_MISMATCHES)
    }

    /// Returns true if at least one check runs.
    pub fn validates(&self) -> bool {
        *self != Self::IGNORE_ALL
    }
}

impl BitOr for RecordOperationBehavior {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for RecordOperationBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::STRICT => "Strict",
            Self::IGNORE_UNKNOWN_PROPERTIES => "IgnoreUnknownProperties",
            Self::IGNORE_PROPERTY_TYPE_MISMATCHES => "IgnorePropertyTypeMismatches",
            _ => "IgnoreAll",
        };
        f.write_str(name)
    }
}

/// Everything needed to talk to one PocketBase server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: ServerUrl,
    pub credentials: Credentials,
    /// Authenticate automatically on first use. Defaults to true.
    pub silent_authentication: bool,
    pub behavior: RecordOperationBehavior,
    pub naming: Arc<CollectionNamingPipeline>,
}

impl ClientConfig {
    pub fn new(server_url: ServerUrl, credentials: Credentials) -> Self {
        Self {
            server_url,
            credentials,
            silent_authentication: true,
            behavior: RecordOperationBehavior::STRICT,
            naming: Arc::new(CollectionNamingPipeline::new()),
        }
    }

    pub fn with_silent_authentication(mut self, enabled: bool) -> Self {
        self.silent_authentication = enabled;
        self
    }

    pub fn with_behavior(mut self, behavior: RecordOperationBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_naming(mut self, naming: impl Into<Arc<CollectionNamingPipeline>>) -> Self {
        self.naming = naming.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_combine() {
        let both = RecordOperationBehavior::IGNORE_UNKNOWN_PROPERTIES
            | RecordOperationBehavior::IGNORE_PROPERTY_TYPE_MISMATCHES;
        assert_eq!(both, RecordOperationBehavior::IGNORE_ALL);
        assert!(!both.validates());
        assert_eq!(format!("{both:?}"), "IgnoreAll");
    }

    #[test]
    fn strict_checks_everything() {
        let strict = RecordOperationBehavior::default();
        assert_eq!(strict, RecordOperationBehavior::STRICT);
        assert!(strict.checks_unknown_properties());
        assert!(strict.checks_property_types());
        assert!(strict.validates());
    }

    #[test]
    fn single_flags() {
        let lenient = RecordOperationBehavior::IGNORE_UNKNOWN_PROPERTIES;
        assert!(!lenient.checks_unknown_properties());
        assert!(lenient.checks_property_types());
        assert!(lenient.validates());
    }

    #[test]
    fn config_defaults() {
        let config = ClientConfig::new(
            ServerUrl::new("http://127.0.0.1:8090").unwrap(),
            Credentials::new("admin@example.com", "secret"),
        );
        assert!(config.silent_authentication);
        assert_eq!(config.behavior, RecordOperationBehavior::STRICT);
        assert_eq!(config.naming.len(), 4);

        let config = config.with_silent_authentication(false);
        assert!(!config.silent_authentication);
    }
}
