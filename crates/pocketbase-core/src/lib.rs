//! pocketbase-core - Core types, query builders and repository abstractions
//! for PocketBase clients.
//!
//! This crate performs no network I/O. A transport implements
//! [`RecordStore`] and [`Repository`] layers typed CRUD, validation and
//! collection naming on top of it.

pub mod config;
pub mod credentials;
pub mod datetime;
pub mod error;
pub mod filter;
pub mod naming;
pub mod query;
pub mod record;
pub mod repository;
pub mod sort;
pub mod tokens;
pub mod traits;
pub mod types;

pub use config::{ClientConfig, RecordOperationBehavior};
pub use credentials::Credentials;
pub use error::{Error, InvalidInputError, MismatchedType, Recover, TransportError};
pub use filter::{Filter, FilterValue, TerminalNode};
pub use naming::{CollectionNamingPipeline, CollectionNamingRule, RecordType};
pub use query::Query;
pub use record::{FieldKind, FieldSpec, Record, RecordMeta, RecordValidator};
pub use repository::{QueryBuilder, Repository};
pub use sort::Sort;
pub use tokens::AuthToken;
pub use traits::RecordStore;
pub use types::{AuthResponse, AuthenticatedUser, Paged, PaginationOptions, ServerUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
