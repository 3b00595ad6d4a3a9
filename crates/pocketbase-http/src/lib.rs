//! pocketbase-http - Authenticated HTTP client for PocketBase.
//!
//! [`PocketBaseClient`] holds the authentication state and implements
//! [`RecordStore`](pocketbase_core::RecordStore) over `reqwest`.
//! [`PocketBase`] wires a [`ClientConfig`](pocketbase_core::ClientConfig)
//! into typed repositories that share one client.

mod client;
mod endpoints;
mod pocketbase;
mod store;
mod wire;

pub use pocketbase::PocketBase;
pub use store::PocketBaseClient;
