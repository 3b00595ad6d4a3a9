//! Core PocketBase value types.
//!
//! Invalid URLs and pagination values are rejected at construction time.

mod paged;
mod pagination;
mod server_url;
mod user;

pub use paged::Paged;
pub use pagination::PaginationOptions;
pub use server_url::ServerUrl;
pub use user::{AuthenticatedUser, AuthResponse};
