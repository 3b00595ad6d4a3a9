//! Core traits for record storage backends.

mod store;

pub use store::RecordStore;
