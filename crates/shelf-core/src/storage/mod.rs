//! Storage layer
//!
//! The catalog is persisted as a single JSON document, rewritten in full
//! on every save. `persistence` handles the load/save cycle; `error`
//! classifies the I/O failures that can come out of it.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::CatalogPersistence;
