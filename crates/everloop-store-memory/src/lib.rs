//! In-memory backend for the Everloop story store.
//!
//! Every record type lives in its own keyed [`table::Table`] behind a
//! [`tokio::sync::RwLock`]. Nothing is persisted; the data lives as long as
//! the [`MemoryStore`] does.

mod store;
mod table;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;
