//! SQLite backend for the essay corpus.
//!
//! A thin, synchronous wrapper over [`rusqlite`]: one connection per
//! [`SqliteStore`], one statement and one implicit commit per operation.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
