//! Core types and trait definitions for the essay corpus.
//!
//! This crate is free of database and file-format dependencies. The SQLite
//! backend, the document reader and the pipelines all depend on it.

pub mod error;
pub mod essay;
pub mod store;
pub mod value;

pub use error::{Error, Result};
