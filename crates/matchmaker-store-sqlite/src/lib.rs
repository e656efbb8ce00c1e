//! SQLite backend for the matchmaking store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Every operation is a plain
//! synchronous function over a `rusqlite::Connection` (see `ops`), executed
//! on that thread; the ones that read, check and write hold an `IMMEDIATE`
//! transaction for the whole sequence.

mod encode;
mod ops;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
