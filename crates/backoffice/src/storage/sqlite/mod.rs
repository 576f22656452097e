//! SQLite storage backend implementation.
//!
//! Implements the repository traits using `rusqlite` for synchronous
//! operations and `tokio-rusqlite` for async wrapping.

mod competitors;
mod conversions;
mod customers;
mod error;
mod orders;
mod products;
mod repository;
mod schema;

pub use repository::SqliteRepository;
