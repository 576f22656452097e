//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `backoffice_core::storage`. SQLite is the only backend; handlers only see
//! the traits, so another backend slots in behind `AppState`.

pub mod sqlite;

pub use sqlite::SqliteRepository;
