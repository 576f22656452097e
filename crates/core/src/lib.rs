//! Core library for the backoffice admin API.
//!
//! Pure types and functions: domain records, request payloads and their
//! validation, pricing, the filtered-list query builder and the repository
//! contracts implemented by the storage backends.

pub mod auth;
pub mod query;
pub mod serde;
pub mod shop;
pub mod storage;
