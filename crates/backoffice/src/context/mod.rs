//! Request-scoped context module.
//!
//! Provides the `RequestContext` extractor: the request id plus the admin
//! principal behind the bearer token.

mod extractor;
mod types;

pub use types::RequestContext;
