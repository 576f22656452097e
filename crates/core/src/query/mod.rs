//! Typed builder for filtered, paginated list queries.
//!
//! A [`FilterSet`] collects predicate/value pairs, a [`ListQuery`] wraps it
//! with a SELECT list, FROM clause and ORDER BY, and renders two statements:
//! the page of rows and the matching `COUNT(*)`. Placeholders use the
//! numbered `?N` form and are derived from the position of the bound value,
//! so fragments and parameters always line up.

mod filter;
mod list;
mod pagination;
mod value;

pub use filter::{escape_like, FilterSet};
pub use list::{ListQuery, Statement};
pub use pagination::{Pagination, DEFAULT_COMPETITOR_LIMIT, DEFAULT_LIMIT};
pub use value::SqlValue;
