//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use std::str::FromStr;

use backoffice_core::query::SqlValue;
use backoffice_core::shop::{
    Competitor, Customer, Order, OrderItem, OrderStatus, PaymentStatus, Product, ThreatLevel,
};
use backoffice_core::storage::RepositoryError;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::Row;

// ============================================================================
// Order conversions
// ============================================================================

/// Convert a SQLite row to an Order.
///
/// Expected columns: see `schema::ORDER_COLUMNS`.
pub fn row_to_order(row: &Row) -> rusqlite::Result<Order> {
    let status: String = row.get(8)?;
    let payment_status: String = row.get(9)?;
    let created_at: String = row.get(12)?;
    let updated_at: String = row.get(13)?;

    Ok(Order {
        id: row.get(0)?,
        order_number: row.get(1)?,
        customer_id: row.get(2)?,
        customer_name: row.get(3)?,
        customer_email: row.get(4)?,
        subtotal: row.get(5)?,
        tax: row.get(6)?,
        total: row.get(7)?,
        status: parse_enum::<OrderStatus>(8, &status)?,
        payment_status: parse_enum::<PaymentStatus>(9, &payment_status)?,
        payment_method: row.get(10)?,
        notes: row.get(11)?,
        created_at: parse_datetime(12, &created_at)?,
        updated_at: parse_datetime(13, &updated_at)?,
    })
}

/// Expected columns: id, order_id, product_id, product_name, quantity,
/// unit_price, total_price
pub fn row_to_order_item(row: &Row) -> rusqlite::Result<OrderItem> {
    Ok(OrderItem {
        id: row.get(0)?,
        order_id: row.get(1)?,
        product_id: row.get(2)?,
        product_name: row.get(3)?,
        quantity: row.get(4)?,
        unit_price: row.get(5)?,
        total_price: row.get(6)?,
    })
}

// ============================================================================
// Product conversions
// ============================================================================

/// Expected columns: see `schema::PRODUCT_COLUMNS`.
pub fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
    let created_at: String = row.get(9)?;
    let updated_at: String = row.get(10)?;

    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        inventory_count: row.get(5)?,
        sku: row.get(6)?,
        active: row.get(7)?,
        image_url: row.get(8)?,
        created_at: parse_datetime(9, &created_at)?,
        updated_at: parse_datetime(10, &updated_at)?,
    })
}

// ============================================================================
// Customer conversions
// ============================================================================

/// Expected columns: see `schema::CUSTOMER_COLUMNS`.
pub fn row_to_customer(row: &Row) -> rusqlite::Result<Customer> {
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;

    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        segment: row.get(4)?,
        notes: row.get(5)?,
        total_spent: row.get(6)?,
        order_count: row.get(7)?,
        created_at: parse_datetime(8, &created_at)?,
        updated_at: parse_datetime(9, &updated_at)?,
    })
}

// ============================================================================
// Competitor conversions
// ============================================================================

/// Expected columns: see `schema::COMPETITOR_COLUMNS`.
pub fn row_to_competitor(row: &Row) -> rusqlite::Result<Competitor> {
    let threat_level: String = row.get(5)?;
    let top_items: Option<String> = row.get(13)?;
    let sentiment: Option<String> = row.get(14)?;
    let created_at: String = row.get(16)?;
    let updated_at: String = row.get(17)?;

    Ok(Competitor {
        id: row.get(0)?,
        name: row.get(1)?,
        website: row.get(2)?,
        distance: row.get(3)?,
        kind: row.get(4)?,
        threat_level: parse_enum::<ThreatLevel>(5, &threat_level)?,
        rating: row.get(6)?,
        rating_change: row.get(7)?,
        review_count: row.get(8)?,
        avg_price: row.get(9)?,
        price_diff: row.get(10)?,
        strengths: row.get(11)?,
        weaknesses: row.get(12)?,
        top_items: parse_json_column(13, top_items.as_deref())?,
        sentiment: parse_json_column(14, sentiment.as_deref())?,
        notes: row.get(15)?,
        created_at: parse_datetime(16, &created_at)?,
        updated_at: parse_datetime(17, &updated_at)?,
    })
}

/// Serialize a structured column (top items, sentiment) to JSON text.
/// JSON `null` is stored as SQL NULL.
pub fn json_column_to_string(
    value: Option<&serde_json::Value>,
) -> Result<Option<String>, RepositoryError> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => serde_json::to_string(v)
            .map(Some)
            .map_err(|e| RepositoryError::Serialization(e.to_string())),
    }
}

fn parse_json_column(idx: usize, text: Option<&str>) -> rusqlite::Result<Option<serde_json::Value>> {
    text.map(|t| {
        serde_json::from_str(t)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

// ============================================================================
// Parameter conversions
// ============================================================================

/// Convert a query-builder value into a rusqlite bind value.
pub fn to_sql_value(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => Value::Integer(*i),
        SqlValue::Real(f) => Value::Real(*f),
        SqlValue::Text(s) => Value::Text(s.clone()),
        SqlValue::Bool(b) => Value::Integer(i64::from(*b)),
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn parse_enum<T>(idx: usize, s: &str) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    s.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Format a DateTime<Utc> for SQLite storage.
///
/// Fixed microsecond precision keeps lexical order equal to time order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}
