//! SQLite schema definitions and SQL query constants.
//!
//! All statements used by the SQLite repository live here as pure data.
//! List queries are assembled from the `*_COLUMNS` / `*_FROM` pieces by
//! `backoffice_core::query::ListQuery`.

/// Enforces `ON DELETE` actions. Must run outside a transaction.
pub const ENABLE_FOREIGN_KEYS: &str = "PRAGMA foreign_keys = ON";

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Customers table
CREATE TABLE IF NOT EXISTS customers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone TEXT,
    segment TEXT NOT NULL DEFAULT 'new',
    notes TEXT,
    total_spent REAL NOT NULL DEFAULT 0,
    order_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Products table
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    price REAL NOT NULL,
    category TEXT,
    inventory_count INTEGER NOT NULL DEFAULT 0,
    sku TEXT UNIQUE,
    active INTEGER NOT NULL DEFAULT 1,
    image_url TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Orders table
CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_number TEXT NOT NULL UNIQUE,
    customer_id INTEGER,
    subtotal REAL NOT NULL,
    tax REAL NOT NULL,
    total REAL NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    payment_status TEXT NOT NULL DEFAULT 'unpaid',
    payment_method TEXT,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (customer_id) REFERENCES customers(id) ON DELETE SET NULL
);

-- Order line items table
CREATE TABLE IF NOT EXISTS order_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL,
    product_id INTEGER,
    product_name TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    unit_price REAL NOT NULL,
    total_price REAL NOT NULL,
    FOREIGN KEY (order_id) REFERENCES orders(id) ON DELETE CASCADE,
    FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE SET NULL
);

-- Competitors table
CREATE TABLE IF NOT EXISTS competitors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    website TEXT,
    distance REAL,
    type TEXT,
    threat_level TEXT NOT NULL DEFAULT 'medium'
        CHECK (threat_level IN ('low', 'medium', 'high')),
    rating REAL,
    rating_change REAL,
    review_count INTEGER,
    avg_price REAL,
    price_diff REAL,
    strengths TEXT,
    weaknesses TEXT,
    top_items TEXT,
    sentiment TEXT,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_orders_customer_id ON orders(customer_id);
CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(status);
CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders(created_at);
CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items(order_id);
CREATE INDEX IF NOT EXISTS idx_products_category ON products(category);
CREATE INDEX IF NOT EXISTS idx_customers_segment ON customers(segment);
CREATE INDEX IF NOT EXISTS idx_competitors_threat_level ON competitors(threat_level);
"#;

pub const PING: &str = "SELECT 1";

// ============================================================================
// Order queries
// ============================================================================

/// Column list read by `row_to_order`.
pub const ORDER_COLUMNS: &str = "o.id, o.order_number, o.customer_id, c.name, c.email, \
     o.subtotal, o.tax, o.total, o.status, o.payment_status, o.payment_method, o.notes, \
     o.created_at, o.updated_at";

pub const ORDER_FROM: &str = "orders o LEFT JOIN customers c ON c.id = o.customer_id";

pub const ORDER_ORDER_BY: &str = "o.created_at DESC, o.id DESC";

pub const ORDER_STATUS_COLUMN: &str = "o.status";
pub const ORDER_PAYMENT_STATUS_COLUMN: &str = "o.payment_status";
pub const ORDER_SEARCH_COLUMNS: &[&str] = &["o.order_number", "c.name", "c.email"];

pub const SELECT_ORDER_BY_ID: &str = r#"
SELECT o.id, o.order_number, o.customer_id, c.name, c.email,
       o.subtotal, o.tax, o.total, o.status, o.payment_status, o.payment_method, o.notes,
       o.created_at, o.updated_at
FROM orders o
LEFT JOIN customers c ON c.id = o.customer_id
WHERE o.id = ?1
"#;

pub const SELECT_RECENT_ORDERS_FOR_CUSTOMER: &str = r#"
SELECT o.id, o.order_number, o.customer_id, c.name, c.email,
       o.subtotal, o.tax, o.total, o.status, o.payment_status, o.payment_method, o.notes,
       o.created_at, o.updated_at
FROM orders o
LEFT JOIN customers c ON c.id = o.customer_id
WHERE o.customer_id = ?1
ORDER BY o.created_at DESC, o.id DESC
LIMIT ?2
"#;

pub const SELECT_ORDER_ITEMS: &str = r#"
SELECT id, order_id, product_id, product_name, quantity, unit_price, total_price
FROM order_items
WHERE order_id = ?1
ORDER BY id ASC
"#;

pub const INSERT_ORDER: &str = r#"
INSERT INTO orders (order_number, customer_id, subtotal, tax, total, status, payment_status,
                    payment_method, notes, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, 'pending', 'unpaid', ?6, ?7, ?8, ?8)
"#;

pub const INSERT_ORDER_ITEM: &str = r#"
INSERT INTO order_items (order_id, product_id, product_name, quantity, unit_price, total_price)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const CUSTOMER_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?1)";

/// Counter bump applied once per order; relative so concurrent orders add up.
pub const INCREMENT_CUSTOMER_TOTALS: &str = r#"
UPDATE customers
SET order_count = order_count + 1,
    total_spent = ROUND(total_spent + ?2, 2),
    updated_at = ?3
WHERE id = ?1
"#;

pub const UPDATE_ORDER: &str = r#"
UPDATE orders
SET status = COALESCE(?2, status),
    payment_status = COALESCE(?3, payment_status),
    payment_method = COALESCE(?4, payment_method),
    notes = COALESCE(?5, notes),
    updated_at = ?6
WHERE id = ?1
"#;

pub const DELETE_ORDER: &str = r#"
DELETE FROM orders
WHERE id = ?1
"#;

pub const ORDER_STATS: &str = r#"
SELECT COUNT(*),
       COALESCE(SUM(CASE WHEN status = 'pending' THEN 1 ELSE 0 END), 0),
       COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0),
       COALESCE(SUM(CASE WHEN payment_status = 'paid' THEN total ELSE 0 END), 0.0),
       COALESCE(AVG(total), 0.0)
FROM orders
"#;

// ============================================================================
// Product queries
// ============================================================================

/// Column list read by `row_to_product`.
pub const PRODUCT_COLUMNS: &str = "id, name, description, price, category, inventory_count, \
     sku, active, image_url, created_at, updated_at";

pub const PRODUCT_FROM: &str = "products";

pub const PRODUCT_ORDER_BY: &str = "name ASC, id ASC";

pub const PRODUCT_CATEGORY_COLUMN: &str = "category";
pub const PRODUCT_ACTIVE_COLUMN: &str = "active";
pub const PRODUCT_SEARCH_COLUMNS: &[&str] = &["name", "description", "sku"];

pub const SELECT_PRODUCT_BY_ID: &str = r#"
SELECT id, name, description, price, category, inventory_count, sku, active, image_url,
       created_at, updated_at
FROM products
WHERE id = ?1
"#;

pub const INSERT_PRODUCT: &str = r#"
INSERT INTO products (name, description, price, category, inventory_count, sku, active,
                      image_url, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
"#;

pub const UPDATE_PRODUCT: &str = r#"
UPDATE products
SET name = COALESCE(?2, name),
    description = COALESCE(?3, description),
    price = COALESCE(?4, price),
    category = COALESCE(?5, category),
    inventory_count = COALESCE(?6, inventory_count),
    sku = COALESCE(?7, sku),
    active = COALESCE(?8, active),
    image_url = COALESCE(?9, image_url),
    updated_at = ?10
WHERE id = ?1
"#;

pub const DELETE_PRODUCT: &str = r#"
DELETE FROM products
WHERE id = ?1
"#;

pub const SELECT_CATEGORIES: &str = r#"
SELECT DISTINCT category
FROM products
WHERE category IS NOT NULL
ORDER BY category ASC
"#;

pub const PRODUCT_STATS: &str = r#"
SELECT COUNT(*),
       COALESCE(SUM(CASE WHEN active = 1 THEN 1 ELSE 0 END), 0),
       COALESCE(SUM(inventory_count), 0),
       COALESCE(AVG(price), 0.0),
       COALESCE(SUM(CASE WHEN active = 1 AND inventory_count < ?1 THEN 1 ELSE 0 END), 0)
FROM products
"#;

// ============================================================================
// Customer queries
// ============================================================================

/// Column list read by `row_to_customer`.
pub const CUSTOMER_COLUMNS: &str = "id, name, email, phone, segment, notes, total_spent, \
     order_count, created_at, updated_at";

pub const CUSTOMER_FROM: &str = "customers";

pub const CUSTOMER_ORDER_BY: &str = "created_at DESC, id DESC";

pub const CUSTOMER_SEGMENT_COLUMN: &str = "segment";
pub const CUSTOMER_SEARCH_COLUMNS: &[&str] = &["name", "email", "phone"];

pub const SELECT_CUSTOMER_BY_ID: &str = r#"
SELECT id, name, email, phone, segment, notes, total_spent, order_count, created_at, updated_at
FROM customers
WHERE id = ?1
"#;

pub const INSERT_CUSTOMER: &str = r#"
INSERT INTO customers (name, email, phone, segment, notes, total_spent, order_count,
                       created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, 0, 0, ?6, ?6)
"#;

pub const UPDATE_CUSTOMER: &str = r#"
UPDATE customers
SET name = COALESCE(?2, name),
    email = COALESCE(?3, email),
    phone = COALESCE(?4, phone),
    segment = COALESCE(?5, segment),
    notes = COALESCE(?6, notes),
    updated_at = ?7
WHERE id = ?1
"#;

pub const DELETE_CUSTOMER: &str = r#"
DELETE FROM customers
WHERE id = ?1
"#;

pub const CUSTOMER_STATS: &str = r#"
SELECT COUNT(*),
       COALESCE(SUM(total_spent), 0.0),
       COALESCE(AVG(total_spent), 0.0),
       COALESCE(SUM(CASE WHEN order_count > 1 THEN 1 ELSE 0 END), 0),
       COALESCE(SUM(CASE WHEN created_at >= ?1 THEN 1 ELSE 0 END), 0)
FROM customers
"#;

// ============================================================================
// Competitor queries
// ============================================================================

/// Column list read by `row_to_competitor`.
pub const COMPETITOR_COLUMNS: &str = "id, name, website, distance, type, threat_level, rating, \
     rating_change, review_count, avg_price, price_diff, strengths, weaknesses, top_items, \
     sentiment, notes, created_at, updated_at";

pub const COMPETITOR_FROM: &str = "competitors";

pub const COMPETITOR_ORDER_BY: &str =
    "CASE threat_level WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END, name ASC, id ASC";

pub const COMPETITOR_THREAT_LEVEL_COLUMN: &str = "threat_level";

pub const SELECT_COMPETITOR_BY_ID: &str = r#"
SELECT id, name, website, distance, type, threat_level, rating, rating_change, review_count,
       avg_price, price_diff, strengths, weaknesses, top_items, sentiment, notes,
       created_at, updated_at
FROM competitors
WHERE id = ?1
"#;

pub const INSERT_COMPETITOR: &str = r#"
INSERT INTO competitors (name, website, distance, type, threat_level, rating, rating_change,
                         review_count, avg_price, price_diff, strengths, weaknesses,
                         top_items, sentiment, notes, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?16)
"#;

pub const UPDATE_COMPETITOR: &str = r#"
UPDATE competitors
SET name = COALESCE(?2, name),
    website = COALESCE(?3, website),
    distance = COALESCE(?4, distance),
    type = COALESCE(?5, type),
    threat_level = COALESCE(?6, threat_level),
    rating = COALESCE(?7, rating),
    rating_change = COALESCE(?8, rating_change),
    review_count = COALESCE(?9, review_count),
    avg_price = COALESCE(?10, avg_price),
    price_diff = COALESCE(?11, price_diff),
    strengths = COALESCE(?12, strengths),
    weaknesses = COALESCE(?13, weaknesses),
    top_items = COALESCE(?14, top_items),
    sentiment = COALESCE(?15, sentiment),
    notes = COALESCE(?16, notes),
    updated_at = ?17
WHERE id = ?1
"#;

pub const DELETE_COMPETITOR: &str = r#"
DELETE FROM competitors
WHERE id = ?1
"#;

pub const COMPETITOR_SUMMARY: &str = r#"
SELECT COUNT(*),
       COALESCE(SUM(CASE WHEN threat_level = 'high' THEN 1 ELSE 0 END), 0),
       COALESCE(SUM(CASE WHEN threat_level = 'medium' THEN 1 ELSE 0 END), 0),
       COALESCE(SUM(CASE WHEN threat_level = 'low' THEN 1 ELSE 0 END), 0),
       COALESCE(AVG(rating), 0.0),
       COALESCE(AVG(price_diff), 0.0)
FROM competitors
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS customers"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS products"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS orders"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS order_items"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS competitors"));
        assert!(CREATE_TABLES.contains("ON DELETE CASCADE"));
    }

    #[test]
    fn test_partial_updates_coalesce() {
        for sql in [
            UPDATE_ORDER,
            UPDATE_PRODUCT,
            UPDATE_CUSTOMER,
            UPDATE_COMPETITOR,
        ] {
            assert!(sql.contains("COALESCE("));
            assert!(sql.contains("WHERE id = ?1"));
        }
    }

    #[test]
    fn test_counter_update_is_relative() {
        assert!(INCREMENT_CUSTOMER_TOTALS.contains("order_count = order_count + 1"));
        assert!(INCREMENT_CUSTOMER_TOTALS.contains("total_spent + ?2"));
    }

    #[test]
    fn test_column_lists_match_single_row_selects() {
        assert!(SELECT_PRODUCT_BY_ID.contains("image_url"));
        assert!(PRODUCT_COLUMNS.starts_with("id, name"));
        assert!(ORDER_COLUMNS.contains("c.name"));
        assert!(COMPETITOR_COLUMNS.contains("top_items"));
    }
}
