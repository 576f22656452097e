//! SQLite repository implementation.
//!
//! Implements the repository traits from `backoffice_core::storage` using SQLite.
//! Each resource lives in its own module; this one owns the connection and
//! the helpers they share.

use async_trait::async_trait;
use rusqlite::{params_from_iter, Row};
use tokio_rusqlite::Connection;

use backoffice_core::query::{ListQuery, Statement};
use backoffice_core::storage::{HealthCheck, Paginated, RepositoryError, Result};

use super::conversions::to_sql_value;
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
pub(super) fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types. Every
/// operation runs on the connection's background thread, so a single
/// `call` closure observes a consistent database.
pub struct SqliteRepository {
    pub(super) conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::ENABLE_FOREIGN_KEYS)
                .map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Runs the page and count statements of `query` on one connection
    /// turn.
    pub(super) async fn fetch_page<T>(
        &self,
        query: ListQuery,
        map_row: fn(&Row) -> rusqlite::Result<T>,
        entity_type: &'static str,
    ) -> Result<Paginated<T>>
    where
        T: Send + 'static,
    {
        let pagination = query.pagination();
        let page = query.page_statement();
        let count = query.count_statement();

        let (items, total) = self
            .conn
            .call(move |conn| {
                let items = query_all(conn, &page, map_row).map_err(wrap_err)?;
                let total: i64 = conn
                    .query_row(
                        &count.sql,
                        params_from_iter(count.params.iter().map(to_sql_value)),
                        |row| row.get(0),
                    )
                    .map_err(wrap_err)?;
                Ok((items, total))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type))?;

        Ok(Paginated::new(items, total, pagination))
    }
}

/// Runs a rendered statement and maps every row.
pub(super) fn query_all<T>(
    conn: &rusqlite::Connection,
    statement: &Statement,
    map_row: fn(&Row) -> rusqlite::Result<T>,
) -> rusqlite::Result<Vec<T>> {
    let mut stmt = conn.prepare(&statement.sql)?;
    let rows = stmt.query_map(
        params_from_iter(statement.params.iter().map(to_sql_value)),
        map_row,
    )?;
    rows.collect()
}

#[async_trait]
impl HealthCheck for SqliteRepository {
    async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::query::{FilterSet, Pagination};

    use crate::storage::sqlite::conversions::row_to_product;

    #[tokio::test]
    async fn test_new_in_memory_creates_schema() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let tables: Vec<String> = repo
            .conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([], |row| row.get(0))
                    .map_err(wrap_err)?;
                rows.collect::<rusqlite::Result<Vec<String>>>()
                    .map_err(wrap_err)
            })
            .await
            .unwrap();

        for table in ["competitors", "customers", "order_items", "orders", "products"] {
            assert!(tables.iter().any(|t| t == table), "missing table {table}");
        }
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let enabled: i64 = repo
            .conn
            .call(|conn| {
                conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .unwrap();

        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn test_ping() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        assert!(repo.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_page_on_empty_table() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let query = ListQuery::new(schema::PRODUCT_COLUMNS, schema::PRODUCT_FROM)
            .filters(FilterSet::new())
            .paginate(Pagination::new(5, 10));

        let page = repo
            .fetch_page(query, row_to_product, "Product")
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.limit, 5);
        assert_eq!(page.offset, 10);
    }
}
