//! `ProductRepository` for SQLite.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use backoffice_core::query::{FilterSet, ListQuery, Pagination};
use backoffice_core::shop::{
    round_cents, NewProduct, Product, ProductFilter, ProductStats, UpdateProductRequest,
    LOW_STOCK_THRESHOLD,
};
use backoffice_core::storage::{Paginated, ProductRepository, Result};

use super::conversions::{format_datetime, row_to_product};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::repository::{wrap_err, SqliteRepository};
use super::schema;

#[async_trait]
impl ProductRepository for SqliteRepository {
    async fn list_products(
        &self,
        filter: &ProductFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Product>> {
        let mut filters = FilterSet::new();
        filters
            .equals(schema::PRODUCT_CATEGORY_COLUMN, filter.category.as_deref())
            .flag(schema::PRODUCT_ACTIVE_COLUMN, filter.active)
            .contains(schema::PRODUCT_SEARCH_COLUMNS, filter.search.as_deref());

        let query = ListQuery::new(schema::PRODUCT_COLUMNS, schema::PRODUCT_FROM)
            .filters(filters)
            .order_by(schema::PRODUCT_ORDER_BY)
            .paginate(pagination);

        self.fetch_page(query, row_to_product, "Product").await
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_PRODUCT_BY_ID, [id], row_to_product)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Product", id.to_string()))
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let product = product.clone();
        let sku = product.sku.clone().unwrap_or_default();
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_PRODUCT,
                    params![
                        product.name,
                        product.description,
                        product.price,
                        product.category,
                        product.inventory_count,
                        product.sku,
                        product.active,
                        product.image_url,
                        now,
                    ],
                )
                .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                conn.query_row(schema::SELECT_PRODUCT_BY_ID, [id], row_to_product)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Product", sku))
    }

    async fn update_product(&self, id: i64, update: &UpdateProductRequest) -> Result<Product> {
        let update = update.clone();
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_PRODUCT,
                        params![
                            id,
                            update.name,
                            update.description,
                            update.price,
                            update.category,
                            update.inventory_count,
                            update.sku,
                            update.active,
                            update.image_url,
                            now,
                        ],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                conn.query_row(schema::SELECT_PRODUCT_BY_ID, [id], row_to_product)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Product", id.to_string()))
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_PRODUCT, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Product", id.to_string()))
    }

    async fn list_categories(&self) -> Result<Vec<String>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_CATEGORIES)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([], |row| row.get(0))
                    .map_err(wrap_err)?;
                rows.collect::<rusqlite::Result<Vec<String>>>()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Product"))
    }

    async fn product_stats(&self) -> Result<ProductStats> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PRODUCT_STATS, [LOW_STOCK_THRESHOLD], |row| {
                    Ok(ProductStats {
                        total_products: row.get(0)?,
                        active_products: row.get(1)?,
                        total_inventory: row.get(2)?,
                        average_price: round_cents(row.get(3)?),
                        low_stock: row.get(4)?,
                    })
                })
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Product"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::shop::CreateProductRequest;
    use backoffice_core::storage::RepositoryError;

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    async fn seed(repo: &SqliteRepository) {
        let products = [
            CreateProductRequest::new("Espresso", 3.0)
                .with_category("coffee")
                .with_sku("COF-ESP")
                .with_inventory(40),
            CreateProductRequest::new("Latte", 4.5)
                .with_category("coffee")
                .with_description("Espresso with steamed milk")
                .with_inventory(5),
            CreateProductRequest::new("Croissant", 3.5)
                .with_category("pastry")
                .with_inventory(2)
                .inactive(),
            CreateProductRequest::new("Gift card", 25.0),
        ];
        for product in products {
            repo.create_product(&product.into_new_product().unwrap())
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_create_product_defaults() {
        let repo = repo().await;

        let product = repo
            .create_product(
                &CreateProductRequest::new("Mocha", 5.0)
                    .into_new_product()
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(product.id > 0);
        assert!(product.active);
        assert_eq!(product.inventory_count, 0);
        assert_eq!(product.category, None);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[tokio::test]
    async fn test_duplicate_sku_is_already_exists() {
        let repo = repo().await;
        let new = CreateProductRequest::new("Espresso", 3.0)
            .with_sku("COF-ESP")
            .into_new_product()
            .unwrap();
        repo.create_product(&new).await.unwrap();

        let result = repo.create_product(&new).await;

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "Product",
                key: "COF-ESP".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_list_products_sorted_by_name() {
        let repo = repo().await;
        seed(&repo).await;

        let page = repo
            .list_products(&ProductFilter::default(), Pagination::default())
            .await
            .unwrap();

        let names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Croissant", "Espresso", "Gift card", "Latte"]);
        assert_eq!(page.total, 4);
    }

    #[tokio::test]
    async fn test_list_products_filters_compose() {
        let repo = repo().await;
        seed(&repo).await;

        let filter = ProductFilter {
            category: Some("coffee".to_string()),
            active: Some(true),
            search: Some("espresso".to_string()),
        };
        let page = repo
            .list_products(&filter, Pagination::default())
            .await
            .unwrap();

        // "Latte" matches through its description.
        assert_eq!(page.total, 2);

        let inactive = ProductFilter {
            active: Some(false),
            ..Default::default()
        };
        let page = repo
            .list_products(&inactive, Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Croissant");
    }

    #[tokio::test]
    async fn test_search_folds_ascii_case_only() {
        let repo = repo().await;
        repo.create_product(
            &CreateProductRequest::new("Éclair", 4.0)
                .into_new_product()
                .unwrap(),
        )
        .await
        .unwrap();

        let search = |term: &str| ProductFilter {
            search: Some(term.to_string()),
            ..Default::default()
        };

        let page = repo
            .list_products(&search("ÉCLAIR"), Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);

        // SQLite's LOWER leaves non-ASCII letters alone.
        let page = repo
            .list_products(&search("éclair"), Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_update_product_partial() {
        let repo = repo().await;
        let product = repo
            .create_product(
                &CreateProductRequest::new("Scone", 2.75)
                    .with_category("pastry")
                    .into_new_product()
                    .unwrap(),
            )
            .await
            .unwrap();

        let updated = repo
            .update_product(
                product.id,
                &UpdateProductRequest {
                    price: Some(3.25),
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 3.25);
        assert!(!updated.active);
        assert_eq!(updated.name, "Scone");
        assert_eq!(updated.category.as_deref(), Some("pastry"));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_product() {
        let repo = repo().await;

        assert_eq!(
            repo.update_product(5, &UpdateProductRequest::default())
                .await,
            Err(RepositoryError::not_found("Product", 5))
        );
        assert_eq!(
            repo.delete_product(5).await,
            Err(RepositoryError::not_found("Product", 5))
        );
        assert_eq!(repo.get_product(5).await, Ok(None));
    }

    #[tokio::test]
    async fn test_list_categories() {
        let repo = repo().await;
        seed(&repo).await;

        let categories = repo.list_categories().await.unwrap();

        assert_eq!(categories, vec!["coffee", "pastry"]);
    }

    #[tokio::test]
    async fn test_product_stats() {
        let repo = repo().await;
        seed(&repo).await;

        let stats = repo.product_stats().await.unwrap();

        assert_eq!(stats.total_products, 4);
        assert_eq!(stats.active_products, 3);
        assert_eq!(stats.total_inventory, 47);
        assert_eq!(stats.average_price, 9.0);
        // Latte (5) and Gift card (0); the croissant is inactive.
        assert_eq!(stats.low_stock, 2);
    }
}
