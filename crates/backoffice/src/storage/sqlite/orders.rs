//! `OrderRepository` for SQLite.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Transaction};

use backoffice_core::query::{FilterSet, ListQuery, Pagination};
use backoffice_core::shop::{
    generate_order_number, round_cents, NewOrder, Order, OrderDetail, OrderFilter, OrderStats,
    UpdateOrderRequest,
};
use backoffice_core::storage::{OrderRepository, Paginated, RepositoryError, Result};

use super::conversions::{format_datetime, row_to_order, row_to_order_item};
use super::error::{
    abort, is_unique_violation, map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id,
};
use super::repository::{wrap_err, SqliteRepository};
use super::schema;

/// Attempts at drawing an unused order number before giving up.
const ORDER_NUMBER_ATTEMPTS: usize = 3;

fn load_order_detail(
    conn: &rusqlite::Connection,
    id: i64,
) -> rusqlite::Result<Option<OrderDetail>> {
    let Some(order) = conn
        .query_row(schema::SELECT_ORDER_BY_ID, [id], row_to_order)
        .optional()?
    else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(schema::SELECT_ORDER_ITEMS)?;
    let items = stmt
        .query_map([id], row_to_order_item)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Some(OrderDetail { order, items }))
}

/// Inserts the order header, retrying on an order-number collision.
fn insert_order_header(
    tx: &Transaction<'_>,
    order: &NewOrder,
    now: &str,
) -> rusqlite::Result<i64> {
    let mut attempt = 1;
    loop {
        let order_number = generate_order_number();
        let inserted = tx.execute(
            schema::INSERT_ORDER,
            params![
                order_number,
                order.customer_id,
                order.totals.subtotal,
                order.totals.tax,
                order.totals.total,
                order.payment_method,
                order.notes,
                now,
            ],
        );

        match inserted {
            Ok(_) => return Ok(tx.last_insert_rowid()),
            Err(e) if is_unique_violation(&e) && attempt < ORDER_NUMBER_ATTEMPTS => {
                tracing::warn!(
                    order_number = %order_number,
                    attempt,
                    "Order number collision, retrying"
                );
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Writes the header, every line item and the customer counter bump.
fn insert_order(tx: &Transaction<'_>, order: &NewOrder, now: &str) -> tokio_rusqlite::Result<i64> {
    if let Some(customer_id) = order.customer_id {
        let exists: bool = tx
            .query_row(schema::CUSTOMER_EXISTS, [customer_id], |row| row.get(0))
            .map_err(wrap_err)?;
        if !exists {
            return Err(abort(RepositoryError::InvalidData(format!(
                "Customer {customer_id} does not exist"
            ))));
        }
    }

    let order_id = insert_order_header(tx, order, now).map_err(wrap_err)?;

    {
        let mut stmt = tx.prepare(schema::INSERT_ORDER_ITEM).map_err(wrap_err)?;
        for item in &order.items {
            stmt.execute(params![
                order_id,
                item.product_id,
                item.product_name,
                item.quantity,
                item.unit_price,
                item.total_price,
            ])
            .map_err(wrap_err)?;
        }
    }

    if let Some(customer_id) = order.customer_id {
        tx.execute(
            schema::INCREMENT_CUSTOMER_TOTALS,
            params![customer_id, order.totals.total, now],
        )
        .map_err(wrap_err)?;
    }

    Ok(order_id)
}

#[async_trait]
impl OrderRepository for SqliteRepository {
    async fn list_orders(
        &self,
        filter: &OrderFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Order>> {
        let mut filters = FilterSet::new();
        filters
            .equals(schema::ORDER_STATUS_COLUMN, filter.status.as_deref())
            .equals(
                schema::ORDER_PAYMENT_STATUS_COLUMN,
                filter.payment_status.as_deref(),
            )
            .contains(schema::ORDER_SEARCH_COLUMNS, filter.search.as_deref());

        let query = ListQuery::new(schema::ORDER_COLUMNS, schema::ORDER_FROM)
            .filters(filters)
            .order_by(schema::ORDER_ORDER_BY)
            .paginate(pagination);

        self.fetch_page(query, row_to_order, "Order").await
    }

    async fn get_order(&self, id: i64) -> Result<Option<OrderDetail>> {
        self.conn
            .call(move |conn| load_order_detail(conn, id).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Order", id.to_string()))
    }

    async fn create_order(&self, order: &NewOrder) -> Result<OrderDetail> {
        let order = order.clone();
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                let order_id = match insert_order(&tx, &order, &now) {
                    Ok(id) => id,
                    Err(e) => {
                        if let Err(rollback_err) = tx.rollback() {
                            tracing::error!(error = %rollback_err, "Failed to roll back order");
                        }
                        return Err(e);
                    }
                };
                tx.commit().map_err(wrap_err)?;

                load_order_detail(conn, order_id)
                    .map_err(wrap_err)?
                    .ok_or_else(|| wrap_err(rusqlite::Error::QueryReturnedNoRows))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Order"))
    }

    async fn update_order(&self, id: i64, update: &UpdateOrderRequest) -> Result<Order> {
        let status = update.status.map(|s| s.as_str());
        let payment_status = update.payment_status.map(|s| s.as_str());
        let payment_method = update.payment_method.clone();
        let notes = update.notes.clone();
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_ORDER,
                        params![id, status, payment_status, payment_method, notes, now],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                conn.query_row(schema::SELECT_ORDER_BY_ID, [id], row_to_order)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Order", id.to_string()))
    }

    async fn delete_order(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_ORDER, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Order", id.to_string()))
    }

    async fn recent_orders_for_customer(
        &self,
        customer_id: i64,
        limit: i64,
    ) -> Result<Vec<Order>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_RECENT_ORDERS_FOR_CUSTOMER)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map(params![customer_id, limit], row_to_order)
                    .map_err(wrap_err)?;
                rows.collect::<rusqlite::Result<Vec<_>>>().map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Order"))
    }

    async fn order_stats(&self) -> Result<OrderStats> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::ORDER_STATS, [], |row| {
                    Ok(OrderStats {
                        total_orders: row.get(0)?,
                        pending_orders: row.get(1)?,
                        completed_orders: row.get(2)?,
                        total_revenue: round_cents(row.get(3)?),
                        average_order_value: round_cents(row.get(4)?),
                    })
                })
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Order"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::shop::{
        CreateCustomerRequest, CreateOrderRequest, CreateProductRequest, OrderItemInput,
        OrderStatus, PaymentStatus,
    };
    use backoffice_core::storage::{CustomerRepository, ProductRepository};

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    async fn customer(repo: &SqliteRepository, email: &str) -> i64 {
        let new = CreateCustomerRequest::new("Ada Lovelace", email)
            .into_new_customer()
            .unwrap();
        repo.create_customer(&new).await.unwrap().id
    }

    fn two_item_order(customer_id: Option<i64>) -> NewOrder {
        let mut request = CreateOrderRequest::new(vec![
            OrderItemInput::new("Latte", 2, 5.0),
            OrderItemInput::new("Bagel", 3, 5.0),
        ]);
        if let Some(id) = customer_id {
            request = request.with_customer(id);
        }
        request.into_new_order().unwrap()
    }

    #[tokio::test]
    async fn test_create_order_computes_totals_and_items() {
        let repo = repo().await;

        let detail = repo.create_order(&two_item_order(None)).await.unwrap();

        assert_eq!(detail.order.subtotal, 25.0);
        assert_eq!(detail.order.tax, 2.0);
        assert_eq!(detail.order.total, 27.0);
        assert_eq!(detail.order.status, OrderStatus::Pending);
        assert_eq!(detail.order.payment_status, PaymentStatus::Unpaid);
        assert!(detail.order.order_number.starts_with("ORD-"));
        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.items[0].product_name, "Latte");
        assert_eq!(detail.items[0].total_price, 10.0);
        assert_eq!(detail.items[1].total_price, 15.0);
        assert!(detail.items.iter().all(|i| i.order_id == detail.order.id));
    }

    #[tokio::test]
    async fn test_create_order_bumps_customer_counters() {
        let repo = repo().await;
        let customer_id = customer(&repo, "ada@example.com").await;

        repo.create_order(&two_item_order(Some(customer_id)))
            .await
            .unwrap();
        let detail = repo
            .create_order(&two_item_order(Some(customer_id)))
            .await
            .unwrap();

        assert_eq!(detail.order.customer_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(
            detail.order.customer_email.as_deref(),
            Some("ada@example.com")
        );

        let customer = repo.get_customer(customer_id).await.unwrap().unwrap();
        assert_eq!(customer.order_count, 2);
        assert_eq!(customer.total_spent, 54.0);
    }

    #[tokio::test]
    async fn test_create_order_for_unknown_customer_writes_nothing() {
        let repo = repo().await;

        let result = repo.create_order(&two_item_order(Some(999))).await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
        let page = repo
            .list_orders(&OrderFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_failed_item_rolls_back_header_and_counters() {
        let repo = repo().await;
        let customer_id = customer(&repo, "grace@example.com").await;
        let request = CreateOrderRequest::new(vec![
            OrderItemInput::new("Latte", 1, 4.0),
            OrderItemInput::new("Ghost", 1, 4.0).with_product(4242),
        ])
        .with_customer(customer_id);

        let result = repo
            .create_order(&request.into_new_order().unwrap())
            .await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
        let page = repo
            .list_orders(&OrderFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        let customer = repo.get_customer(customer_id).await.unwrap().unwrap();
        assert_eq!(customer.order_count, 0);
        assert_eq!(customer.total_spent, 0.0);
    }

    #[tokio::test]
    async fn test_order_items_snapshot_product_name() {
        let repo = repo().await;
        let product = repo
            .create_product(
                &CreateProductRequest::new("Cold Brew", 4.5)
                    .into_new_product()
                    .unwrap(),
            )
            .await
            .unwrap();
        let order = CreateOrderRequest::new(vec![
            OrderItemInput::new("Cold Brew", 1, 4.5).with_product(product.id)
        ])
        .into_new_order()
        .unwrap();
        let created = repo.create_order(&order).await.unwrap();

        repo.delete_product(product.id).await.unwrap();

        let detail = repo.get_order(created.order.id).await.unwrap().unwrap();
        assert_eq!(detail.items[0].product_id, None);
        assert_eq!(detail.items[0].product_name, "Cold Brew");
    }

    #[tokio::test]
    async fn test_list_orders_filters_and_counts() {
        let repo = repo().await;
        let ada = customer(&repo, "ada@example.com").await;
        for _ in 0..3 {
            repo.create_order(&two_item_order(Some(ada))).await.unwrap();
        }
        let other = repo.create_order(&two_item_order(None)).await.unwrap();
        repo.update_order(
            other.order.id,
            &UpdateOrderRequest {
                status: Some(OrderStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let pending = OrderFilter {
            status: Some("pending".to_string()),
            ..Default::default()
        };
        let page = repo
            .list_orders(&pending, Pagination::new(2, 0))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 3);

        let search = OrderFilter {
            search: Some("ADA@EXAMPLE".to_string()),
            ..Default::default()
        };
        let page = repo
            .list_orders(&search, Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let repo = repo().await;
        let first = repo.create_order(&two_item_order(None)).await.unwrap();
        let second = repo.create_order(&two_item_order(None)).await.unwrap();

        let page = repo
            .list_orders(&OrderFilter::default(), Pagination::default())
            .await
            .unwrap();

        assert_eq!(page.items[0].id, second.order.id);
        assert_eq!(page.items[1].id, first.order.id);
    }

    #[tokio::test]
    async fn test_offset_past_end_keeps_total() {
        let repo = repo().await;
        repo.create_order(&two_item_order(None)).await.unwrap();

        let page = repo
            .list_orders(&OrderFilter::default(), Pagination::new(10, 50))
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_search_wildcards_are_literal() {
        let repo = repo().await;
        repo.create_order(&two_item_order(None)).await.unwrap();

        let filter = OrderFilter {
            search: Some("%".to_string()),
            ..Default::default()
        };
        let page = repo
            .list_orders(&filter, Pagination::default())
            .await
            .unwrap();

        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_update_order_only_touches_supplied_fields() {
        let repo = repo().await;
        let created = repo
            .create_order(
                &CreateOrderRequest::new(vec![OrderItemInput::new("Tea", 1, 3.0)])
                    .with_notes("leave at door")
                    .into_new_order()
                    .unwrap(),
            )
            .await
            .unwrap();

        let updated = repo
            .update_order(
                created.order.id,
                &UpdateOrderRequest {
                    payment_status: Some(PaymentStatus::Paid),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.payment_status, PaymentStatus::Paid);
        assert_eq!(updated.status, OrderStatus::Pending);
        assert_eq!(updated.notes.as_deref(), Some("leave at door"));
        assert_eq!(updated.total, created.order.total);
        assert!(updated.updated_at >= created.order.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_order_is_not_found() {
        let repo = repo().await;

        let result = repo
            .update_order(77, &UpdateOrderRequest::default())
            .await;

        assert_eq!(result, Err(RepositoryError::not_found("Order", 77)));
    }

    #[tokio::test]
    async fn test_delete_order_cascades_items() {
        let repo = repo().await;
        let created = repo.create_order(&two_item_order(None)).await.unwrap();

        repo.delete_order(created.order.id).await.unwrap();

        assert!(repo.get_order(created.order.id).await.unwrap().is_none());
        let remaining: i64 = repo
            .conn
            .call(|conn| {
                conn.query_row("SELECT COUNT(*) FROM order_items", [], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .unwrap();
        assert_eq!(remaining, 0);
        assert_eq!(
            repo.delete_order(created.order.id).await,
            Err(RepositoryError::not_found("Order", created.order.id))
        );
    }

    #[tokio::test]
    async fn test_recent_orders_for_customer() {
        let repo = repo().await;
        let ada = customer(&repo, "ada@example.com").await;
        for _ in 0..4 {
            repo.create_order(&two_item_order(Some(ada))).await.unwrap();
        }
        repo.create_order(&two_item_order(None)).await.unwrap();

        let recent = repo.recent_orders_for_customer(ada, 3).await.unwrap();

        assert_eq!(recent.len(), 3);
        assert!(recent.iter().all(|o| o.customer_id == Some(ada)));
        assert!(recent[0].id > recent[1].id);
    }

    #[tokio::test]
    async fn test_order_stats() {
        let repo = repo().await;
        let empty = repo.order_stats().await.unwrap();
        assert_eq!(empty.total_orders, 0);
        assert_eq!(empty.total_revenue, 0.0);
        assert_eq!(empty.average_order_value, 0.0);

        let paid = repo.create_order(&two_item_order(None)).await.unwrap();
        repo.create_order(&two_item_order(None)).await.unwrap();
        repo.update_order(
            paid.order.id,
            &UpdateOrderRequest {
                status: Some(OrderStatus::Completed),
                payment_status: Some(PaymentStatus::Paid),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let stats = repo.order_stats().await.unwrap();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.completed_orders, 1);
        assert_eq!(stats.total_revenue, 27.0);
        assert_eq!(stats.average_order_value, 27.0);
    }
}
