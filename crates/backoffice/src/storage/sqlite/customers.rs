//! `CustomerRepository` for SQLite.

use async_trait::async_trait;
use chrono::{Datelike, TimeZone, Utc};
use rusqlite::{params, OptionalExtension};

use backoffice_core::query::{FilterSet, ListQuery, Pagination};
use backoffice_core::shop::{
    round_cents, Customer, CustomerFilter, CustomerStats, NewCustomer, UpdateCustomerRequest,
};
use backoffice_core::storage::{CustomerRepository, Paginated, RepositoryError, Result};

use super::conversions::{format_datetime, row_to_customer};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::repository::{wrap_err, SqliteRepository};
use super::schema;

/// Midnight UTC on the first day of the current month.
fn start_of_month() -> String {
    let now = Utc::now();
    let start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    format_datetime(&start)
}

#[async_trait]
impl CustomerRepository for SqliteRepository {
    async fn list_customers(
        &self,
        filter: &CustomerFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Customer>> {
        let mut filters = FilterSet::new();
        filters
            .contains(schema::CUSTOMER_SEARCH_COLUMNS, filter.search.as_deref())
            .equals(schema::CUSTOMER_SEGMENT_COLUMN, filter.segment.as_deref());

        let query = ListQuery::new(schema::CUSTOMER_COLUMNS, schema::CUSTOMER_FROM)
            .filters(filters)
            .order_by(schema::CUSTOMER_ORDER_BY)
            .paginate(pagination);

        self.fetch_page(query, row_to_customer, "Customer").await
    }

    async fn get_customer(&self, id: i64) -> Result<Option<Customer>> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_CUSTOMER_BY_ID, [id], row_to_customer)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Customer", id.to_string()))
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer> {
        let customer = customer.clone();
        let email = customer.email.clone();
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_CUSTOMER,
                    params![
                        customer.name,
                        customer.email,
                        customer.phone,
                        customer.segment,
                        customer.notes,
                        now,
                    ],
                )
                .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                conn.query_row(schema::SELECT_CUSTOMER_BY_ID, [id], row_to_customer)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Customer", email))
    }

    async fn update_customer(&self, id: i64, update: &UpdateCustomerRequest) -> Result<Customer> {
        let update = update.clone();
        let email = update.email.clone();
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_CUSTOMER,
                        params![
                            id,
                            update.name,
                            update.email,
                            update.phone,
                            update.segment,
                            update.notes,
                            now,
                        ],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                conn.query_row(schema::SELECT_CUSTOMER_BY_ID, [id], row_to_customer)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| match map_tokio_rusqlite_error_with_id(e, "Customer", id.to_string()) {
                RepositoryError::AlreadyExists { entity_type, .. } => {
                    RepositoryError::AlreadyExists {
                        entity_type,
                        key: email.unwrap_or_default(),
                    }
                }
                other => other,
            })
    }

    async fn delete_customer(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_CUSTOMER, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Customer", id.to_string()))
    }

    async fn customer_stats(&self) -> Result<CustomerStats> {
        let month_start = start_of_month();

        self.conn
            .call(move |conn| {
                conn.query_row(schema::CUSTOMER_STATS, [month_start], |row| {
                    Ok(CustomerStats {
                        total_customers: row.get(0)?,
                        total_revenue: round_cents(row.get(1)?),
                        average_spent: round_cents(row.get(2)?),
                        repeat_customers: row.get(3)?,
                        new_this_month: row.get(4)?,
                    })
                })
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Customer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::shop::{CreateCustomerRequest, CreateOrderRequest, OrderItemInput};
    use backoffice_core::storage::OrderRepository;

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    async fn create(repo: &SqliteRepository, request: CreateCustomerRequest) -> Customer {
        repo.create_customer(&request.into_new_customer().unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_customer_starts_with_zero_counters() {
        let repo = repo().await;

        let customer = create(&repo, CreateCustomerRequest::new("Ada", "ada@example.com")).await;

        assert_eq!(customer.segment, "new");
        assert_eq!(customer.order_count, 0);
        assert_eq!(customer.total_spent, 0.0);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_already_exists() {
        let repo = repo().await;
        let ada = create(
            &repo,
            CreateCustomerRequest::new("Ada", "ada@example.com").with_phone("555-0101"),
        )
        .await;
        repo.create_order(
            &CreateOrderRequest::new(vec![OrderItemInput::new("Beans", 1, 10.0)])
                .with_customer(ada.id)
                .into_new_order()
                .unwrap(),
        )
        .await
        .unwrap();
        let before = repo.get_customer(ada.id).await.unwrap().unwrap();

        let result = repo
            .create_customer(
                &CreateCustomerRequest::new("Imposter", "ada@example.com")
                    .into_new_customer()
                    .unwrap(),
            )
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "Customer",
                key: "ada@example.com".to_string(),
            })
        );

        let after = repo.get_customer(ada.id).await.unwrap().unwrap();
        assert_eq!(after, before);
        assert_eq!(after.name, "Ada");
        assert_eq!(after.phone.as_deref(), Some("555-0101"));
        assert_eq!(after.order_count, 1);
        assert_eq!(after.total_spent, 10.8);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_already_exists() {
        let repo = repo().await;
        create(&repo, CreateCustomerRequest::new("Ada", "ada@example.com")).await;
        let grace = create(&repo, CreateCustomerRequest::new("Grace", "grace@example.com")).await;

        let result = repo
            .update_customer(
                grace.id,
                &UpdateCustomerRequest {
                    email: Some("ada@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "Customer",
                key: "ada@example.com".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_update_customer_partial() {
        let repo = repo().await;
        let ada = create(
            &repo,
            CreateCustomerRequest::new("Ada", "ada@example.com").with_phone("555-0100"),
        )
        .await;

        let updated = repo
            .update_customer(
                ada.id,
                &UpdateCustomerRequest {
                    segment: Some("vip".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.segment, "vip");
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
        assert_eq!(updated.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_list_customers_search_and_segment() {
        let repo = repo().await;
        create(
            &repo,
            CreateCustomerRequest::new("Ada Lovelace", "ada@example.com").with_segment("vip"),
        )
        .await;
        create(&repo, CreateCustomerRequest::new("Grace Hopper", "grace@navy.mil")).await;
        create(
            &repo,
            CreateCustomerRequest::new("Alan Turing", "alan@example.com").with_segment("vip"),
        )
        .await;

        let filter = CustomerFilter {
            search: Some("EXAMPLE.com".to_string()),
            segment: Some("vip".to_string()),
        };
        let page = repo
            .list_customers(&filter, Pagination::default())
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        // Newest first.
        assert_eq!(page.items[0].name, "Alan Turing");
        assert_eq!(page.items[1].name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_delete_customer_keeps_orders() {
        let repo = repo().await;
        let ada = create(&repo, CreateCustomerRequest::new("Ada", "ada@example.com")).await;
        let order = repo
            .create_order(
                &CreateOrderRequest::new(vec![OrderItemInput::new("Tea", 1, 3.0)])
                    .with_customer(ada.id)
                    .into_new_order()
                    .unwrap(),
            )
            .await
            .unwrap();

        repo.delete_customer(ada.id).await.unwrap();

        let detail = repo.get_order(order.order.id).await.unwrap().unwrap();
        assert_eq!(detail.order.customer_id, None);
        assert_eq!(detail.order.customer_name, None);
        assert_eq!(
            repo.delete_customer(ada.id).await,
            Err(RepositoryError::not_found("Customer", ada.id))
        );
    }

    #[tokio::test]
    async fn test_customer_stats() {
        let repo = repo().await;
        let ada = create(&repo, CreateCustomerRequest::new("Ada", "ada@example.com")).await;
        create(&repo, CreateCustomerRequest::new("Grace", "grace@example.com")).await;
        let order = CreateOrderRequest::new(vec![OrderItemInput::new("Beans", 1, 10.0)])
            .with_customer(ada.id)
            .into_new_order()
            .unwrap();
        repo.create_order(&order).await.unwrap();
        repo.create_order(&order).await.unwrap();

        let stats = repo.customer_stats().await.unwrap();

        assert_eq!(stats.total_customers, 2);
        assert_eq!(stats.total_revenue, 21.6);
        assert_eq!(stats.average_spent, 10.8);
        assert_eq!(stats.repeat_customers, 1);
        assert_eq!(stats.new_this_month, 2);
    }

    #[test]
    fn test_start_of_month_is_first_day() {
        let start = start_of_month();
        assert!(start.contains("-01T00:00:00.000000Z"));
    }
}
