use async_trait::async_trait;

use crate::query::Pagination;
use crate::shop::{
    Competitor, CompetitorFilter, CompetitorSummary, Customer, CustomerFilter, CustomerStats,
    NewCompetitor, NewCustomer, NewOrder, NewProduct, Order, OrderDetail, OrderFilter, OrderStats,
    Product, ProductFilter, ProductStats, UpdateCompetitorRequest, UpdateCustomerRequest,
    UpdateOrderRequest, UpdateProductRequest,
};

use super::{Paginated, Result};

/// Repository for order operations.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Lists orders matching `filter`, newest first.
    async fn list_orders(
        &self,
        filter: &OrderFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Order>>;

    /// Gets an order with its line items.
    async fn get_order(&self, id: i64) -> Result<Option<OrderDetail>>;

    /// Creates an order, its items and the customer counter bump atomically.
    async fn create_order(&self, order: &NewOrder) -> Result<OrderDetail>;

    /// Applies a partial update. Fails with `NotFound` for an unknown id.
    async fn update_order(&self, id: i64, update: &UpdateOrderRequest) -> Result<Order>;

    /// Deletes an order; its items go with it.
    async fn delete_order(&self, id: i64) -> Result<()>;

    /// Most recent orders placed by a customer.
    async fn recent_orders_for_customer(&self, customer_id: i64, limit: i64)
        -> Result<Vec<Order>>;

    async fn order_stats(&self) -> Result<OrderStats>;
}

/// Repository for product operations.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_products(
        &self,
        filter: &ProductFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Product>>;

    async fn get_product(&self, id: i64) -> Result<Option<Product>>;

    async fn create_product(&self, product: &NewProduct) -> Result<Product>;

    async fn update_product(&self, id: i64, update: &UpdateProductRequest) -> Result<Product>;

    async fn delete_product(&self, id: i64) -> Result<()>;

    /// Distinct non-null categories in ascending order.
    async fn list_categories(&self) -> Result<Vec<String>>;

    async fn product_stats(&self) -> Result<ProductStats>;
}

/// Repository for customer operations.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn list_customers(
        &self,
        filter: &CustomerFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Customer>>;

    async fn get_customer(&self, id: i64) -> Result<Option<Customer>>;

    /// Fails with `AlreadyExists` when the email is taken.
    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer>;

    async fn update_customer(&self, id: i64, update: &UpdateCustomerRequest) -> Result<Customer>;

    async fn delete_customer(&self, id: i64) -> Result<()>;

    async fn customer_stats(&self) -> Result<CustomerStats>;
}

/// Repository for competitor operations.
#[async_trait]
pub trait CompetitorRepository: Send + Sync {
    /// Lists competitors, highest threat first.
    async fn list_competitors(
        &self,
        filter: &CompetitorFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Competitor>>;

    async fn get_competitor(&self, id: i64) -> Result<Option<Competitor>>;

    async fn create_competitor(&self, competitor: &NewCompetitor) -> Result<Competitor>;

    async fn update_competitor(
        &self,
        id: i64,
        update: &UpdateCompetitorRequest,
    ) -> Result<Competitor>;

    async fn delete_competitor(&self, id: i64) -> Result<()>;

    async fn competitor_summary(&self) -> Result<CompetitorSummary>;
}

/// Liveness of the underlying store.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<()>;
}
