mod error;
mod order_number;
mod pricing;
mod requests;
mod types;

pub use error::ValidationError;
pub use order_number::{generate_order_number, order_number_at, to_base36, ORDER_NUMBER_PREFIX};
pub use pricing::{line_total, round_cents, OrderTotals, TAX_RATE};
pub use requests::{
    CompetitorFilter, CreateCompetitorRequest, CreateCustomerRequest, CreateOrderRequest,
    CreateProductRequest, CustomerFilter, ListCompetitorsQuery, ListCustomersQuery,
    ListOrdersQuery, ListProductsQuery, NewCompetitor, NewCustomer, NewOrder, NewOrderItem,
    NewProduct, OrderFilter, OrderItemInput, ProductFilter, UpdateCompetitorRequest,
    UpdateCustomerRequest, UpdateOrderRequest, UpdateProductRequest, DEFAULT_SEGMENT,
};
pub use types::{
    Competitor, CompetitorSummary, Customer, CustomerDetail, CustomerStats, Order, OrderDetail,
    OrderItem, OrderStats, OrderStatus, PaymentStatus, Product, ProductStats, ThreatLevel,
    LOW_STOCK_THRESHOLD,
};
