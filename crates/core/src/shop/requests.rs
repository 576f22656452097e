//! API request types for the admin resources.
//!
//! Create payloads carry their required fields as `Option` so a missing
//! field becomes a [`ValidationError`] instead of a deserialization failure.
//! Update payloads are fully optional: an omitted field keeps its stored
//! value.

use serde::{Deserialize, Serialize};

use super::pricing::{line_total, OrderTotals};
use super::types::{OrderStatus, PaymentStatus, ThreatLevel};
use super::ValidationError;
use crate::query::{Pagination, DEFAULT_COMPETITOR_LIMIT, DEFAULT_LIMIT};
use crate::serde::{
    deserialize_optional_f64, deserialize_optional_flag, deserialize_optional_i64,
    deserialize_optional_string,
};

fn require(missing: Vec<&'static str>) -> Result<(), ValidationError> {
    match missing.len() {
        0 => Ok(()),
        1 => Err(ValidationError::MissingField(missing[0])),
        _ => Err(ValidationError::MissingFields(missing)),
    }
}

fn non_negative(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if v < 0.0 || !v.is_finite() => Err(ValidationError::InvalidValue {
            field,
            value: v.to_string(),
        }),
        _ => Ok(()),
    }
}

// ============================================================================
// Orders
// ============================================================================

/// One line of a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub quantity: Option<i64>,
    #[serde(default, alias = "price", deserialize_with = "deserialize_optional_f64")]
    pub unit_price: Option<f64>,
}

impl OrderItemInput {
    pub fn new(product_name: impl Into<String>, quantity: i64, unit_price: f64) -> Self {
        Self {
            product_id: None,
            product_name: Some(product_name.into()),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
        }
    }

    pub fn with_product(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }
}

/// Request payload for creating an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub items: Option<Vec<OrderItemInput>>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
}

impl CreateOrderRequest {
    pub fn new(items: Vec<OrderItemInput>) -> Self {
        Self {
            items: Some(items),
            ..Self::default()
        }
    }

    pub fn with_customer(mut self, customer_id: i64) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Validates the items and computes the order amounts.
    pub fn into_new_order(self) -> Result<NewOrder, ValidationError> {
        let items = self.items.unwrap_or_default();
        if items.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }

        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| item.into_new_item(index))
            .collect::<Result<Vec<_>, _>>()?;

        let totals = OrderTotals::from_line_totals(items.iter().map(|i| i.total_price));
        if !totals.total.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "subtotal",
                value: totals.subtotal.to_string(),
            });
        }

        Ok(NewOrder {
            customer_id: self.customer_id,
            payment_method: self.payment_method,
            notes: self.notes,
            items,
            totals,
        })
    }
}

impl OrderItemInput {
    fn into_new_item(self, index: usize) -> Result<NewOrderItem, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidItem {
            index,
            reason: reason.to_string(),
        };

        let product_name = self
            .product_name
            .ok_or_else(|| invalid("product_name is required"))?;
        let quantity = self.quantity.ok_or_else(|| invalid("quantity is required"))?;
        let unit_price = self
            .unit_price
            .ok_or_else(|| invalid("unit_price is required"))?;

        if quantity < 1 {
            return Err(invalid("quantity must be at least 1"));
        }
        if unit_price < 0.0 || !unit_price.is_finite() {
            return Err(invalid("unit_price must not be negative"));
        }

        let total_price = line_total(quantity, unit_price);
        if !total_price.is_finite() {
            return Err(invalid("total_price is out of range"));
        }

        Ok(NewOrderItem {
            product_id: self.product_id,
            product_name,
            quantity,
            unit_price,
            total_price,
        })
    }
}

/// A validated order ready to be written in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: Option<i64>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<NewOrderItem>,
    pub totals: OrderTotals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: Option<i64>,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Request payload for updating an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
}

/// Query string of `GET /api/orders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOrdersQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub payment_status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Filters recognized by the order list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub status: Option<String>,
    pub payment_status: Option<String>,
    /// Matches order number, customer name or customer email.
    pub search: Option<String>,
}

impl ListOrdersQuery {
    pub fn into_parts(self) -> (OrderFilter, Pagination) {
        let pagination =
            Pagination::parse(self.limit.as_deref(), self.offset.as_deref(), DEFAULT_LIMIT);
        let filter = OrderFilter {
            status: self.status,
            payment_status: self.payment_status,
            search: self.search,
        };
        (filter, pagination)
    }
}

// ============================================================================
// Products
// ============================================================================

/// Request payload for creating a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub inventory_count: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sku: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub image_url: Option<String>,
}

impl CreateProductRequest {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_inventory(mut self, inventory_count: i64) -> Self {
        self.inventory_count = Some(inventory_count);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = Some(false);
        self
    }

    /// Checks required fields and applies defaults.
    pub fn into_new_product(self) -> Result<NewProduct, ValidationError> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        require(missing)?;
        non_negative("price", self.price)?;

        Ok(NewProduct {
            name: self.name.unwrap_or_default(),
            description: self.description,
            price: self.price.unwrap_or_default(),
            category: self.category,
            inventory_count: self.inventory_count.unwrap_or(0),
            sku: self.sku,
            active: self.active.unwrap_or(true),
            image_url: self.image_url,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub inventory_count: i64,
    pub sku: Option<String>,
    pub active: bool,
    pub image_url: Option<String>,
}

/// Request payload for updating a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub inventory_count: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sku: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub image_url: Option<String>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_negative("price", self.price)
    }
}

/// Query string of `GET /api/products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Filters recognized by the product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub active: Option<bool>,
    /// Matches name, description or SKU.
    pub search: Option<String>,
}

impl ListProductsQuery {
    pub fn into_parts(self) -> (ProductFilter, Pagination) {
        let pagination =
            Pagination::parse(self.limit.as_deref(), self.offset.as_deref(), DEFAULT_LIMIT);
        let filter = ProductFilter {
            category: self.category,
            active: self.active,
            search: self.search,
        };
        (filter, pagination)
    }
}

// ============================================================================
// Customers
// ============================================================================

/// Segment assigned to customers created without one.
pub const DEFAULT_SEGMENT: &str = "new";

/// Request payload for creating a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub segment: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
}

impl CreateCustomerRequest {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Checks required fields and applies defaults.
    pub fn into_new_customer(self) -> Result<NewCustomer, ValidationError> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.email.is_none() {
            missing.push("email");
        }
        require(missing)?;

        Ok(NewCustomer {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default().trim().to_string(),
            phone: self.phone,
            segment: self.segment.unwrap_or_else(|| DEFAULT_SEGMENT.to_string()),
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub segment: String,
    pub notes: Option<String>,
}

/// Request payload for updating a customer. Spend counters are not
/// updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCustomerRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub segment: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
}

/// Query string of `GET /api/customers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCustomersQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub segment: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Filters recognized by the customer list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerFilter {
    /// Matches name, email or phone.
    pub search: Option<String>,
    pub segment: Option<String>,
}

impl ListCustomersQuery {
    pub fn into_parts(self) -> (CustomerFilter, Pagination) {
        let pagination =
            Pagination::parse(self.limit.as_deref(), self.offset.as_deref(), DEFAULT_LIMIT);
        let filter = CustomerFilter {
            search: self.search,
            segment: self.segment,
        };
        (filter, pagination)
    }
}

// ============================================================================
// Competitors
// ============================================================================

/// Request payload for creating a competitor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCompetitorRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub distance: Option<f64>,
    #[serde(default, rename = "type", deserialize_with = "deserialize_optional_string")]
    pub kind: Option<String>,
    #[serde(default)]
    pub threat_level: Option<ThreatLevel>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub rating_change: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub review_count: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub avg_price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub price_diff: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub strengths: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub weaknesses: Option<String>,
    #[serde(default)]
    pub top_items: Option<serde_json::Value>,
    #[serde(default)]
    pub sentiment: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
}

impl CreateCompetitorRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_threat_level(mut self, threat_level: ThreatLevel) -> Self {
        self.threat_level = Some(threat_level);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_price_diff(mut self, price_diff: f64) -> Self {
        self.price_diff = Some(price_diff);
        self
    }

    /// Checks required fields and the shape of the structured columns.
    pub fn into_new_competitor(self) -> Result<NewCompetitor, ValidationError> {
        let Some(name) = self.name else {
            return Err(ValidationError::MissingField("name"));
        };
        validate_structured(&self.top_items, &self.sentiment)?;

        Ok(NewCompetitor {
            name,
            website: self.website,
            distance: self.distance,
            kind: self.kind,
            threat_level: self.threat_level.unwrap_or_default(),
            rating: self.rating,
            rating_change: self.rating_change,
            review_count: self.review_count,
            avg_price: self.avg_price,
            price_diff: self.price_diff,
            strengths: self.strengths,
            weaknesses: self.weaknesses,
            top_items: self.top_items.filter(|v| !v.is_null()),
            sentiment: self.sentiment.filter(|v| !v.is_null()),
            notes: self.notes,
        })
    }
}

/// `top_items` must be an array and `sentiment` an object when present.
fn validate_structured(
    top_items: &Option<serde_json::Value>,
    sentiment: &Option<serde_json::Value>,
) -> Result<(), ValidationError> {
    if let Some(v) = top_items {
        if !(v.is_array() || v.is_null()) {
            return Err(ValidationError::InvalidValue {
                field: "top_items",
                value: "expected an array".to_string(),
            });
        }
    }
    if let Some(v) = sentiment {
        if !(v.is_object() || v.is_null()) {
            return Err(ValidationError::InvalidValue {
                field: "sentiment",
                value: "expected an object".to_string(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCompetitor {
    pub name: String,
    pub website: Option<String>,
    pub distance: Option<f64>,
    pub kind: Option<String>,
    pub threat_level: ThreatLevel,
    pub rating: Option<f64>,
    pub rating_change: Option<f64>,
    pub review_count: Option<i64>,
    pub avg_price: Option<f64>,
    pub price_diff: Option<f64>,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
    pub top_items: Option<serde_json::Value>,
    pub sentiment: Option<serde_json::Value>,
    pub notes: Option<String>,
}

/// Request payload for updating a competitor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCompetitorRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub distance: Option<f64>,
    #[serde(default, rename = "type", deserialize_with = "deserialize_optional_string")]
    pub kind: Option<String>,
    #[serde(default)]
    pub threat_level: Option<ThreatLevel>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub rating_change: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub review_count: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub avg_price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub price_diff: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub strengths: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub weaknesses: Option<String>,
    #[serde(default)]
    pub top_items: Option<serde_json::Value>,
    #[serde(default)]
    pub sentiment: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
}

impl UpdateCompetitorRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_structured(&self.top_items, &self.sentiment)
    }
}

/// Query string of `GET /api/competitors`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCompetitorsQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub threat_level: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Filters recognized by the competitor list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompetitorFilter {
    pub threat_level: Option<String>,
}

impl ListCompetitorsQuery {
    pub fn into_parts(self) -> (CompetitorFilter, Pagination) {
        let pagination = Pagination::parse(
            self.limit.as_deref(),
            self.offset.as_deref(),
            DEFAULT_COMPETITOR_LIMIT,
        );
        let filter = CompetitorFilter {
            threat_level: self.threat_level,
        };
        (filter, pagination)
    }
}
