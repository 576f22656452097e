//! Demo records for local development (`--seed-demo`).

use anyhow::Result;
use serde_json::json;

use backoffice_core::query::Pagination;
use backoffice_core::shop::{
    CreateCompetitorRequest, CreateCustomerRequest, CreateOrderRequest, CreateProductRequest,
    OrderItemInput, ProductFilter, ThreatLevel,
};

use crate::state::AppState;

/// Counts of records written by [`seed_demo_data`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub products: usize,
    pub customers: usize,
    pub competitors: usize,
    pub orders: usize,
}

fn demo_products() -> Vec<CreateProductRequest> {
    vec![
        CreateProductRequest::new("Espresso", 3.0)
            .with_category("coffee")
            .with_sku("COF-ESP")
            .with_inventory(120)
            .with_description("Double shot, house blend"),
        CreateProductRequest::new("Cappuccino", 4.5)
            .with_category("coffee")
            .with_sku("COF-CAP")
            .with_inventory(80),
        CreateProductRequest::new("Cold Brew", 5.0)
            .with_category("coffee")
            .with_sku("COF-CB")
            .with_inventory(6),
        CreateProductRequest::new("Croissant", 3.25)
            .with_category("pastry")
            .with_sku("PAS-CRO")
            .with_inventory(24),
        CreateProductRequest::new("Blueberry Muffin", 3.5)
            .with_category("pastry")
            .with_sku("PAS-MUF")
            .with_inventory(4),
        CreateProductRequest::new("Pumpkin Loaf", 3.75)
            .with_category("pastry")
            .with_sku("PAS-PUM")
            .inactive(),
    ]
}

fn demo_customers() -> Vec<CreateCustomerRequest> {
    vec![
        CreateCustomerRequest::new("Ada Lovelace", "ada@example.com")
            .with_segment("vip")
            .with_phone("555-0101"),
        CreateCustomerRequest::new("Grace Hopper", "grace@example.com").with_segment("regular"),
        CreateCustomerRequest::new("Alan Turing", "alan@example.com"),
    ]
}

fn demo_competitors() -> Vec<CreateCompetitorRequest> {
    let mut bean_there = CreateCompetitorRequest::new("Bean There")
        .with_threat_level(ThreatLevel::High)
        .with_rating(4.6)
        .with_price_diff(0.75);
    bean_there.kind = Some("cafe".to_string());
    bean_there.distance = Some(0.3);
    bean_there.top_items = Some(json!(["Flat White", "Cortado"]));
    bean_there.sentiment = Some(json!({"positive": 78, "neutral": 15, "negative": 7}));

    let mut daily_grind = CreateCompetitorRequest::new("Daily Grind")
        .with_rating(4.1)
        .with_price_diff(-0.25);
    daily_grind.kind = Some("chain".to_string());
    daily_grind.distance = Some(1.2);

    let corner_deli = CreateCompetitorRequest::new("Corner Deli")
        .with_threat_level(ThreatLevel::Low)
        .with_rating(3.8)
        .with_price_diff(-1.0);

    vec![bean_there, daily_grind, corner_deli]
}

/// Writes demo products, customers, competitors and orders.
///
/// Does nothing when the product table already has rows, so restarting with
/// `--seed-demo` never duplicates the data set.
pub async fn seed_demo_data(state: &AppState) -> Result<SeedReport> {
    let existing = state
        .products
        .list_products(&ProductFilter::default(), Pagination::new(1, 0))
        .await?;
    if existing.total > 0 {
        tracing::info!(products = existing.total, "Database not empty, skipping demo data");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();

    let mut products = Vec::new();
    for request in demo_products() {
        products.push(state.products.create_product(&request.into_new_product()?).await?);
        report.products += 1;
    }

    let mut customers = Vec::new();
    for request in demo_customers() {
        customers.push(
            state
                .customers
                .create_customer(&request.into_new_customer()?)
                .await?,
        );
        report.customers += 1;
    }

    for request in demo_competitors() {
        state
            .competitors
            .create_competitor(&request.into_new_competitor()?)
            .await?;
        report.competitors += 1;
    }

    let item = |index: usize, quantity: i64| {
        let product = &products[index % products.len()];
        OrderItemInput::new(product.name.clone(), quantity, product.price).with_product(product.id)
    };

    let orders = vec![
        CreateOrderRequest::new(vec![item(0, 2), item(3, 1)]).with_customer(customers[0].id),
        CreateOrderRequest::new(vec![item(1, 1)]).with_customer(customers[0].id),
        CreateOrderRequest::new(vec![item(2, 3), item(4, 2)])
            .with_customer(customers[1].id)
            .with_notes("Pickup at 9am"),
        CreateOrderRequest::new(vec![item(0, 1)]),
    ];

    for request in orders {
        state.orders.create_order(&request.into_new_order()?).await?;
        report.orders += 1;
    }

    tracing::info!(
        products = report.products,
        customers = report.customers,
        competitors = report.competitors,
        orders = report.orders,
        "Seeded demo data"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::auth::StaticTokenVerifier;
    use backoffice_core::shop::{CompetitorFilter, CustomerFilter, OrderFilter};

    #[tokio::test]
    async fn test_seed_populates_every_table() {
        let state = AppState::in_memory(StaticTokenVerifier::default()).await;

        let report = seed_demo_data(&state).await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                products: 6,
                customers: 3,
                competitors: 3,
                orders: 4,
            }
        );

        let orders = state
            .orders
            .list_orders(&OrderFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(orders.total, 4);

        let customers = state
            .customers
            .list_customers(&CustomerFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(customers.total, 3);

        let competitors = state
            .competitors
            .list_competitors(&CompetitorFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(competitors.items[0].name, "Bean There");
    }

    #[tokio::test]
    async fn test_seed_updates_customer_counters() {
        let state = AppState::in_memory(StaticTokenVerifier::default()).await;
        seed_demo_data(&state).await.unwrap();

        let ada = state
            .customers
            .list_customers(
                &CustomerFilter {
                    search: Some("ada@".to_string()),
                    segment: None,
                },
                Pagination::default(),
            )
            .await
            .unwrap();

        // (2 * 3.00 + 3.25) * 1.08 + 4.50 * 1.08
        assert_eq!(ada.items[0].order_count, 2);
        assert!((ada.items[0].total_spent - 14.85).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_seed_is_skipped_when_data_exists() {
        let state = AppState::in_memory(StaticTokenVerifier::default()).await;
        seed_demo_data(&state).await.unwrap();

        let second = seed_demo_data(&state).await.unwrap();

        assert_eq!(second, SeedReport::default());
    }
}
