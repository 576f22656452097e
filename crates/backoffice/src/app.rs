use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        competitors::{
            competitor_summary, create_competitor, delete_competitor, get_competitor,
            list_competitors, update_competitor,
        },
        customers::{
            create_customer, customer_stats, delete_customer, get_customer, list_customers,
            update_customer,
        },
        health::{livez, readyz},
        orders::{create_order, delete_order, get_order, list_orders, order_stats, update_order},
        products::{
            create_product, delete_product, get_product, list_categories, list_products,
            product_stats, update_product,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let order_routes = Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/stats", get(order_stats))
        .route(
            "/{id}",
            get(get_order).put(update_order).delete(delete_order),
        );

    let product_routes = Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/categories", get(list_categories))
        .route("/stats", get(product_stats))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        );

    let customer_routes = Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/stats", get(customer_stats))
        .route(
            "/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        );

    let competitor_routes = Router::new()
        .route("/", get(list_competitors).post(create_competitor))
        .route("/summary", get(competitor_summary))
        .route(
            "/{id}",
            get(get_competitor)
                .put(update_competitor)
                .delete(delete_competitor),
        );

    // API routes with CORS; every handler requires an admin token
    let api_routes = Router::new()
        .nest("/orders", order_routes)
        .nest("/products", product_routes)
        .nest("/customers", customer_routes)
        .nest("/competitors", competitor_routes)
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
