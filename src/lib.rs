//! Labkit API Library
//!
//! Backend service for laboratory sample-kit logistics: order
//! scheduling, stock allocation, shipment planning, and document
//! generation.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod order_number;
pub mod pdf;
pub mod scheduling;
pub mod services;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: services::AppServices,
}

// Common query parameters for list endpoints
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}
fn default_limit() -> u64 {
    20
}

// Common response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

pub fn api_v1_routes() -> Router<AppState> {
    let orders = Router::new()
        .route(
            "/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_orders),
        )
        .route(
            "/orders/:id",
            get(handlers::orders::get_order).put(handlers::orders::update_order),
        )
        .route(
            "/orders/by-number/:order_number",
            get(handlers::orders::get_order_by_number),
        )
        .route("/orders/:id/approve", post(handlers::orders::approve_order))
        .route("/orders/:id/cancel", post(handlers::orders::cancel_order))
        .route(
            "/orders/:id/status",
            put(handlers::orders::update_order_status),
        )
        .route(
            "/orders/:id/boxes",
            get(handlers::orders::list_boxes).post(handlers::orders::add_box),
        )
        .route(
            "/orders/:id/declaration",
            post(handlers::boxes::generate_declaration),
        );

    let boxes = Router::new()
        .route(
            "/boxes/:box_id/labels",
            get(handlers::boxes::label_status).post(handlers::boxes::generate_label),
        )
        .route(
            "/boxes/:box_id/documents",
            get(handlers::boxes::list_documents),
        );

    let stock = Router::new()
        .route(
            "/stock-items",
            get(handlers::stock::list_stock_items).post(handlers::stock::create_stock_item),
        )
        .route("/stock-items/low-stock", get(handlers::stock::list_low_stock))
        .route("/stock-items/:id", get(handlers::stock::get_stock_item))
        .route("/stock-items/:id/adjust", post(handlers::stock::adjust_stock))
        .route(
            "/stock-items/:id/movements",
            get(handlers::stock::list_movements),
        );

    let contract = Router::new().route(
        "/contract-config",
        get(handlers::contract::get_contract_config)
            .put(handlers::contract::replace_contract_config),
    );

    Router::new()
        .merge(orders)
        .merge(boxes)
        .merge(stock)
        .merge(contract)
        .route("/status", get(api_status))
}

/// Builds the full application router for the given state.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .route("/health", get(health_check))
        .with_state(state)
}

async fn api_status() -> ApiResult<Value> {
    let status_data = json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
    });
    Ok(Json(ApiResponse::success(status_data)))
}

async fn health_check(State(state): State<AppState>) -> ApiResult<Value> {
    let database = match db::check_connection(&state.db).await {
        Ok(()) => "up",
        Err(_) => "down",
    };
    let health_data = json!({
        "status": if database == "up" { "healthy" } else { "degraded" },
        "database": database,
    });
    Ok(Json(ApiResponse::success(health_data)))
}
