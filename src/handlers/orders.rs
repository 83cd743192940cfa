use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::orders::{
    AddBoxRequest, ApproveOrderRequest, BoxResponse, CreateOrdersRequest, OrderFilters,
    OrderListResponse, OrderResponse, UpdateOrderRequest, UpdateOrderStatusRequest,
};
use crate::{errors::ServiceError, ApiResponse, AppState, ListQuery};

#[derive(Debug, Deserialize)]
pub struct CancelOrderRequest {
    pub reason: Option<String>,
}

pub async fn create_orders(
    State(state): State<AppState>,
    Json(request): Json<CreateOrdersRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.services.orders.create_orders(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(orders)),
    ))
}

pub async fn list_orders(
    State(state): State<AppState>,
    Query(list): Query<ListQuery>,
    Query(filters): Query<OrderFilters>,
) -> Result<Json<ApiResponse<OrderListResponse>>, ServiceError> {
    let orders = state
        .services
        .orders
        .list_orders(filters, list.page, list.limit)
        .await?;
    Ok(Json(ApiResponse::success(orders)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderResponse>>, ServiceError> {
    let order = state.services.orders.get_order(id).await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn get_order_by_number(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<ApiResponse<OrderResponse>>, ServiceError> {
    let order = state
        .services
        .orders
        .get_order_by_number(&order_number)
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, ServiceError> {
    let order = state.services.orders.update_order(id, request).await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn approve_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ApproveOrderRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, ServiceError> {
    let order = state.services.orders.approve_order(id, request).await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelOrderRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, ServiceError> {
    let order = state
        .services
        .orders
        .cancel_order(id, request.reason)
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, ServiceError> {
    let order = state
        .services
        .orders
        .update_order_status(id, request)
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn add_box(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddBoxRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order_box = state.services.orders.add_box(id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(order_box))))
}

pub async fn list_boxes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<BoxResponse>>>, ServiceError> {
    let boxes = state.services.orders.list_boxes(id).await?;
    Ok(Json(ApiResponse::success(boxes)))
}
