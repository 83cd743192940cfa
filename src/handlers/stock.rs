use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::services::stock::{
    AdjustStockRequest, CreateStockItemRequest, StockItemListResponse, StockItemResponse,
    StockMovementResponse,
};
use crate::{errors::ServiceError, ApiResponse, AppState, ListQuery};

pub async fn create_stock_item(
    State(state): State<AppState>,
    Json(request): Json<CreateStockItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.stock.create_stock_item(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

pub async fn list_stock_items(
    State(state): State<AppState>,
    Query(list): Query<ListQuery>,
) -> Result<Json<ApiResponse<StockItemListResponse>>, ServiceError> {
    let items = state
        .services
        .stock
        .list_stock_items(list.page, list.limit)
        .await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn get_stock_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StockItemResponse>>, ServiceError> {
    let item = state.services.stock.get_stock_item(id).await?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AdjustStockRequest>,
) -> Result<Json<ApiResponse<StockItemResponse>>, ServiceError> {
    let item = state.services.stock.adjust_stock(id, request).await?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn list_movements(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<StockMovementResponse>>>, ServiceError> {
    let movements = state.services.stock.list_movements(id).await?;
    Ok(Json(ApiResponse::success(movements)))
}

pub async fn list_low_stock(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StockItemResponse>>>, ServiceError> {
    let items = state.services.stock.list_low_stock().await?;
    Ok(Json(ApiResponse::success(items)))
}
