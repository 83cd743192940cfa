use axum::{
    extract::State,
    response::Json,
};

use crate::services::documents::{ContractConfigResponse, ReplaceContractConfigRequest};
use crate::{errors::ServiceError, ApiResponse, AppState};

pub async fn get_contract_config(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ContractConfigResponse>>, ServiceError> {
    let contract = state.services.documents.active_contract_config().await?;
    Ok(Json(ApiResponse::success(contract)))
}

pub async fn replace_contract_config(
    State(state): State<AppState>,
    Json(request): Json<ReplaceContractConfigRequest>,
) -> Result<Json<ApiResponse<ContractConfigResponse>>, ServiceError> {
    let contract = state
        .services
        .documents
        .replace_contract_config(request)
        .await?;
    Ok(Json(ApiResponse::success(contract)))
}
