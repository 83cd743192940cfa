use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::services::documents::{
    BoxDocumentResponse, GenerateDeclarationRequest, GenerateLabelRequest, LabelStatusResponse,
};
use crate::{errors::ServiceError, ApiResponse, AppState};

fn pdf_attachment_headers(
    file_name: &str,
    document_id: Option<Uuid>,
) -> Result<HeaderMap, ServiceError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    let disposition = format!("attachment; filename=\"{}\"", file_name);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).map_err(|_| {
            ServiceError::InternalError(format!("Invalid generated file name: {}", file_name))
        })?,
    );
    if let Some(document_id) = document_id {
        headers.insert(
            HeaderName::from_static("x-document-id"),
            HeaderValue::from_str(&document_id.to_string())
                .map_err(|_| ServiceError::InternalError("Invalid document id".to_string()))?,
        );
    }
    Ok(headers)
}

/// Generates a content label and streams it back as a PDF attachment.
pub async fn generate_label(
    State(state): State<AppState>,
    Path(box_id): Path<Uuid>,
    Json(request): Json<GenerateLabelRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let stored = state
        .services
        .documents
        .generate_label(box_id, request)
        .await?;
    let headers = pdf_attachment_headers(&stored.document.file_name, Some(stored.document_id))?;
    Ok((headers, stored.document.bytes))
}

pub async fn label_status(
    State(state): State<AppState>,
    Path(box_id): Path<Uuid>,
) -> Result<Json<ApiResponse<LabelStatusResponse>>, ServiceError> {
    let status = state.services.documents.label_status(box_id).await?;
    Ok(Json(ApiResponse::success(status)))
}

pub async fn list_documents(
    State(state): State<AppState>,
    Path(box_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<BoxDocumentResponse>>>, ServiceError> {
    let documents = state.services.documents.list_documents(box_id).await?;
    Ok(Json(ApiResponse::success(documents)))
}

/// Generates the non-ADR declaration for an order and streams it back.
pub async fn generate_declaration(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<GenerateDeclarationRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let document = state
        .services
        .documents
        .generate_declaration(order_id, request)
        .await?;
    let headers = pdf_attachment_headers(&document.file_name, None)?;
    Ok((headers, document.bytes))
}
