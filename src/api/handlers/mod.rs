use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::mcp::{
    AppendManyRequest, AppendManyResponse, AppendRequest, AppendResponse, ListOrReadRequest,
    ListOrReadResponse,
};
use crate::models::*;
use crate::store::{DocumentStore, StoreError};

// ============================================================
// Error Handling
// ============================================================

/// Map a store error to a response.
///
/// Validation errors describe the caller's input and are returned as-is.
/// I/O errors are logged in full but clients only see a generic message.
fn store_error(e: StoreError) -> (StatusCode, String) {
    match e {
        StoreError::Validation(msg) => {
            tracing::warn!("Validation error: {}", msg);
            (StatusCode::BAD_REQUEST, msg)
        }
        e => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Documents
// ============================================================

pub async fn list_documents(
    State(store): State<DocumentStore>,
) -> Result<Json<ListOrReadResponse>, (StatusCode, String)> {
    store
        .list_documents()
        .map(|names| {
            Json(ListOrReadResponse {
                files: Files::Names(names),
            })
        })
        .map_err(store_error)
}

pub async fn read_documents(
    State(store): State<DocumentStore>,
    Json(input): Json<ListOrReadRequest>,
) -> Result<Json<ListOrReadResponse>, (StatusCode, String)> {
    let names = input.file_names.unwrap_or_default();
    store
        .read_documents(&names)
        .map(|files| Json(ListOrReadResponse { files }))
        .map_err(store_error)
}

/// Append one entry. Failures keep the `{status, message}` body; the status
/// code tells bad input (400) apart from I/O failure (500).
pub async fn append(
    State(store): State<DocumentStore>,
    Json(input): Json<AppendRequest>,
) -> (StatusCode, Json<AppendResponse>) {
    let target = AppendTarget {
        file_name: Some(input.file_name),
        entry: Some(input.entry),
        section_header: input.section_header,
    };

    let (result, error) = store.try_append_target(&target);
    let code = match error {
        None => StatusCode::OK,
        Some(e) if e.is_validation() => StatusCode::BAD_REQUEST,
        Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (code, Json(result.into()))
}

pub async fn append_many(
    State(store): State<DocumentStore>,
    Json(input): Json<AppendManyRequest>,
) -> Json<AppendManyResponse> {
    let targets: Vec<AppendTarget> = input.entries.into_iter().map(Into::into).collect();
    Json(AppendManyResponse {
        results: store.append_many(&targets),
    })
}
