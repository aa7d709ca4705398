use axum::{Json, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::clients::error::ClientError;

#[derive(Debug, Serialize, ToSchema)]
pub struct FieldErrorItem {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldErrorItem>,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

fn body(status: StatusCode, error: String, fields: Vec<FieldErrorItem>) -> ApiError {
    (status, Json(ErrorBody { error, fields }))
}

pub fn from_client_error(err: ClientError) -> ApiError {
    match err {
        ClientError::NotFound(id) => body(
            StatusCode::NOT_FOUND,
            format!("client {id} not found"),
            Vec::new(),
        ),
        ClientError::Validation(errors) => body(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid client input".into(),
            errors
                .into_iter()
                .map(|e| FieldErrorItem {
                    field: e.field.to_string(),
                    message: e.message,
                })
                .collect(),
        ),
        ClientError::Store(e) => internal(e),
    }
}

pub fn internal(err: anyhow::Error) -> ApiError {
    tracing::error!(error = ?err, "client_store_request_failed");
    body(
        StatusCode::INTERNAL_SERVER_ERROR,
        "store request failed".into(),
        Vec::new(),
    )
}
