use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
    /// Number of tags in the store; null when the store could not be reached.
    pub tags: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(ctx): State<AppContext>) -> Json<HealthResp> {
    match ctx.tag_repo().count().await {
        Ok(n) => Json(HealthResp {
            status: "ok",
            tags: Some(n),
        }),
        Err(e) => {
            tracing::warn!(error = ?e, "store_connection_test_failed");
            Json(HealthResp {
                status: "degraded",
                tags: None,
            })
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/health", get(health)).with_state(ctx)
}
