use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::application::use_cases::tags::list_tags::ListTags;
use crate::application::use_cases::tags::suggest_tags::SuggestTags;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::{self, ApiError};

#[utoipa::path(get, path = "/api/tags", tag = "Tags",
    responses((status = 200, body = [String])))]
pub async fn list_tags(State(ctx): State<AppContext>) -> Result<Json<Vec<String>>, ApiError> {
    let repo = ctx.tag_repo();
    let uc = ListTags {
        repo: repo.as_ref(),
    };
    let names = uc.execute().await.map_err(error::internal)?;
    Ok(Json(names))
}

#[utoipa::path(get, path = "/api/tags/suggest", tag = "Tags",
    params(
        ("q" = Option<String>, Query, description = "Text typed so far"),
        ("selected" = Option<Vec<String>>, Query, description = "Tags already on the client (repeatable)")
    ),
    responses((status = 200, body = [String])))]
pub async fn suggest_tags(
    State(ctx): State<AppContext>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let mut input = String::new();
    let mut selected = Vec::new();
    for (k, v) in pairs {
        match k.as_str() {
            "q" => input = v,
            "selected" => selected.push(v),
            _ => {}
        }
    }
    let repo = ctx.tag_repo();
    let uc = SuggestTags {
        repo: repo.as_ref(),
    };
    let names = uc
        .execute(&input, &selected)
        .await
        .map_err(error::internal)?;
    Ok(Json(names))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/tags", get(list_tags))
        .route("/tags/suggest", get(suggest_tags))
        .with_state(ctx)
}
