use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::clients::create_client::CreateClient;
use crate::application::use_cases::clients::delete_client::DeleteClient;
use crate::application::use_cases::clients::error::ClientError;
use crate::application::use_cases::clients::get_client::GetClient;
use crate::application::use_cases::clients::list_clients::ListClients;
use crate::application::use_cases::clients::update_client::UpdateClient;
use crate::bootstrap::app_context::AppContext;
use crate::domain::clients::client::{
    Client as DomainClient, ClientDraft, ClientFields, ClientSort, ListClientsParams,
};
use crate::presentation::http::error::{self, ApiError, ErrorBody};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub profile_picture_url: String,
    pub internal_notes: String,
    pub registration_date: chrono::DateTime<chrono::Utc>,
    pub tags: Vec<String>,
}

impl From<DomainClient> for Client {
    fn from(c: DomainClient) -> Self {
        Client {
            id: c.id,
            full_name: c.full_name,
            email: c.email,
            phone_number: c.phone_number,
            address: c.address,
            profile_picture_url: c.profile_picture_url,
            internal_notes: c.internal_notes,
            registration_date: c.registration_date,
            tags: c.tags,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientPageResponse {
    pub content: Vec<Client>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub page: u32,
    pub size: u32,
    /// Echo of the request's `seq`, so callers can drop responses to superseded searches.
    pub seq: Option<u64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub profile_picture_url: String,
    pub internal_notes: String,
    pub tags: Vec<String>,
}

impl From<ClientRequest> for ClientDraft {
    fn from(r: ClientRequest) -> Self {
        ClientDraft {
            fields: ClientFields {
                full_name: r.full_name,
                email: r.email,
                phone_number: r.phone_number,
                address: r.address,
                profile_picture_url: r.profile_picture_url,
                internal_notes: r.internal_notes,
            },
            tags: r.tags,
        }
    }
}

/// Reads `page`, `size`, `sort`, `q`, repeated `tag` and `seq` from the raw query pairs.
pub fn parse_list_query(
    pairs: Vec<(String, String)>,
    default_size: u32,
) -> Result<(ListClientsParams, Option<u64>), ClientError> {
    let mut params = ListClientsParams {
        size: default_size,
        ..Default::default()
    };
    let mut seq = None;
    for (k, v) in pairs {
        match k.as_str() {
            "page" => {
                params.page = v
                    .trim()
                    .parse()
                    .map_err(|_| ClientError::invalid("page", "page must be a non-negative integer"))?;
            }
            "size" => {
                params.size = v
                    .trim()
                    .parse()
                    .map_err(|_| ClientError::invalid("size", "size must be a positive integer"))?;
            }
            "sort" => {
                params.sort = ClientSort::parse(&v)
                    .ok_or_else(|| ClientError::invalid("sort", format!("unsupported sort '{v}'")))?;
            }
            "q" => params.query = v,
            "tag" => params.tags.push(v),
            "seq" => seq = v.trim().parse().ok(),
            _ => {}
        }
    }
    Ok((params, seq))
}

#[utoipa::path(get, path = "/api/clients", tag = "Clients",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("size" = Option<u32>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "field,dir (default fullName,asc)"),
        ("q" = Option<String>, Query, description = "Name or email contains (ignored when tag is set)"),
        ("tag" = Option<Vec<String>>, Query, description = "Clients carrying all of these tags (repeatable)"),
        ("seq" = Option<u64>, Query, description = "Caller sequence number, echoed back")
    ),
    responses((status = 200, body = ClientPageResponse), (status = 422, body = ErrorBody)))]
pub async fn list_clients(
    State(ctx): State<AppContext>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ClientPageResponse>, ApiError> {
    let (params, seq) =
        parse_list_query(pairs, ctx.cfg.default_page_size).map_err(error::from_client_error)?;
    let repo = ctx.client_repo();
    let uc = ListClients {
        repo: repo.as_ref(),
    };
    let page = uc.execute(&params).await.map_err(error::from_client_error)?;
    Ok(Json(ClientPageResponse {
        content: page.content.into_iter().map(Into::into).collect(),
        total_elements: page.total_elements,
        total_pages: page.total_pages,
        page: page.page,
        size: page.size,
        seq,
    }))
}

#[utoipa::path(get, path = "/api/clients/{id}", tag = "Clients",
    params(("id" = Uuid, Path, description = "Client ID")),
    responses((status = 200, body = Client), (status = 404, body = ErrorBody)))]
pub async fn get_client(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Client>, ApiError> {
    let repo = ctx.client_repo();
    let uc = GetClient {
        repo: repo.as_ref(),
    };
    let client = uc.execute(id).await.map_err(error::from_client_error)?;
    Ok(Json(client.into()))
}

#[utoipa::path(post, path = "/api/clients", tag = "Clients", request_body = ClientRequest,
    responses((status = 200, body = Client), (status = 422, body = ErrorBody)))]
pub async fn create_client(
    State(ctx): State<AppContext>,
    Json(req): Json<ClientRequest>,
) -> Result<Json<Client>, ApiError> {
    let draft: ClientDraft = req.into();
    let repo = ctx.client_repo();
    let tagging = ctx.tagging_repo();
    let uc = CreateClient {
        repo: repo.as_ref(),
        tagging: tagging.as_ref(),
    };
    let client = uc
        .execute(&draft)
        .await
        .map_err(error::from_client_error)?;
    tracing::info!(client_id = %client.id, tags = client.tags.len(), "client_created");
    Ok(Json(client.into()))
}

#[utoipa::path(put, path = "/api/clients/{id}", tag = "Clients", request_body = ClientRequest,
    params(("id" = Uuid, Path, description = "Client ID")),
    responses((status = 200, body = Client), (status = 404, body = ErrorBody), (status = 422, body = ErrorBody)))]
pub async fn update_client(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<ClientRequest>,
) -> Result<Json<Client>, ApiError> {
    let draft: ClientDraft = req.into();
    let repo = ctx.client_repo();
    let tagging = ctx.tagging_repo();
    let uc = UpdateClient {
        repo: repo.as_ref(),
        tagging: tagging.as_ref(),
    };
    let client = uc
        .execute(id, &draft)
        .await
        .map_err(error::from_client_error)?;
    tracing::info!(client_id = %id, tags = client.tags.len(), "client_updated");
    Ok(Json(client.into()))
}

#[utoipa::path(delete, path = "/api/clients/{id}", tag = "Clients",
    params(("id" = Uuid, Path, description = "Client ID")),
    responses((status = 204), (status = 404, body = ErrorBody)))]
pub async fn delete_client(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = ctx.client_repo();
    let uc = DeleteClient {
        repo: repo.as_ref(),
    };
    uc.execute(id).await.map_err(error::from_client_error)?;
    tracing::info!(client_id = %id, "client_deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clients::client::SortField;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn collects_repeated_tags_and_echoes_seq() {
        let (p, seq) = parse_list_query(
            pairs(&[
                ("page", "2"),
                ("sort", "email,desc"),
                ("tag", "studio"),
                ("tag", "wedding"),
                ("seq", "41"),
            ]),
            10,
        )
        .unwrap();
        assert_eq!(p.page, 2);
        assert_eq!(p.size, 10);
        assert_eq!(p.sort.field, SortField::Email);
        assert_eq!(p.tags, vec!["studio", "wedding"]);
        assert_eq!(seq, Some(41));
    }

    #[test]
    fn bad_numbers_and_sorts_are_validation_errors() {
        for bad in [("page", "-1"), ("size", "ten"), ("sort", "password,asc")] {
            let err = parse_list_query(pairs(&[bad]), 10).unwrap_err();
            assert!(matches!(err, ClientError::Validation(_)), "{bad:?}");
        }
    }

    #[test]
    fn request_maps_to_draft() {
        let req: ClientRequest = serde_json::from_value(serde_json::json!({
            "fullName": "Ana",
            "phoneNumber": "555",
            "profilePictureUrl": "https://img/ana.png",
            "internalNotes": "note",
            "tags": ["vip"]
        }))
        .unwrap();
        let draft = ClientDraft::from(req);
        assert_eq!(draft.fields.full_name, "Ana");
        assert_eq!(draft.fields.phone_number, "555");
        assert_eq!(draft.fields.profile_picture_url, "https://img/ana.png");
        assert_eq!(draft.fields.email, "");
        assert_eq!(draft.tags, vec!["vip"]);
    }
}
