use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{CONTENT_RANGE, HeaderMap};
use serde_json::json;
use uuid::Uuid;

use crate::application::ports::client_repository::ClientRepository;
use crate::domain::clients::client::{Client, ClientFields, ClientFilter, ClientQuery};
use crate::infrastructure::rest::RestClient;
use crate::infrastructure::rest::query::{self, CLIENT_SELECT};
use crate::infrastructure::rest::rows::{ClientIdRow, ClientRow, ClientWriteRow};

const FIND_WITH_ALL_TAGS_RPC: &str = "rpc/find_clients_with_all_tags";

pub struct RestClientRepository {
    pub rest: RestClient,
}

impl RestClientRepository {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    async fn first_row(&self, req: reqwest::RequestBuilder) -> anyhow::Result<Option<Client>> {
        let rows: Vec<ClientRow> = self.rest.send(req).await?.json().await?;
        Ok(rows.into_iter().next().map(Client::from))
    }
}

/// An empty id set (no client carries every requested tag) needs no round trip.
fn matches_nothing(q: &ClientQuery) -> bool {
    matches!(&q.filter, ClientFilter::Ids(ids) if ids.is_empty())
}

fn total_from_headers(headers: &HeaderMap) -> Option<i64> {
    headers
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(query::content_range_total)
}

#[async_trait]
impl ClientRepository for RestClientRepository {
    async fn find_ids_with_all_tags(&self, tag_names: &[String]) -> anyhow::Result<Vec<Uuid>> {
        let req = self
            .rest
            .request(Method::POST, FIND_WITH_ALL_TAGS_RPC)
            .json(&json!({ "tag_names": tag_names }));
        let rows: Vec<ClientIdRow> = self.rest.send(req).await?.json().await?;
        Ok(rows.into_iter().map(|r| r.client_id).collect())
    }

    async fn query(&self, q: &ClientQuery) -> anyhow::Result<(Vec<Client>, Option<i64>)> {
        if matches_nothing(q) {
            return Ok((Vec::new(), Some(0)));
        }
        let req = self
            .rest
            .request(Method::GET, "clients")
            .query(&query::list_params(q))
            .header("Prefer", "count=exact");
        let resp = self.rest.send(req).await?;
        let total = total_from_headers(resp.headers());
        let rows: Vec<ClientRow> = resp.json().await?;
        Ok((rows.into_iter().map(Client::from).collect(), total))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>> {
        let req = self
            .rest
            .request(Method::GET, "clients")
            .query(&[("select", CLIENT_SELECT.to_string()), ("id", query::eq(id))]);
        self.first_row(req).await
    }

    async fn insert(&self, fields: &ClientFields) -> anyhow::Result<Client> {
        let req = self
            .rest
            .request(Method::POST, "clients")
            .header("Prefer", "return=representation")
            .json(&ClientWriteRow::from(fields));
        self.first_row(req)
            .await?
            .ok_or_else(|| anyhow::anyhow!("insert into clients returned no row"))
    }

    async fn update(&self, id: Uuid, fields: &ClientFields) -> anyhow::Result<Option<Client>> {
        let req = self
            .rest
            .request(Method::PATCH, "clients")
            .query(&[("id", query::eq(id))])
            .header("Prefer", "return=representation")
            .json(&ClientWriteRow::from(fields));
        self.first_row(req).await
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let req = self
            .rest
            .request(Method::DELETE, "clients")
            .query(&[("id", query::eq(id))])
            .header("Prefer", "return=representation");
        let rows: Vec<serde_json::Value> = self.rest.send(req).await?.json().await?;
        Ok(!rows.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn query_with(filter: ClientFilter) -> ClientQuery {
        ClientQuery {
            filter,
            sort: Default::default(),
            offset: 0,
            limit: 10,
        }
    }

    #[test]
    fn only_an_empty_id_set_skips_the_request() {
        assert!(matches_nothing(&query_with(ClientFilter::Ids(vec![]))));
        assert!(!matches_nothing(&query_with(ClientFilter::Ids(vec![Uuid::nil()]))));
        assert!(!matches_nothing(&query_with(ClientFilter::All)));
        assert!(!matches_nothing(&query_with(ClientFilter::Text("ana".into()))));
    }

    #[test]
    fn total_comes_from_content_range() {
        let mut headers = HeaderMap::new();
        assert_eq!(total_from_headers(&headers), None);
        headers.insert(CONTENT_RANGE, HeaderValue::from_static("0-9/42"));
        assert_eq!(total_from_headers(&headers), Some(42));
        headers.insert(CONTENT_RANGE, HeaderValue::from_static("*/0"));
        assert_eq!(total_from_headers(&headers), Some(0));
    }
}
