use async_trait::async_trait;
use reqwest::Method;
use uuid::Uuid;

use crate::application::ports::tagging_repository::TaggingRepository;
use crate::infrastructure::rest::RestClient;
use crate::infrastructure::rest::query;
use crate::infrastructure::rest::rows::{ClientTagRow, NewTagRow, TagRow};

pub struct RestTaggingRepository {
    pub rest: RestClient,
}

impl RestTaggingRepository {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl TaggingRepository for RestTaggingRepository {
    async fn upsert_tags(&self, names: &[String]) -> anyhow::Result<Vec<(String, i64)>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let body: Vec<NewTagRow> = names.iter().map(|n| NewTagRow { name: n }).collect();
        // merge-duplicates makes existing rows come back too, so every name gets an id
        let req = self
            .rest
            .request(Method::POST, "tags")
            .query(&[("on_conflict", "name")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&body);
        let rows: Vec<TagRow> = self.rest.send(req).await?.json().await?;
        Ok(rows.into_iter().map(|r| (r.name, r.id)).collect())
    }

    async fn clear_client_tags(&self, client_id: Uuid) -> anyhow::Result<()> {
        let req = self
            .rest
            .request(Method::DELETE, "client_tags")
            .query(&[("client_id", query::eq(client_id))]);
        self.rest.send(req).await?;
        Ok(())
    }

    async fn associate_client_tags(&self, client_id: Uuid, tag_ids: &[i64]) -> anyhow::Result<()> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        let body: Vec<ClientTagRow> = tag_ids
            .iter()
            .map(|tag_id| ClientTagRow {
                client_id,
                tag_id: *tag_id,
            })
            .collect();
        let req = self
            .rest
            .request(Method::POST, "client_tags")
            .header("Prefer", "return=minimal")
            .json(&body);
        self.rest.send(req).await?;
        Ok(())
    }
}
