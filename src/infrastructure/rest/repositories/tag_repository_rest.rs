use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::CONTENT_RANGE;

use crate::application::ports::tag_repository::TagRepository;
use crate::infrastructure::rest::RestClient;
use crate::infrastructure::rest::query;
use crate::infrastructure::rest::rows::TagNameRow;

pub struct RestTagRepository {
    pub rest: RestClient,
}

impl RestTagRepository {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl TagRepository for RestTagRepository {
    async fn list_names(&self) -> anyhow::Result<Vec<String>> {
        let req = self
            .rest
            .request(Method::GET, "tags")
            .query(&[("select", "name"), ("order", "name.asc")]);
        let rows: Vec<TagNameRow> = self.rest.send(req).await?.json().await?;
        Ok(rows.into_iter().map(|r| r.name).collect())
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let req = self
            .rest
            .request(Method::HEAD, "tags")
            .query(&[("select", "id")])
            .header("Prefer", "count=exact");
        let resp = self.rest.send(req).await?;
        resp.headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(query::content_range_total)
            .ok_or_else(|| anyhow::anyhow!("store did not report a tag count"))
    }
}
