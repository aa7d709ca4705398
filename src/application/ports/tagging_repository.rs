use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait TaggingRepository: Send + Sync {
    /// Insert-if-absent by name; returns `(name, id)` for every requested name.
    async fn upsert_tags(&self, names: &[String]) -> anyhow::Result<Vec<(String, i64)>>;
    async fn clear_client_tags(&self, client_id: Uuid) -> anyhow::Result<()>;
    async fn associate_client_tags(&self, client_id: Uuid, tag_ids: &[i64]) -> anyhow::Result<()>;
}
