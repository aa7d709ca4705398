use async_trait::async_trait;

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn list_names(&self) -> anyhow::Result<Vec<String>>;
    async fn count(&self) -> anyhow::Result<i64>;
}
