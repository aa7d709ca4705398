use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::clients::client::{Client, ClientFields, ClientQuery};

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Ids of clients carrying every one of `tag_names` (intersection, not union).
    async fn find_ids_with_all_tags(&self, tag_names: &[String]) -> anyhow::Result<Vec<Uuid>>;

    /// One page of clients plus the exact total matching `query.filter`, if the store reported one.
    async fn query(&self, query: &ClientQuery) -> anyhow::Result<(Vec<Client>, Option<i64>)>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>>;

    /// Inserts the scalar fields; the returned client carries no tags yet.
    async fn insert(&self, fields: &ClientFields) -> anyhow::Result<Client>;

    // None when no row has this id
    async fn update(&self, id: Uuid, fields: &ClientFields) -> anyhow::Result<Option<Client>>;

    // false when no row has this id; association rows cascade in the store
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
