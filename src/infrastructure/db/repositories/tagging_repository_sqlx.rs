use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::tagging_repository::TaggingRepository;
use crate::infrastructure::db::PgPool;

pub struct SqlxTaggingRepository {
    pub pool: PgPool,
}

impl SqlxTaggingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaggingRepository for SqlxTaggingRepository {
    async fn upsert_tags(&self, names: &[String]) -> anyhow::Result<Vec<(String, i64)>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        // DO UPDATE (not DO NOTHING) so existing rows are returned as well
        let rows = sqlx::query(
            "INSERT INTO tags(name) SELECT UNNEST($1::text[]) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING id, name",
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| (r.get("name"), r.get("id")))
            .collect())
    }

    async fn clear_client_tags(&self, client_id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM client_tags WHERE client_id = $1")
            .bind(client_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn associate_client_tags(&self, client_id: Uuid, tag_ids: &[i64]) -> anyhow::Result<()> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        sqlx::query("INSERT INTO client_tags(client_id, tag_id) SELECT $1, UNNEST($2::bigint[])")
            .bind(client_id)
            .bind(tag_ids)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
