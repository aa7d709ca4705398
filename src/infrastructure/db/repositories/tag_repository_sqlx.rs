use async_trait::async_trait;

use crate::application::ports::tag_repository::TagRepository;
use crate::infrastructure::db::PgPool;

pub struct SqlxTagRepository {
    pub pool: PgPool,
}

impl SqlxTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepository {
    async fn list_names(&self) -> anyhow::Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>("SELECT name FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM tags")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}
