use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::application::ports::client_repository::ClientRepository;
use crate::domain::clients::client::{
    Client, ClientFields, ClientFilter, ClientQuery, escape_like,
};
use crate::infrastructure::db::PgPool;

const CLIENT_COLUMNS: &str = "c.id, c.full_name, c.email, c.phone_number, c.address, \
     c.profile_picture_url, c.internal_notes, c.created_at";

const RETURNING: &str = "RETURNING id, full_name, email, phone_number, address, \
     profile_picture_url, internal_notes, created_at";

pub struct SqlxClientRepository {
    pub pool: PgPool,
}

impl SqlxClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_client(r: &PgRow, with_tags: bool) -> Client {
    Client {
        id: r.get("id"),
        full_name: r.get("full_name"),
        email: r.get("email"),
        phone_number: r.get("phone_number"),
        address: r.get("address"),
        profile_picture_url: r.get("profile_picture_url"),
        internal_notes: r.get("internal_notes"),
        registration_date: r.get("created_at"),
        tags: if with_tags { r.get("tags") } else { Vec::new() },
    }
}

fn select_with_tags<'a>() -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new("SELECT ");
    qb.push(CLIENT_COLUMNS);
    qb.push(
        r#", COALESCE(array_agg(t.name ORDER BY t.name) FILTER (WHERE t.name IS NOT NULL), '{}') AS tags
           FROM clients c
           LEFT JOIN client_tags ct ON ct.client_id = c.id
           LEFT JOIN tags t ON t.id = ct.tag_id"#,
    );
    qb
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ClientFilter) {
    match filter {
        ClientFilter::All => {}
        ClientFilter::Ids(ids) => {
            qb.push(" WHERE c.id = ANY(");
            qb.push_bind(ids.clone());
            qb.push(")");
        }
        ClientFilter::Text(text) => {
            let like = format!("%{}%", escape_like(text));
            qb.push(" WHERE (c.full_name ILIKE ");
            qb.push_bind(like.clone());
            qb.push(" OR c.email ILIKE ");
            qb.push_bind(like);
            qb.push(")");
        }
    }
}

#[async_trait]
impl ClientRepository for SqlxClientRepository {
    async fn find_ids_with_all_tags(&self, tag_names: &[String]) -> anyhow::Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT client_id FROM find_clients_with_all_tags($1)",
        )
        .bind(tag_names)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn query(&self, q: &ClientQuery) -> anyhow::Result<(Vec<Client>, Option<i64>)> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*)::BIGINT FROM clients c");
        push_filter(&mut count_qb, &q.filter);
        let total = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let dir = if q.sort.ascending() { "ASC" } else { "DESC" };
        let mut qb = select_with_tags();
        push_filter(&mut qb, &q.filter);
        // column comes from the SortField whitelist, never from user text
        qb.push(format!(
            " GROUP BY c.id ORDER BY c.{col} {dir}, c.id {dir} LIMIT ",
            col = q.sort.field.column()
        ));
        qb.push_bind(q.limit);
        qb.push(" OFFSET ");
        qb.push_bind(q.offset);
        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok((rows.iter().map(|r| map_client(r, true)).collect(), Some(total)))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>> {
        let mut qb = select_with_tags();
        qb.push(" WHERE c.id = ");
        qb.push_bind(id);
        qb.push(" GROUP BY c.id");
        let row = qb.build().fetch_optional(&self.pool).await?;
        Ok(row.map(|r| map_client(&r, true)))
    }

    async fn insert(&self, f: &ClientFields) -> anyhow::Result<Client> {
        let sql = format!(
            "INSERT INTO clients (full_name, email, phone_number, address, profile_picture_url, internal_notes) \
             VALUES ($1, $2, $3, $4, $5, $6) {RETURNING}"
        );
        let row = sqlx::query(&sql)
            .bind(&f.full_name)
            .bind(&f.email)
            .bind(&f.phone_number)
            .bind(&f.address)
            .bind(&f.profile_picture_url)
            .bind(&f.internal_notes)
            .fetch_one(&self.pool)
            .await?;
        Ok(map_client(&row, false))
    }

    async fn update(&self, id: Uuid, f: &ClientFields) -> anyhow::Result<Option<Client>> {
        let sql = format!(
            "UPDATE clients SET full_name = $1, email = $2, phone_number = $3, address = $4, \
             profile_picture_url = $5, internal_notes = $6 WHERE id = $7 {RETURNING}"
        );
        let row = sqlx::query(&sql)
            .bind(&f.full_name)
            .bind(&f.email)
            .bind(&f.phone_number)
            .bind(&f.address)
            .bind(&f.profile_picture_url)
            .bind(&f.internal_notes)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| map_client(&r, false)))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
