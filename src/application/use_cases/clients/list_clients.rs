use crate::application::ports::client_repository::ClientRepository;
use crate::application::use_cases::clients::error::ClientError;
use crate::domain::clients::client::{
    Client, ClientFilter, ClientQuery, ListClientsParams, Page, normalize_tag_names,
};

pub struct ListClients<'a, R: ClientRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ClientRepository + ?Sized> ListClients<'a, R> {
    pub async fn execute(&self, params: &ListClientsParams) -> Result<Page<Client>, ClientError> {
        if params.size == 0 {
            return Err(ClientError::invalid("size", "page size must be greater than zero"));
        }
        let filter = self.resolve_filter(params).await?;
        let (from, to) = params.range();
        let query = ClientQuery {
            filter,
            sort: params.sort,
            offset: from,
            limit: to - from + 1,
        };
        let (rows, total) = self.repo.query(&query).await?;
        Ok(Page::new(rows, total, params.page, params.size))
    }

    // Tag filter wins over text search; the two are never combined.
    async fn resolve_filter(&self, params: &ListClientsParams) -> anyhow::Result<ClientFilter> {
        let tags = normalize_tag_names(&params.tags);
        if !tags.is_empty() {
            let ids = self.repo.find_ids_with_all_tags(&tags).await?;
            return Ok(ClientFilter::Ids(ids));
        }
        let q = params.query.trim();
        if !q.is_empty() {
            return Ok(ClientFilter::Text(q.to_string()));
        }
        Ok(ClientFilter::All)
    }
}
