use crate::application::ports::client_repository::ClientRepository;
use crate::application::ports::tagging_repository::TaggingRepository;
use crate::application::services::tagging;
use crate::application::use_cases::clients::error::ClientError;
use crate::domain::clients::client::{Client, ClientDraft};

pub struct CreateClient<'a, R, T>
where
    R: ClientRepository + ?Sized,
    T: TaggingRepository + ?Sized,
{
    pub repo: &'a R,
    pub tagging: &'a T,
}

impl<'a, R, T> CreateClient<'a, R, T>
where
    R: ClientRepository + ?Sized,
    T: TaggingRepository + ?Sized,
{
    pub async fn execute(&self, draft: &ClientDraft) -> Result<Client, ClientError> {
        draft.validate().map_err(ClientError::Validation)?;
        let tags = draft.tag_names();
        let fields = draft.fields.normalized();
        let mut client = self.repo.insert(&fields).await?;
        // Not atomic: the row above is already committed if linking fails.
        tagging::link_client_tags(self.tagging, client.id, &tags)
            .await
            .inspect_err(|e| {
                tracing::warn!(client_id = %client.id, error = ?e, "client_tags_link_failed");
            })?;
        client.tags = tags;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::client_repository::ClientRepository;
    use crate::application::use_cases::clients::get_client::GetClient;
    use crate::application::use_cases::clients::list_clients::ListClients;
    use crate::application::use_cases::clients::test_support::{FailingLinkTagging, draft, seed};
    use crate::domain::clients::client::ListClientsParams;
    use crate::infrastructure::memory::MemoryStore;

    #[tokio::test]
    async fn created_client_reads_back_with_its_tags() {
        let store = MemoryStore::new();
        let uc = CreateClient {
            repo: &store,
            tagging: &store,
        };
        let created = uc.execute(&draft("Ana", &["vip"])).await.unwrap();
        assert_eq!(created.tags, vec!["vip"]);

        let fetched = GetClient { repo: &store }.execute(created.id).await.unwrap();
        assert_eq!(fetched.tags, vec!["vip"]);
        assert_eq!(fetched.full_name, "Ana");
    }

    #[tokio::test]
    async fn shared_tags_are_upserted_once() {
        let store = MemoryStore::new();
        let a = seed(&store, "Ana", &["studio", "wedding"]).await;
        let b = seed(&store, "Beto", &["studio", "wedding"]).await;
        assert_eq!(store.tag_row_count("studio").await, 1);
        assert_eq!(store.tag_row_count("wedding").await, 1);
        assert_eq!(store.association_count(a.id).await, 2);
        assert_eq!(store.association_count(b.id).await, 2);
    }

    #[tokio::test]
    async fn duplicate_names_link_once() {
        let store = MemoryStore::new();
        let c = seed(&store, "Ana", &["vip", " vip", "vip"]).await;
        assert_eq!(c.tags, vec!["vip"]);
        assert_eq!(store.association_count(c.id).await, 1);
    }

    #[tokio::test]
    async fn invalid_draft_writes_nothing() {
        let store = MemoryStore::new();
        let uc = CreateClient {
            repo: &store,
            tagging: &store,
        };
        let mut bad = draft("Ana", &["vip"]);
        bad.fields.email = "not-an-email".into();
        assert!(matches!(
            uc.execute(&bad).await,
            Err(ClientError::Validation(_))
        ));
        let (rows, total) = store
            .query(&crate::domain::clients::client::ClientQuery {
                filter: crate::domain::clients::client::ClientFilter::All,
                sort: Default::default(),
                offset: 0,
                limit: 10,
            })
            .await
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(total, Some(0));
        assert_eq!(store.tag_row_count("vip").await, 0);
    }

    #[tokio::test]
    async fn padded_fields_are_stored_trimmed() {
        let store = MemoryStore::new();
        seed(&store, "Ana", &[]).await;
        let uc = CreateClient {
            repo: &store,
            tagging: &store,
        };
        let mut d = draft("Zoe", &[]);
        d.fields.full_name = "  Zoe ".into();
        d.fields.email = " zoe@example.com ".into();
        d.fields.address = " Rua 1 ".into();
        let created = uc.execute(&d).await.unwrap();
        assert_eq!(created.full_name, "Zoe");

        let fetched = GetClient { repo: &store }.execute(created.id).await.unwrap();
        assert_eq!(fetched.full_name, "Zoe");
        assert_eq!(fetched.email, "zoe@example.com");
        assert_eq!(fetched.address, "Rua 1");

        let page = ListClients { repo: &store }
            .execute(&ListClientsParams::default())
            .await
            .unwrap();
        let names: Vec<_> = page.content.iter().map(|c| c.full_name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Zoe"]);
    }

    #[tokio::test]
    async fn link_failure_leaves_client_without_tags() {
        let store = MemoryStore::new();
        let uc = CreateClient {
            repo: &store,
            tagging: &FailingLinkTagging,
        };
        let err = uc.execute(&draft("Ana", &["vip"])).await.unwrap_err();
        assert!(matches!(err, ClientError::Store(_)));

        let (rows, _) = store
            .query(&crate::domain::clients::client::ClientQuery {
                filter: crate::domain::clients::client::ClientFilter::All,
                sort: Default::default(),
                offset: 0,
                limit: 10,
            })
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].tags.is_empty());
    }
}
