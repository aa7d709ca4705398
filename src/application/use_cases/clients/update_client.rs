use uuid::Uuid;

use crate::application::ports::client_repository::ClientRepository;
use crate::application::ports::tagging_repository::TaggingRepository;
use crate::application::services::tagging;
use crate::application::use_cases::clients::error::ClientError;
use crate::domain::clients::client::{Client, ClientDraft};

pub struct UpdateClient<'a, R, T>
where
    R: ClientRepository + ?Sized,
    T: TaggingRepository + ?Sized,
{
    pub repo: &'a R,
    pub tagging: &'a T,
}

impl<'a, R, T> UpdateClient<'a, R, T>
where
    R: ClientRepository + ?Sized,
    T: TaggingRepository + ?Sized,
{
    /// Replaces every scalar field and the whole tag set of the client.
    pub async fn execute(&self, id: Uuid, draft: &ClientDraft) -> Result<Client, ClientError> {
        draft.validate().map_err(ClientError::Validation)?;
        let tags = draft.tag_names();
        let mut client = self
            .repo
            .update(id, &draft.fields.normalized())
            .await?
            .ok_or(ClientError::NotFound(id))?;
        // Clear-then-link runs as separate commits; a concurrent update may interleave.
        tagging::replace_client_tags(self.tagging, id, &tags)
            .await
            .inspect_err(|e| {
                tracing::warn!(client_id = %id, error = ?e, "client_tags_replace_failed");
            })?;
        client.tags = tags;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::clients::get_client::GetClient;
    use crate::application::use_cases::clients::test_support::{draft, seed};
    use crate::infrastructure::memory::MemoryStore;

    #[tokio::test]
    async fn replaces_fields_and_tags() {
        let store = MemoryStore::new();
        let c = seed(&store, "Ana", &["studio", "wedding"]).await;
        let uc = UpdateClient {
            repo: &store,
            tagging: &store,
        };
        let mut d = draft("Ana Maria", &["wedding", "vip"]);
        d.fields.full_name = " Ana Maria  ".into();
        d.fields.internal_notes = "prefers mornings\n".into();
        uc.execute(c.id, &d).await.unwrap();

        let fetched = GetClient { repo: &store }.execute(c.id).await.unwrap();
        assert_eq!(fetched.full_name, "Ana Maria");
        assert_eq!(fetched.internal_notes, "prefers mornings");
        assert_eq!(fetched.registration_date, c.registration_date);
        let mut tags = fetched.tags.clone();
        tags.sort();
        assert_eq!(tags, vec!["vip", "wedding"]);
    }

    #[tokio::test]
    async fn empty_tag_list_clears_associations() {
        let store = MemoryStore::new();
        let c = seed(&store, "Ana", &["studio", "wedding"]).await;
        let uc = UpdateClient {
            repo: &store,
            tagging: &store,
        };
        let updated = uc.execute(c.id, &draft("Ana", &[])).await.unwrap();
        assert!(updated.tags.is_empty());
        assert_eq!(store.association_count(c.id).await, 0);
        // orphaned tags stay in the directory
        assert_eq!(store.tag_row_count("studio").await, 1);
    }

    #[tokio::test]
    async fn missing_client_is_not_found_and_touches_no_tags() {
        let store = MemoryStore::new();
        let uc = UpdateClient {
            repo: &store,
            tagging: &store,
        };
        let id = Uuid::new_v4();
        let err = uc.execute(id, &draft("Ghost", &["vip"])).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(missing) if missing == id));
        assert_eq!(store.tag_row_count("vip").await, 0);
    }
}
