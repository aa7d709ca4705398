use uuid::Uuid;

use crate::application::ports::client_repository::ClientRepository;
use crate::application::use_cases::clients::error::ClientError;

pub struct DeleteClient<'a, R: ClientRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ClientRepository + ?Sized> DeleteClient<'a, R> {
    // Tag rows are never removed here; associations cascade in the store.
    pub async fn execute(&self, id: Uuid) -> Result<(), ClientError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(ClientError::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::clients::test_support::seed;
    use crate::infrastructure::memory::MemoryStore;

    #[tokio::test]
    async fn removes_associations_but_keeps_shared_tags() {
        let store = MemoryStore::new();
        let ana = seed(&store, "Ana", &["studio", "vip"]).await;
        let beto = seed(&store, "Beto", &["studio"]).await;

        DeleteClient { repo: &store }.execute(ana.id).await.unwrap();

        assert_eq!(store.association_count(ana.id).await, 0);
        assert_eq!(store.association_count(beto.id).await, 1);
        assert_eq!(store.tag_row_count("studio").await, 1);
        assert_eq!(store.tag_row_count("vip").await, 1);
        assert!(store.get_by_id(ana.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_twice_reports_not_found() {
        let store = MemoryStore::new();
        let ana = seed(&store, "Ana", &[]).await;
        let uc = DeleteClient { repo: &store };
        uc.execute(ana.id).await.unwrap();
        assert!(matches!(
            uc.execute(ana.id).await,
            Err(ClientError::NotFound(_))
        ));
    }
}
