use uuid::Uuid;

use crate::application::ports::client_repository::ClientRepository;
use crate::application::use_cases::clients::error::ClientError;
use crate::domain::clients::client::Client;

pub struct GetClient<'a, R: ClientRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ClientRepository + ?Sized> GetClient<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<Client, ClientError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(ClientError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::MemoryStore;

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let uc = GetClient { repo: &store };
        let id = Uuid::new_v4();
        match uc.execute(id).await {
            Err(ClientError::NotFound(missing)) => assert_eq!(missing, id),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
