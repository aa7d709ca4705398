use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::client_repository::ClientRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::tagging_repository::TaggingRepository;
use crate::bootstrap::config::{Config, StoreBackend};
use crate::infrastructure::db;
use crate::infrastructure::db::repositories::client_repository_sqlx::SqlxClientRepository;
use crate::infrastructure::db::repositories::tag_repository_sqlx::SqlxTagRepository;
use crate::infrastructure::db::repositories::tagging_repository_sqlx::SqlxTaggingRepository;
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::rest::RestClient;
use crate::infrastructure::rest::repositories::client_repository_rest::RestClientRepository;
use crate::infrastructure::rest::repositories::tag_repository_rest::RestTagRepository;
use crate::infrastructure::rest::repositories::tagging_repository_rest::RestTaggingRepository;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    client_repo: Arc<dyn ClientRepository>,
    tag_repo: Arc<dyn TagRepository>,
    tagging_repo: Arc<dyn TaggingRepository>,
}

impl AppServices {
    pub fn new(
        client_repo: Arc<dyn ClientRepository>,
        tag_repo: Arc<dyn TagRepository>,
        tagging_repo: Arc<dyn TaggingRepository>,
    ) -> Self {
        Self {
            client_repo,
            tag_repo,
            tagging_repo,
        }
    }

    /// All three ports served by one in-process store.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store.clone(), store)
    }

    /// Wires the ports for the configured backend.
    pub async fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(cfg.request_timeout_secs);
        match cfg.store_backend {
            StoreBackend::Rest => {
                let (Some(url), Some(key)) = (cfg.supabase_url.as_deref(), cfg.supabase_key.as_deref())
                else {
                    anyhow::bail!("rest backend requires SUPABASE_URL and SUPABASE_KEY");
                };
                let rest = RestClient::new(url, key, timeout)?;
                tracing::info!(%url, "store_backend_rest");
                Ok(Self::new(
                    Arc::new(RestClientRepository::new(rest.clone())),
                    Arc::new(RestTagRepository::new(rest.clone())),
                    Arc::new(RestTaggingRepository::new(rest)),
                ))
            }
            StoreBackend::Postgres => {
                let pool =
                    db::connect_pool(&cfg.database_url, cfg.db_max_connections, timeout).await?;
                if cfg.run_migrations {
                    db::migrate(&pool).await?;
                }
                tracing::info!("store_backend_postgres");
                Ok(Self::new(
                    Arc::new(SqlxClientRepository::new(pool.clone())),
                    Arc::new(SqlxTagRepository::new(pool.clone())),
                    Arc::new(SqlxTaggingRepository::new(pool)),
                ))
            }
            StoreBackend::Memory => {
                tracing::warn!("store_backend_memory: data is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn client_repo(&self) -> Arc<dyn ClientRepository> {
        self.services.client_repo.clone()
    }

    pub fn tag_repo(&self) -> Arc<dyn TagRepository> {
        self.services.tag_repo.clone()
    }

    pub fn tagging_repo(&self) -> Arc<dyn TaggingRepository> {
        self.services.tagging_repo.clone()
    }
}
