use std::sync::Arc;

use tracing::info;

use crate::{
    config::AppConfig,
    db::{create_pool, orm_from_pool, run_migrations},
    middleware::origin::OriginConfig,
    repository::{SeaOrmStore, Store},
    seed::{is_fresh, seed},
    services::{FavoriteService, PropertyService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub properties: PropertyService,
    pub favorites: FavoriteService,
    pub origin: OriginConfig,
}

impl AppState {
    /// Wire every service to the same store.
    pub fn new(store: Arc<dyn Store>, config: &AppConfig) -> Self {
        Self {
            users: UserService::new(store.clone()),
            properties: PropertyService::new(store.clone(), config.property_defaults.clone()),
            favorites: FavoriteService::new(store),
            origin: OriginConfig {
                public_base_url: config.public_base_url.clone(),
                fallback_host: config.listen_authority(),
            },
        }
    }

    /// Open the database, migrate it and build the state.
    ///
    /// The seed set only goes into a store that has never held data, so rows
    /// deleted from a durable database stay deleted across restarts.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = create_pool(&config.database_url).await?;
        run_migrations(&pool).await?;
        if config.seed_on_start {
            if is_fresh(&pool).await? {
                seed(&pool).await?;
            } else {
                info!("store already holds data, skipping seed");
            }
        }
        let store = SeaOrmStore::new(orm_from_pool(pool));
        Ok(Self::new(Arc::new(store), config))
    }
}
