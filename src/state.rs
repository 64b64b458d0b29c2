use std::sync::Arc;

use schooldesk_config::{AppConfig, CorsConfig, JwtConfig, PasswordConfig};
use schooldesk_db::{
    FeesStore, LibraryStore, MemoryStore, PgPool, PgStore, StudentStore, UserStore,
};

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
    pub users: Arc<dyn UserStore>,
    pub students: Arc<dyn StudentStore>,
    pub fees: Arc<dyn FeesStore>,
    pub library: Arc<dyn LibraryStore>,
}

impl AppState {
    pub fn postgres(pool: PgPool, config: &AppConfig) -> Self {
        Self::with_store(
            Arc::new(PgStore::new(pool)),
            config.jwt.clone(),
            config.password,
            config.cors.clone(),
        )
    }

    /// State backed by a fresh [`MemoryStore`].
    pub fn in_memory(jwt_config: JwtConfig, password_config: PasswordConfig) -> Self {
        Self::with_store(
            Arc::new(MemoryStore::new()),
            jwt_config,
            password_config,
            CorsConfig::default(),
        )
    }

    fn with_store<S>(
        store: Arc<S>,
        jwt_config: JwtConfig,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
    ) -> Self
    where
        S: UserStore + StudentStore + FeesStore + LibraryStore + 'static,
    {
        Self {
            jwt_config,
            password_config,
            cors_config,
            users: store.clone(),
            students: store.clone(),
            fees: store.clone(),
            library: store,
        }
    }
}
