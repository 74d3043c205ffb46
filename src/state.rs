use sqlx::PgPool;

use keygate_config::{CorsConfig, JwtConfig, StorageConfig, init_db_pool};
use keygate_core::file_storage::LocalFileStorage;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub storage: LocalFileStorage,
}

pub async fn init_app_state() -> AppState {
    let storage_config = StorageConfig::from_env();

    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        storage: LocalFileStorage::new(storage_config.upload_dir),
    }
}
