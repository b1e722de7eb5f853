use campus_config::{CorsConfig, DatabaseConfig, JwtConfig, PasswordConfig};
use campus_db::init_db_pool;
use sqlx::PgPool;

use crate::realtime::NotificationHub;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub password_config: PasswordConfig,
    pub notifications: NotificationHub,
}

pub async fn init_app_state() -> Result<AppState, sqlx::Error> {
    let db = init_db_pool(&DatabaseConfig::from_env()).await?;

    Ok(AppState {
        db,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        password_config: PasswordConfig::from_env(),
        notifications: NotificationHub::new(),
    })
}
