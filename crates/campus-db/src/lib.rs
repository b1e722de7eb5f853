//! # Campus DB
//!
//! Database pool construction and the generic table accessor used by the
//! Campus API services.
//!
//! - [`accessor`]: [`TableAccessor`], a find/create/update/delete helper
//!   parameterized by a row type and a [`TableSpec`]
//! - [`tables`]: the table specs for every entity
//!
//! # Example
//!
//! ```ignore
//! use campus_db::{init_db_pool, tables, FieldValue, TableAccessor};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! let courses = TableAccessor::<Course>::new(&tables::COURSES);
//! let course = courses.find_one(&pool, &[("id", FieldValue::Int(1))]).await?;
//! ```

pub mod accessor;
pub mod tables;

use campus_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use accessor::{AccessorError, FieldValue, TableAccessor, TableSpec};
pub use sqlx::PgPool;

/// Opens the process-wide connection pool.
///
/// Call once at startup and hand the pool to the application state; every
/// component borrows connections from it per query.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.connection_url())
        .await?;

    info!(
        host = %config.host,
        database = %config.name,
        max_connections = config.max_connections,
        "Database pool ready"
    );

    Ok(pool)
}
