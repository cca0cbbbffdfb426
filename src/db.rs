//! Connection pool for the `schools` database.
//!
//! Every statement runs on a connection checked out of the pool; the pooled
//! handle returns the connection when it is dropped, whichever way the caller
//! leaves its scope.

use diesel_async::{
    pooled_connection::{
        deadpool::{BuildError, Object, Pool, PoolError},
        AsyncDieselConnectionManager,
    },
    AsyncMysqlConnection,
};

use crate::config::DatabaseConfig;

pub type DbPool = Pool<AsyncMysqlConnection>;
pub type DbConnection = Object<AsyncMysqlConnection>;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("failed to build connection pool: {0}")]
    Build(#[from] BuildError),

    #[error("failed to acquire database connection: {0}")]
    Connection(#[from] PoolError),

    #[error("failed to execute statement: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Builds the pool without opening any connection, the first checkout connects.
pub fn setup_pool(config: &DatabaseConfig) -> Result<DbPool, StorageError> {
    let manager = AsyncDieselConnectionManager::<AsyncMysqlConnection>::new(config.url());

    let pool = Pool::builder(manager)
        .max_size(config.max_connections)
        .build()?;

    Ok(pool)
}

pub async fn connection(pool: &DbPool) -> Result<DbConnection, StorageError> {
    let connection = pool.get().await.map_err(|err| {
        tracing::error!("failed to acquire database connection: {err}");
        err
    })?;

    Ok(connection)
}
