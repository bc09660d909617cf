use crate::error::DbError;
use configuration::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgConnection, PgPool};
use std::time::Duration;

/// Builds the connect options for `database` on the configured server.
pub fn connect_options(config: &DatabaseConfig, database: &str) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(database)
}

/// Establishes a connection pool to the analysis database (`config.name`).
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options(config, &config.name))
        .await?;

    Ok(pool)
}

/// Opens a single, unpooled connection to `database`.
pub async fn connect_single(config: &DatabaseConfig, database: &str) -> Result<PgConnection, DbError> {
    let conn = PgConnection::connect_with(&connect_options(config, database)).await?;
    Ok(conn)
}
