use database::{DbRepository, create_schema};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Executor, PgPool};
use std::str::FromStr;

/// Name of the variable pointing at a disposable Postgres database.
pub const TEST_DATABASE_URL: &str = "TEST_DATABASE_URL";

/// A repository whose tables live in a freshly created schema, so tests can
/// run side by side against one database.
pub struct TestDb {
    pub repo: DbRepository,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    /// Returns `None` (and the test should return early) when no test database is configured.
    pub async fn create() -> Option<Self> {
        let Ok(url) = std::env::var(TEST_DATABASE_URL) else {
            eprintln!("{TEST_DATABASE_URL} is not set; skipping database test");
            return None;
        };

        let schema = format!("test_{}", uuid::Uuid::new_v4().simple());
        let admin = PgPool::connect(&url).await.expect("connect to test database");
        admin
            .execute(format!("CREATE SCHEMA {schema}").as_str())
            .await
            .expect("create test schema");

        let options = PgConnectOptions::from_str(&url)
            .expect("parse test database url")
            .options([("search_path", schema.as_str())]);
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_with(options)
            .await
            .expect("connect with test schema");
        create_schema(&pool).await.expect("create tables");

        Some(Self {
            repo: DbRepository::new(pool),
            admin,
            schema,
        })
    }

    pub async fn cleanup(self) {
        self.repo.pool().close().await;
        let _ = self
            .admin
            .execute(format!("DROP SCHEMA {} CASCADE", self.schema).as_str())
            .await;
    }
}
