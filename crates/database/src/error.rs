use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database operation failed: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Invalid database name `{0}`: expected letters, digits and underscores")]
    InvalidDatabaseName(String),

    #[error("Invalid locale `{0}`: expected a name such as `C.UTF-8`")]
    InvalidLocale(String),
}
