use crate::connection::connect_single;
use crate::error::DbError;
use configuration::DatabaseConfig;
use sqlx::{Connection, Executor, PgPool};

/// Postgres truncates identifiers beyond this many bytes.
const MAX_IDENTIFIER_LEN: usize = 63;

const CREATE_EMPLOYERS: &str = r#"
    CREATE TABLE employers (
        employer_id SERIAL PRIMARY KEY,
        employer_name VARCHAR(255),
        employer_vacancies INTEGER,
        employer_url TEXT
    )
"#;

const CREATE_VACANCIES: &str = r#"
    CREATE TABLE vacancies (
        vacancy_id SERIAL PRIMARY KEY,
        employer_id INT REFERENCES employers(employer_id),
        vacancy_name TEXT,
        salary_from INTEGER,
        salary_to INTEGER,
        currency VARCHAR(10),
        vacancy_url TEXT
    )
"#;

/// Drops and recreates the database `name`, then creates its tables.
///
/// Any existing data under that name is lost. The drop and create run on a
/// connection to `config.admin_database`; the tables are created on a fresh
/// connection to the new database.
///
/// The database is created from `template0` with UTF-8 encoding and
/// `config.locale`, so `LOWER` in the keyword report folds Cyrillic as well
/// as Latin letters even when the server itself runs under the `C` locale.
pub async fn create_database(name: &str, config: &DatabaseConfig) -> Result<(), DbError> {
    let create = create_database_sql(name, &config.locale)?;

    let mut admin = connect_single(config, &config.admin_database).await?;
    tracing::warn!(database = name, "Dropping and recreating database.");
    admin
        .execute(format!(r#"DROP DATABASE IF EXISTS "{}""#, name).as_str())
        .await?;
    admin.execute(create.as_str()).await?;
    admin.close().await?;

    let mut conn = connect_single(config, name).await?;
    conn.execute(CREATE_EMPLOYERS).await?;
    conn.execute(CREATE_VACANCIES).await?;
    conn.close().await?;

    tracing::info!(database = name, "Database schema created.");
    Ok(())
}

/// Creates the `employers` and `vacancies` tables in an existing database.
pub async fn create_schema(pool: &PgPool) -> Result<(), DbError> {
    pool.execute(CREATE_EMPLOYERS).await?;
    pool.execute(CREATE_VACANCIES).await?;
    Ok(())
}

/// The `CREATE DATABASE` statement for `name`. An empty `locale` inherits
/// the encoding and locale of the server's default template.
pub fn create_database_sql(name: &str, locale: &str) -> Result<String, DbError> {
    validate_database_name(name)?;
    if locale.is_empty() {
        return Ok(format!(r#"CREATE DATABASE "{}""#, name));
    }
    validate_locale(locale)?;
    Ok(format!(
        r#"CREATE DATABASE "{name}" TEMPLATE template0 ENCODING 'UTF8' LC_COLLATE '{locale}' LC_CTYPE '{locale}'"#
    ))
}

/// Locale names are spliced into DDL as string literals.
fn validate_locale(locale: &str) -> Result<(), DbError> {
    let valid = locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '@'));
    if valid && locale.len() <= MAX_IDENTIFIER_LEN {
        Ok(())
    } else {
        Err(DbError::InvalidLocale(locale.to_string()))
    }
}

/// Database names are spliced into DDL (they cannot be bound), so only
/// plain identifiers are accepted.
pub fn validate_database_name(name: &str) -> Result<(), DbError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest && name.len() <= MAX_IDENTIFIER_LEN {
        Ok(())
    } else {
        Err(DbError::InvalidDatabaseName(name.to_string()))
    }
}
