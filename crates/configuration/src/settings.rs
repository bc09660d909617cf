use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every section is optional; omitted keys fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub ingest: IngestConfig,
    pub logging: LoggingConfig,
}

/// PostgreSQL connection parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// The analysis database. It is dropped and recreated on every run.
    pub name: String,
    /// The database we connect to while dropping and creating `name`.
    pub admin_database: String,
    /// Collation and character classification of the created database.
    /// Must be a UTF-8 locale for case-insensitive search over Cyrillic
    /// titles. Empty inherits the server default.
    pub locale: String,
    pub max_connections: u32,
}

/// Endpoints and request settings for the hh.ru API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Prefix the employer id is appended to.
    pub employers_url: String,
    pub vacancies_url: String,
    /// Page size of the vacancy search; hh.ru caps it at 100.
    pub per_page: u32,
    /// Request every page of the vacancy search instead of only the first.
    pub fetch_all_pages: bool,
    pub user_agent: String,
}

/// Which employers are ingested.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub employer_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.api.per_page) {
            return Err(ConfigError::ValidationError(format!(
                "api.per_page must be between 1 and 100, got {}",
                self.api.per_page
            )));
        }
        if self.ingest.employer_ids.is_empty() {
            return Err(ConfigError::ValidationError(
                "ingest.employer_ids must list at least one employer".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// --- Default Implementations ---
// These allow a user to run with an empty or missing config.toml.

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "course_work_5".to_string(),
            admin_database: "postgres".to_string(),
            locale: "C.UTF-8".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            employers_url: "https://api.hh.ru/employers/".to_string(),
            vacancies_url: "https://api.hh.ru/vacancies".to_string(),
            per_page: 100,
            fetch_all_pages: false,
            user_agent: "hh-analyst/0.1 (vacancy analytics)".to_string(),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        let employer_ids = [
            "5920492", "3643187", "5873504", "9498120", "6146301", "9895958", "593501",
            "3711736", "6157619", "10536354",
        ];
        Self {
            employer_ids: employer_ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
