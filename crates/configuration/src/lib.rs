use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ApiConfig, Config, DatabaseConfig, IngestConfig, LoggingConfig};

/// Prefix of the environment variables that override file settings,
/// e.g. `HH__DATABASE__PASSWORD`.
pub const ENV_PREFIX: &str = "HH";

/// Loads the application configuration.
///
/// Sources are layered in order: a `.env` file (if any) is exported into the
/// process environment, then the TOML file at `path` is read (it may be
/// absent), then `HH__*` environment variables override individual keys.
/// The merged result is deserialized into our strongly-typed `Config` and
/// validated.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded.");
    }

    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("ingest.employer_ids")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
