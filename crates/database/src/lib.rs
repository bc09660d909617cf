//! # Database Crate
//!
//! This crate is the application-specific interface to PostgreSQL. It owns
//! the schema, the inserts the ingestion pipeline performs, and the five
//! read-only reports shown by the menu.
//!
//! ## Public API
//!
//! - `connect`: establishes the connection pool to the analysis database.
//! - `create_database`: drops and recreates the analysis database and its tables.
//! - `DbRepository`: holds the pool and provides the inserts and reports.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod bootstrap;
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use bootstrap::{create_database, create_schema};
pub use connection::{connect, connect_options};
pub use error::DbError;
pub use repository::{CompanyVacancyCount, DbRepository, VacancyListing};
