use core_types::CoreError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),

    #[error("The API request returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error(transparent)]
    Lookup(#[from] CoreError),
}
