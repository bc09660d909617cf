use api_client::error::ApiError;
use database::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Fetching from the job board failed: {0}")]
    Api(#[from] ApiError),

    #[error("Storing the data failed: {0}")]
    Database(#[from] DbError),

    #[error("Invalid progress bar template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}
