use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A required field was absent from an employer record.
    #[error("id not found (missing field `{field}`)")]
    IdNotFound { field: &'static str },
}
