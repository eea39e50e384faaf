use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinstatError {
    #[error("Unknown {statement} path: {path}")]
    UnknownPath {
        statement: &'static str,
        path: String,
    },

    #[error("Unknown internal note key: {0}")]
    UnknownNoteKey(String),

    #[error("No company with id: {0}")]
    UnknownCompany(String),

    #[error("Company id already in use: {0}")]
    DuplicateCompany(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FinstatError>;
