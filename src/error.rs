use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Invalid numeric format: {0}")]
    InvalidNumericFormat(String),

    #[error("Adding signatures to an account transaction is not supported")]
    UnsupportedSignature,

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Type mismatch for field '{field}' (expected {expected}): {reason}")]
    TypeMismatch {
        field: String,
        expected: String,
        reason: String,
    },

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Gateway error {code}: {message}")]
    Gateway { code: String, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl AccountError {
    pub(crate) fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AccountError::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AccountError>;
