use sigscope_api::ApiError;
use sigscope_java::inference::ConventionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SigscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Convention error: {0}")]
    Conventions(#[from] ConventionError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, SigscopeError>;
