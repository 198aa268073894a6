use engine::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("terminal error: {0}")]
    Terminal(String),
}

/// Why loading the income data failed.
///
/// Every variant is terminal for the current load: nothing is retried.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data could not be retrieved (non-success status, transport or
    /// file read failure).
    #[error("failed to fetch income data: {0}")]
    Fetch(String),
    /// The body is not a valid income document.
    #[error("invalid income data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid location: {0}")]
    InvalidLocation(String),
    #[error("income data has no dates")]
    EmptyDataset,
    #[error(transparent)]
    Data(EngineError),
}

impl From<EngineError> for LoadError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::EmptyDataset => Self::EmptyDataset,
            other => Self::Data(other),
        }
    }
}
