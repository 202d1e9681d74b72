use thiserror::Error;
use tilemorph_data::DataError;
use tilemorph_runtime::{ConfigError, SceneError};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    /// Process exit code: 2 for bad input, 1 for runtime failures.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } | Self::Config(_) | Self::Data(_) => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
