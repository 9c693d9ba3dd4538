use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Unknown parameter field: {0}")]
    UnknownField(String),

    #[error("Explanation service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Explanation request cancelled")]
    Cancelled,

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LabError>;
