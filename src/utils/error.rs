use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrollError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Prompt error: {0}")]
    PromptError(#[from] dialoguer::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Registration rejected by server: {message}")]
    SubmissionRejected { message: String },
}

pub type Result<T> = std::result::Result<T, EnrollError>;
