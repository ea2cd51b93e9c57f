use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilmGrainError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty source file: {0}")]
    EmptySource(String),

    #[error("Unsupported source type: {0}")]
    UnsupportedSource(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with status {status}")]
    ServerStatus { status: u16 },

    #[error("Server returned an empty image")]
    EmptyResponse,

    #[error("Health check failed: {0}")]
    Unhealthy(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config encode error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, FilmGrainError>;
