use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upstream fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Upstream decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("HTTP server error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, ExporterError>;
