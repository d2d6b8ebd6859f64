use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ProvisionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Object storage error: {0}")]
    Storage(String),

    #[error("cannot resolve the sql directory next to the executable")]
    SqlDirUnresolved,

    #[error("{failed} of {total} schema scripts failed")]
    PartialFailure { failed: usize, total: usize },
}

impl ProvisionError {
    /// Wrap any storage-client error, keeping its full source chain in the message.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        ProvisionError::Storage(err.to_string())
    }
}
