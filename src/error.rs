use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A descriptor or call argument has the wrong shape. Never suppressed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The engine rejected or failed to run a statement.
    #[error("SQLite Error: {0}")]
    Engine(#[from] rusqlite::Error),

    /// A named record (column, condition, config) could not be parsed.
    #[error("Record error: {0}")]
    Record(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    pub fn is_engine(&self) -> bool {
        matches!(self, Error::Engine(_))
    }
}

#[cfg(feature = "napi")]
pub fn to_napi_error(err: Error) -> napi::Error {
    napi::Error::from_reason(err.to_string())
}
