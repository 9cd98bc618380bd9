use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Retrieval from the catalog database failed
    #[error("Database error: {0}")]
    Database(#[from] cinedex_core::Error),

    /// The requested row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The database does not match the built-in kinds
    #[error("Schema check failed: {0}")]
    SchemaCheck(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Output serialization failed
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub(crate) fn schema_check(msg: impl Into<String>) -> Self {
        Self::SchemaCheck(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
