use thiserror::Error;

/// Boxed source error carried by store failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the retrieval layer.
///
/// "Not found" is never an error: retrieval reports it as a zero row count.
#[derive(Debug, Error)]
pub enum Error {
    /// A required constructor or call argument was missing or empty.
    #[error("Invalid argument: '{parameter}' is required")]
    InvalidArgument { parameter: &'static str },

    /// The backing store could not be reached.
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The named table or column does not exist in the backing store.
    #[error("Schema error: {message}")]
    Schema { message: String },
}

impl Error {
    pub fn invalid_argument(parameter: &'static str) -> Self {
        Self::InvalidArgument { parameter }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn connection_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Connection {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Name of the missing parameter, if this is an `InvalidArgument`.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { parameter } => Some(*parameter),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fail with `InvalidArgument` when `value` is empty.
pub fn require(value: &str, parameter: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_argument(parameter));
    }
    Ok(())
}
