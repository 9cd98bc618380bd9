//! Mapping of rusqlite failures onto the retrieval error taxonomy.

use cinedex_core::Error;
use rusqlite::ErrorCode;

/// Classify a rusqlite error as a connection or a schema problem.
///
/// Missing tables/columns and other statement errors are schema errors;
/// anything about reaching or reading the database file is a connection
/// error.
pub fn classify(err: rusqlite::Error) -> Error {
    let (code, message) = match &err {
        rusqlite::Error::SqliteFailure(e, msg) => (
            Some(e.code),
            msg.clone().unwrap_or_else(|| e.to_string()),
        ),
        other => (None, other.to_string()),
    };

    if message.starts_with("no such table") || message.starts_with("no such column") {
        return Error::schema(message);
    }

    match code {
        Some(ErrorCode::Unknown) => Error::schema(message),
        _ => Error::connection_with(message, err),
    }
}
