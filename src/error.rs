//! Error types for sampling and rendering.

use thiserror::Error;

/// Errors raised when querying a counter source.
///
/// A tick that fails with this error mutates no state; the caller logs it
/// and the dashboard keeps serving the last successful sample.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Could not reach the backing store.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The store rejected or failed the query.
    #[error("query failed: {0}")]
    Query(String),

    /// The response could not be parsed.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The query did not complete in time.
    #[error("request timed out")]
    Timeout,
}

impl From<mongodb::error::Error> for SourceError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match &*err.kind {
            ErrorKind::ServerSelection { .. } => SourceError::Timeout,
            ErrorKind::Io(..) => SourceError::Connection(err.to_string()),
            ErrorKind::Authentication { .. } => SourceError::Connection(err.to_string()),
            _ => SourceError::Query(err.to_string()),
        }
    }
}

/// Errors raised while producing the chart.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The chart backend failed to draw or serialize.
    #[error("chart rendering failed: {0}")]
    Backend(String),
}
