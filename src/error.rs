use thiserror::Error;

/// Failure of a remote fetch. Cloneable so it can travel inside an [`Action`](crate::app::Action).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// No authenticated query client could be produced.
    #[error("could not create GitHub client: {0}")]
    Client(String),
    /// A named query was sent but failed at the transport or service level.
    #[error("{query} query failed: {message}")]
    Query { query: String, message: String },
}

impl FetchError {
    pub fn query(query: &str, message: impl Into<String>) -> Self {
        Self::Query {
            query: query.to_string(),
            message: message.into(),
        }
    }
}
