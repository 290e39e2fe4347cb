/// Errors that keep a request from producing a response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request failed or the response could not be read or decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured form action is not an absolute URL.
    #[error("invalid form action {action}: {reason}")]
    InvalidUrl {
        /// The rejected action.
        action: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The configured form method is not a valid HTTP method.
    #[error("invalid form method: {0}")]
    InvalidMethod(String),
}
