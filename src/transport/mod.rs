//! Report submission and status queries over HTTP.
//!
//! [`ReportTransport`] is the seam between the controller's commands and the
//! network; [`HttpTransport`] is the reqwest implementation.

mod contract;
mod error;
mod http;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

pub use contract::{ResponseContract, SubmitOutcome};
pub use error::TransportError;
pub use http::{HttpTransport, STATUS_QUERY, status_address};

/// A snapshot of the form ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Target address (the form action).
    pub action: String,
    /// HTTP method (the form method).
    pub method: String,
    /// `Accept` header value.
    pub accept: &'static str,
    /// Field name/value pairs, sent as multipart text parts.
    pub fields: Vec<(String, String)>,
}

/// What the backend answered to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl SubmitReply {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Categories already reported this period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Category identifiers.
    #[serde(default)]
    pub amts: Vec<String>,
}

/// Sends submissions and status queries.
///
/// Returned futures own everything they need so they can be spawned.
pub trait ReportTransport: Send + Sync {
    /// Sends the form data to its action.
    fn submit(&self, request: SubmitRequest)
    -> BoxFuture<'static, Result<SubmitReply, TransportError>>;

    /// Asks the backend which categories were already reported, using the
    /// status address derived from `action`.
    fn fetch_status(&self, action: String)
    -> BoxFuture<'static, Result<StatusReport, TransportError>>;
}
