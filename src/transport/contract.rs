use serde::{Deserialize, Serialize};

use super::{SubmitReply, TransportError};

/// Body the plain-text backend sends on success.
const OK_BODY: &str = "OK";
/// Body the plain-text backend sends when the category already has a report
/// for the current period.
const ALREADY_EXISTS_BODY: &str = "ALREADY_EXISTS";

/// How the backend signals the result of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseContract {
    /// Success is any 2xx status.
    JsonAck,
    /// Success is the literal body `OK`; `ALREADY_EXISTS` is a conflict.
    #[default]
    PlainText,
}

/// Interpreted result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The report was accepted.
    Success,
    /// A report for this category already exists this period.
    Conflict,
    /// The backend refused; carries the body when it is worth showing.
    Rejected(Option<String>),
    /// The request never completed.
    NetworkFailure,
}

impl ResponseContract {
    /// `Accept` header sent with submissions.
    pub fn accept(self) -> &'static str {
        match self {
            Self::JsonAck => "application/json",
            Self::PlainText => "text/plain",
        }
    }

    /// Maps a transport result onto an outcome.
    pub fn outcome(self, result: &Result<SubmitReply, TransportError>) -> SubmitOutcome {
        let Ok(reply) = result else {
            return SubmitOutcome::NetworkFailure;
        };
        match self {
            Self::JsonAck if reply.is_success() => SubmitOutcome::Success,
            Self::JsonAck => SubmitOutcome::Rejected(None),
            // Surrounding whitespace is ignored for matching only.
            Self::PlainText => match reply.body.trim() {
                OK_BODY => SubmitOutcome::Success,
                ALREADY_EXISTS_BODY => SubmitOutcome::Conflict,
                _ => SubmitOutcome::Rejected(Some(reply.body.clone())),
            },
        }
    }
}
