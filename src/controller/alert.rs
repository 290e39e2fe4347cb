use crate::transport::SubmitOutcome;

const REJECTED_MESSAGE: &str = "Es gab ein Problem beim Senden des Formulars.";
const NETWORK_MESSAGE: &str = "Verbindung fehlgeschlagen. Bitte später erneut versuchen.";
const CONFLICT_MESSAGE: &str = "Für dieses Amt wurde in diesem Monat bereits ein Bericht abgegeben. \
    Bitte nicht erneut senden. Für Korrekturen wenden Sie sich bitte an den Administrator.";

/// Why a submission alert is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// The category already has a report this period.
    Conflict,
    /// The backend refused the submission.
    Rejected,
    /// The request never completed.
    Network,
}

/// A blocking message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// What went wrong.
    pub kind: AlertKind,
    /// Text shown to the user.
    pub message: String,
}

impl Alert {
    /// The alert for a submission outcome; `None` for success.
    pub fn for_outcome(outcome: &SubmitOutcome) -> Option<Self> {
        let (kind, message) = match outcome {
            SubmitOutcome::Success => return None,
            SubmitOutcome::Conflict => (AlertKind::Conflict, CONFLICT_MESSAGE.to_string()),
            SubmitOutcome::Rejected(None) => (AlertKind::Rejected, REJECTED_MESSAGE.to_string()),
            SubmitOutcome::Rejected(Some(body)) => (
                AlertKind::Rejected,
                format!("Unerwartete Antwort vom Server: {body}"),
            ),
            SubmitOutcome::NetworkFailure => (AlertKind::Network, NETWORK_MESSAGE.to_string()),
        };
        Some(Self { kind, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_no_alert() {
        assert_eq!(Alert::for_outcome(&SubmitOutcome::Success), None);
    }

    #[test]
    fn conflict_points_to_administrator() {
        let alert = Alert::for_outcome(&SubmitOutcome::Conflict).unwrap();
        assert_eq!(alert.kind, AlertKind::Conflict);
        assert!(alert.message.contains("bereits ein Bericht"));
        assert!(alert.message.contains("Administrator"));
    }

    #[test]
    fn rejected_without_detail_is_generic() {
        let alert = Alert::for_outcome(&SubmitOutcome::Rejected(None)).unwrap();
        insta::assert_snapshot!(alert.message, @"Es gab ein Problem beim Senden des Formulars.");
    }

    #[test]
    fn rejected_body_is_quoted_verbatim() {
        let outcome = SubmitOutcome::Rejected(Some("Quota exceeded".into()));
        let alert = Alert::for_outcome(&outcome).unwrap();
        assert_eq!(alert.kind, AlertKind::Rejected);
        assert_eq!(alert.message, "Unerwartete Antwort vom Server: Quota exceeded");
    }

    #[test]
    fn network_failure_asks_to_retry() {
        let alert = Alert::for_outcome(&SubmitOutcome::NetworkFailure).unwrap();
        assert_eq!(alert.kind, AlertKind::Network);
        assert!(alert.message.contains("später erneut"));
    }
}
