//! The form controller.
//!
//! Owns the [`ReportForm`] and the draft store and implements the whole
//! behavior of the report form: the availability gate, section visibility,
//! autosave/restore, status hints and submission handling.
//!
//! The controller never waits on the network. Work that has to leave the
//! process is queued as a [`Command`]; the host runs it and feeds the result
//! back as a [`Completion`].

mod alert;

use tracing::{debug, info, warn};

use crate::model::{Clock, Draft, ReportForm, TimeWindow};
use crate::storage::DraftStore;
use crate::transport::{
    ResponseContract, StatusReport, SubmitOutcome, SubmitReply, SubmitRequest, TransportError,
};

pub use alert::{Alert, AlertKind};

/// Suffix appended to the label of categories already reported this period.
pub const STATUS_SUFFIX: &str = " (bereits abgegeben)";

/// Message attached to required controls left empty.
pub const REQUIRED_MESSAGE: &str = "Bitte füllen Sie dieses Feld aus.";

/// Everything the controller needs besides the form and the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// When the form is open.
    pub window: TimeWindow,
    /// Submission target.
    pub action: String,
    /// Submission method.
    pub method: String,
    /// How the backend reports the submission result.
    pub contract: ResponseContract,
    /// Whether to query and show per-category submission status.
    pub track_status: bool,
    /// Storage key of the saved draft.
    pub draft_key: String,
}

/// Work the host must carry out on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the form.
    Submit(SubmitRequest),
    /// Query which categories were already reported.
    FetchStatus {
        /// Form action the status address is derived from.
        action: String,
    },
}

/// The result of a [`Command`], handed back to the controller.
#[derive(Debug)]
pub enum Completion {
    /// A submission finished.
    Submitted(Result<SubmitReply, TransportError>),
    /// A status query finished.
    Status(Result<StatusReport, TransportError>),
}

/// Where the controller is in the submission cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    /// Ready to submit.
    #[default]
    Idle,
    /// A submission is in flight.
    Submitting,
    /// A failed submission's alert waits to be dismissed.
    AwaitingAcknowledgement,
}

/// Drives one report form.
pub struct FormController {
    settings: ControllerSettings,
    form: ReportForm,
    store: Box<dyn DraftStore>,
    open: bool,
    phase: SubmitPhase,
    alert: Option<Alert>,
    last_outcome: Option<SubmitOutcome>,
    outbox: Vec<Command>,
}

impl FormController {
    /// Runs the start-up sequence.
    ///
    /// Outside the configured window the form content is replaced by the
    /// closed notice and the controller stays inert. Otherwise a status query
    /// is queued (when tracking) and the saved draft is restored.
    pub fn start(
        settings: ControllerSettings,
        form: ReportForm,
        store: Box<dyn DraftStore>,
        clock: &dyn Clock,
    ) -> Self {
        let mut controller = Self {
            settings,
            form,
            store,
            open: false,
            phase: SubmitPhase::Idle,
            alert: None,
            last_outcome: None,
            outbox: Vec::new(),
        };
        controller.form.hide_all_sections();

        let now = clock.now();
        if !controller.settings.window.contains(now) {
            info!(%now, "form is outside its availability window");
            let notice = controller.settings.window.closed_notice();
            controller.form.replace_with_notice(notice);
            return controller;
        }

        controller.open = true;
        if controller.settings.track_status {
            controller.request_status();
        }
        controller.restore_draft();
        controller
    }

    /// Returns `true` if the form is inside its window and accepts input.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The form document.
    pub fn form(&self) -> &ReportForm {
        &self.form
    }

    /// The settings the controller was started with.
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// The draft store.
    pub fn store(&self) -> &dyn DraftStore {
        self.store.as_ref()
    }

    /// Current submission phase.
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// The alert waiting for acknowledgement, if any.
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Outcome of the most recent submission.
    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    /// Drains the queued commands.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    /// Shows exactly the section tagged `category` plus the fallback
    /// section, or nothing for an empty category. Always empties the
    /// fallback free-text field.
    pub fn apply_selection(&mut self, category: &str) {
        if !self.open {
            return;
        }
        self.form.hide_all_sections();
        self.form.clear_fallback_text();
        if !category.is_empty() {
            if !self.form.show_section(category) {
                debug!(category, "no section tagged with category");
            }
            self.form.show_fallback();
        }
    }

    /// User picked a category in the selector.
    ///
    /// Disabled options cannot be picked. Returns `true` if the selection
    /// was applied.
    pub fn select_category(&mut self, value: &str) -> bool {
        if !self.accepts_input() || !self.form.is_selectable(value) {
            return false;
        }
        let name = self.form.selector().name.clone();
        self.form.set_value(&name, value);
        self.apply_selection(value);
        self.autosave();
        true
    }

    /// User changed the value of the control named `name`.
    ///
    /// Returns `false` if the input was not accepted.
    pub fn input(&mut self, name: &str, value: &str) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if name == self.form.selector().name {
            return self.select_category(value);
        }
        if !self.form.set_value(name, value) {
            return false;
        }
        self.autosave();
        true
    }

    /// User submitted the form.
    ///
    /// Required controls are checked first; violations are flagged on the
    /// form and nothing is sent. Returns `true` if a submission was queued.
    pub fn submit(&mut self) -> bool {
        if !self.accepts_input() || self.phase != SubmitPhase::Idle {
            return false;
        }
        self.form.clear_errors();
        let missing = self.form.missing_required();
        if !missing.is_empty() {
            debug!(?missing, "required controls are empty");
            for name in &missing {
                self.form.set_error(name, REQUIRED_MESSAGE);
            }
            return false;
        }

        let request = SubmitRequest {
            action: self.settings.action.clone(),
            method: self.settings.method.clone(),
            accept: self.settings.contract.accept(),
            fields: self.form.form_data(),
        };
        info!(
            action = %request.action,
            category = %self.form.selector().value,
            "submitting report"
        );
        self.phase = SubmitPhase::Submitting;
        self.outbox.push(Command::Submit(request));
        true
    }

    /// Feeds back the result of a queued command.
    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Submitted(result) => self.finish_submit(result),
            Completion::Status(result) => self.finish_status(result),
        }
    }

    /// Handles the result of a submission.
    pub fn finish_submit(&mut self, result: Result<SubmitReply, TransportError>) {
        if self.phase != SubmitPhase::Submitting {
            warn!("ignoring submission result while no submission is in flight");
            return;
        }
        if let Err(e) = &result {
            warn!("submission failed: {e}");
        }
        let outcome = self.settings.contract.outcome(&result);
        info!(?outcome, "submission finished");

        match &outcome {
            SubmitOutcome::Success => {
                self.complete_success();
                self.phase = SubmitPhase::Idle;
            }
            failure => {
                self.alert = Alert::for_outcome(failure);
                self.phase = SubmitPhase::AwaitingAcknowledgement;
            }
        }
        self.last_outcome = Some(outcome);
    }

    /// Handles the result of a status query. Failures are only logged.
    pub fn finish_status(&mut self, result: Result<StatusReport, TransportError>) {
        if !self.open {
            return;
        }
        match result {
            Ok(report) => {
                for category in &report.amts {
                    if self.form.mark_submitted(category, STATUS_SUFFIX) {
                        debug!(category, "category already reported");
                    }
                }
            }
            Err(e) => warn!("could not load submission status: {e}"),
        }
    }

    /// User acknowledged the alert.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        if self.phase == SubmitPhase::AwaitingAcknowledgement {
            self.phase = SubmitPhase::Idle;
        }
    }

    fn accepts_input(&self) -> bool {
        self.open && self.alert.is_none()
    }

    fn request_status(&mut self) {
        self.outbox.push(Command::FetchStatus {
            action: self.settings.action.clone(),
        });
    }

    fn complete_success(&mut self) {
        self.form.reset();
        self.form.set_feedback_visible(true);
        if let Err(e) = self.store.remove(&self.settings.draft_key) {
            warn!("could not delete saved draft: {e}");
        }
        self.form.hide_all_sections();
        self.form.clear_fallback_text();
        if self.settings.track_status {
            self.request_status();
        }
    }

    fn autosave(&mut self) {
        let encoded = match Draft::from_form(&self.form).encode() {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("could not encode draft: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.settings.draft_key, &encoded) {
            warn!("could not save draft: {e}");
        }
    }

    fn restore_draft(&mut self) {
        let draft = match self.store.get(&self.settings.draft_key) {
            Ok(Some(text)) => Draft::parse(&text),
            Ok(None) => Draft::default(),
            Err(e) => {
                warn!("could not read saved draft: {e}");
                Draft::default()
            }
        };
        if draft.is_empty() {
            return;
        }

        let selector = self.form.selector().name.clone();
        for (name, value) in draft.iter() {
            if name != selector {
                self.form.set_value(name, value);
            }
        }
        if let Some(category) = draft.get(&selector).filter(|c| !c.is_empty()) {
            self.form.set_value(&selector, category);
            let selected = self.form.selector().value.clone();
            self.apply_selection(&selected);
        }
        debug!("restored saved draft");

        // Restore can drop values (fallback text, unknown category); keep the
        // stored draft equal to the form.
        if Draft::from_form(&self.form) != draft {
            self.autosave();
        }
    }
}
