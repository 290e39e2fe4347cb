use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};

use crate::controller::FormController;
use crate::model::format_de;

use super::action::{Action, ScreenState};
use super::dispatch::Dispatcher;
use super::error::AppError;
use super::screens::{ClosedScreenState, ReportScreenState, draw_closed, draw_report};
use super::widgets::{StatusBarContext, draw_alert, draw_status_bar};

/// How long the event loop waits for a key before checking completions.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// All screens the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The form itself.
    Report,
    /// The notice shown outside the availability window.
    Closed,
}

/// Top-level application state.
pub struct App {
    controller: FormController,
    dispatcher: Dispatcher,
    report: ReportScreenState,
    closed: ClosedScreenState,
    should_quit: bool,
}

impl App {
    /// Creates the app and hands the controller's start-up commands to the
    /// dispatcher.
    pub fn new(controller: FormController, dispatcher: Dispatcher) -> Self {
        let mut app = Self {
            controller,
            dispatcher,
            report: ReportScreenState::new(),
            closed: ClosedScreenState,
            should_quit: false,
        };
        app.flush();
        app
    }

    /// Main event loop: draw → wait for a key or a completion → dispatch.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
            self.pump();
        }
        Ok(())
    }

    /// Feeds finished commands back to the controller and dispatches any
    /// follow-up work.
    pub fn pump(&mut self) {
        for completion in self.dispatcher.poll() {
            self.controller.complete(completion);
        }
        self.flush();
    }

    fn flush(&mut self) {
        for command in self.controller.take_commands() {
            self.dispatcher.dispatch(command);
        }
    }

    /// Renders the current screen, the status bar and any alert.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        let form = self.controller.form();
        match (self.screen(), form.notice()) {
            (Screen::Closed, Some(notice)) => {
                draw_closed(form.title(), notice, frame, main_area);
                return;
            }
            _ => draw_report(&self.report, form, frame, main_area),
        }

        let ctx = StatusBarContext {
            category: form
                .selector()
                .selected()
                .filter(|o| !o.value.is_empty())
                .map(|o| o.label.clone())
                .unwrap_or_default(),
            phase: self.controller.phase(),
            open_until: format_de(self.controller.settings().window.end),
        };
        draw_status_bar(&ctx, frame, status_area);

        if let Some(alert) = self.controller.alert() {
            draw_alert(alert, frame, frame.area());
        }
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // The alert swallows every key until it is acknowledged.
        if self.controller.alert().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.controller.dismiss_alert();
            }
            return;
        }

        let action = match self.screen() {
            Screen::Report => self.report.handle_key(key, &mut self.controller),
            Screen::Closed => self.closed.handle_key(key, &mut self.controller),
        };
        self.apply(action);
        self.flush();
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        if self.controller.is_open() {
            Screen::Report
        } else {
            Screen::Closed
        }
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns a reference to the [`FormController`].
    pub fn controller(&self) -> &FormController {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration as TimeDelta;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::config::Config;
    use crate::controller::{Completion, SubmitPhase};
    use crate::model::{FixedClock, ReportForm};
    use crate::storage::MemoryStore;
    use crate::tui::dispatch::fake::FakeTransport;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn make_app_at(transport: FakeTransport, open: bool) -> App {
        let config = Config::default();
        let form = ReportForm::from_layout(&config.layout);
        let now = if open {
            config.window.start
        } else {
            config.window.start - TimeDelta::days(1)
        };
        let controller = FormController::start(
            config.settings(),
            form,
            Box::new(MemoryStore::new()),
            &FixedClock(now),
        );
        let dispatcher = Dispatcher::new(Arc::new(transport)).unwrap();
        App::new(controller, dispatcher)
    }

    fn make_app(transport: FakeTransport) -> App {
        make_app_at(transport, true)
    }

    /// Waits for one completion and feeds it through the app.
    fn settle(app: &mut App) {
        let completion = app.dispatcher.wait(TIMEOUT).expect("completion");
        app.controller.complete(completion);
        app.pump();
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_press(ch: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(press(KeyCode::Char(ch)));
        }
    }

    /// Picks Finanzen and fills every required field.
    fn fill_finance(app: &mut App) {
        app.handle_key(press(KeyCode::Right));
        app.handle_key(press(KeyCode::Tab));
        type_text(app, "Erika");
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Tab));
        type_text(app, "250");
    }

    #[test]
    fn new_starts_on_report_screen() {
        let app = make_app(FakeTransport::default());
        assert_eq!(app.screen(), Screen::Report);
        assert!(!app.should_quit());
    }

    #[test]
    fn outside_window_shows_closed_screen() {
        let mut app = make_app_at(FakeTransport::default(), false);
        assert_eq!(app.screen(), Screen::Closed);
        app.handle_key(press(KeyCode::Char('x')));
        assert!(app.should_quit());
    }

    #[test]
    fn startup_status_query_disables_reported_category() {
        let transport = FakeTransport {
            amts: vec!["Presse".into()],
            ..FakeTransport::default()
        };
        let mut app = make_app(transport);
        settle(&mut app);
        let option = app
            .controller()
            .form()
            .selector()
            .options
            .iter()
            .find(|o| o.value == "Presse")
            .unwrap()
            .clone();
        assert!(option.disabled);
        assert!(option.label.ends_with("(bereits abgegeben)"));
    }

    #[test]
    fn esc_quits() {
        let mut app = make_app(FakeTransport::default());
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = make_app(FakeTransport::default());
        app.handle_key(ctrl_press('c'));
        assert!(app.should_quit());
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = make_app(FakeTransport::default());
        app.handle_key(release(KeyCode::Esc));
        assert!(!app.should_quit());
    }

    #[test]
    fn successful_submission_resets_form() {
        let mut app = make_app(FakeTransport::replying(200, "OK"));
        settle(&mut app);
        fill_finance(&mut app);
        app.handle_key(ctrl_press('s'));
        assert_eq!(app.controller().phase(), SubmitPhase::Submitting);

        settle(&mut app);
        let form = app.controller().form();
        assert!(form.feedback_visible());
        assert_eq!(form.value("Name"), Some(""));
        assert_eq!(form.selector().value, "");
        assert_eq!(app.controller().phase(), SubmitPhase::Idle);
    }

    #[test]
    fn conflict_raises_alert_that_blocks_input() {
        let mut app = make_app(FakeTransport::replying(200, "ALREADY_EXISTS"));
        settle(&mut app);
        fill_finance(&mut app);
        app.handle_key(ctrl_press('s'));
        settle(&mut app);

        assert!(app.controller().alert().is_some());
        type_text(&mut app, "x");
        assert_eq!(app.controller().form().value("Kassenstand"), Some("250"));

        // Esc acknowledges the alert instead of quitting.
        app.handle_key(press(KeyCode::Esc));
        assert!(app.controller().alert().is_none());
        assert!(!app.should_quit());
        assert_eq!(app.controller().phase(), SubmitPhase::Idle);
    }

    #[test]
    fn network_failure_keeps_values() {
        let mut app = make_app(FakeTransport::default());
        settle(&mut app);
        fill_finance(&mut app);
        app.handle_key(ctrl_press('s'));
        match app.dispatcher.wait(TIMEOUT) {
            Some(completion @ Completion::Submitted(Err(_))) => app.controller.complete(completion),
            other => panic!("unexpected completion: {other:?}"),
        }
        assert_eq!(app.controller().form().value("Name"), Some("Erika"));
        app.handle_key(press(KeyCode::Enter));
        assert!(app.controller().alert().is_none());
    }

    #[test]
    fn draw_renders_form_and_status_bar() {
        let app = make_app(FakeTransport::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buf = terminal.backend().buffer();
        let last_row: String = (0..buf.area.width)
            .map(|x| buf[(x, buf.area.height - 1)].symbol().to_string())
            .collect();
        assert!(last_row.contains("Kein Amt"));
        assert!(last_row.contains("30.11.2025"));
    }
}
