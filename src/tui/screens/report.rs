//! Report screen: the category selector followed by the visible fields.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::controller::FormController;
use crate::model::ReportForm;
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::{FocusRing, FormRow, draw_form};

/// A control the user can focus.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Selector,
    Field { name: String, multiline: bool },
}

/// Focusable controls in display order, each with the row that draws it.
fn controls(form: &ReportForm) -> Vec<(Target, FormRow)> {
    let selector = form.selector();
    let shown = selector
        .selected()
        .map(|o| o.label.as_str())
        .unwrap_or_default();
    let mut controls = vec![(
        Target::Selector,
        FormRow {
            label: selector.label.clone(),
            value: format!("\u{25c0} {shown} \u{25b6}"),
            required: selector.required,
            multiline: false,
            error: selector.error.clone(),
        },
    )];

    let general = form.general().iter().map(|f| (None, f));
    let sectioned = form
        .sections()
        .iter()
        .filter(|s| s.visible)
        .flat_map(|s| s.fields.iter().map(move |f| (Some(s.title.as_str()), f)));

    for (title, field) in general.chain(sectioned) {
        let label = match title {
            Some(title) if title != field.label => format!("{title}: {}", field.label),
            _ => field.label.clone(),
        };
        controls.push((
            Target::Field {
                name: field.name.clone(),
                multiline: field.multiline,
            },
            FormRow {
                label,
                value: field.value.clone(),
                required: field.required,
                multiline: field.multiline,
                error: field.error.clone(),
            },
        ));
    }
    controls
}

/// State for the report screen.
#[derive(Debug, Clone, Default)]
pub struct ReportScreenState {
    focus: FocusRing,
}

impl ReportScreenState {
    /// Creates the screen with the selector focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the focused row index.
    pub fn focus(&self) -> usize {
        self.focus.index()
    }

    fn focused(&mut self, form: &ReportForm) -> Option<Target> {
        let controls = controls(form);
        self.focus.clamp(controls.len());
        controls
            .into_iter()
            .nth(self.focus.index())
            .map(|(target, _)| target)
    }

    fn cycle_category(controller: &mut FormController, forward: bool) {
        let Some(next) = controller.form().cycle_option(forward).map(str::to_string) else {
            return;
        };
        controller.select_category(&next);
    }

    fn edit(controller: &mut FormController, name: &str, change: impl FnOnce(&mut String)) {
        let mut value = controller.form().value(name).unwrap_or_default().to_string();
        change(&mut value);
        controller.input(name, &value);
    }

    fn submit(&mut self, controller: &mut FormController) {
        if !controller.submit() {
            self.focus_first_error(controller.form());
        }
    }

    fn focus_first_error(&mut self, form: &ReportForm) {
        if let Some(index) = controls(form).iter().position(|(_, row)| row.error.is_some()) {
            self.focus.set(index);
        }
    }
}

impl ScreenState for ReportScreenState {
    fn handle_key(&mut self, key: KeyEvent, controller: &mut FormController) -> Action {
        if key.modifiers == KeyModifiers::CONTROL {
            if key.code == KeyCode::Char('s') {
                self.submit(controller);
            }
            return Action::None;
        }

        let target = self.focused(controller.form());
        let len = controls(controller.form()).len();
        match (key.code, target) {
            (KeyCode::Esc, _) => return Action::Quit,
            (KeyCode::Tab, _) => self.focus.next(len),
            (KeyCode::BackTab, _) => self.focus.prev(len),
            (KeyCode::Right, Some(Target::Selector)) => Self::cycle_category(controller, true),
            (KeyCode::Left, Some(Target::Selector)) => Self::cycle_category(controller, false),
            (KeyCode::Enter, Some(Target::Field { name, multiline: true })) => {
                Self::edit(controller, &name, |v| v.push('\n'));
            }
            (KeyCode::Enter, _) => self.submit(controller),
            (KeyCode::Backspace, Some(Target::Field { name, .. })) => {
                Self::edit(controller, &name, |v| {
                    v.pop();
                });
            }
            (KeyCode::Char(ch), Some(Target::Field { name, .. })) => {
                Self::edit(controller, &name, |v| v.push(ch));
            }
            _ => {}
        }
        // Changing the category can remove rows below the focus.
        self.focus.clamp(controls(controller.form()).len());
        Action::None
    }
}

/// Renders the report screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_report(state: &ReportScreenState, form: &ReportForm, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [form_area, feedback_area, footer_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let rows: Vec<FormRow> = controls(form).into_iter().map(|(_, row)| row).collect();
    let focus = state.focus().min(rows.len().saturating_sub(1));
    draw_form(&rows, focus, frame, form_area);

    if form.feedback_visible() {
        let feedback = Paragraph::new(Span::styled(
            form.feedback(),
            Style::default().fg(Color::Green),
        ));
        frame.render_widget(feedback, feedback_area);
    }

    let footer = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Weiter  "),
        Span::styled("[\u{2190}/\u{2192}]", Style::default().fg(Color::Yellow)),
        Span::raw(" Amt  "),
        Span::styled("[Ctrl+S]", Style::default().fg(Color::Yellow)),
        Span::raw(" Senden  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Beenden"),
    ]);
    frame.render_widget(Paragraph::new(footer), footer_area);
}
