//! Form rendering and focus management.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Height of a single-line row, borders included.
const LINE_ROW_HEIGHT: u16 = 3;
/// Height of a multiline row, borders included.
const AREA_ROW_HEIGHT: u16 = 6;

/// One input row as it is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    /// Display label shown in the row's border.
    pub label: String,
    /// Text shown inside the row.
    pub value: String,
    /// Whether the field must be non-empty on submit.
    pub required: bool,
    /// Whether the row is a text area.
    pub multiline: bool,
    /// Constraint message, if any.
    pub error: Option<String>,
}

impl FormRow {
    fn height(&self) -> u16 {
        if self.multiline {
            AREA_ROW_HEIGHT
        } else {
            LINE_ROW_HEIGHT
        }
    }
}

/// Index of the focused row, wrapping around at both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusRing {
    index: usize,
}

impl FocusRing {
    /// Returns the focused index.
    pub fn index(self) -> usize {
        self.index
    }

    /// Moves focus to `index`.
    pub fn set(&mut self, index: usize) {
        self.index = index;
    }

    /// Moves focus to the next of `len` rows, wrapping around.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + 1) % len;
    }

    /// Moves focus to the previous of `len` rows, wrapping around.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + len - 1) % len;
    }

    /// Keeps the index inside `len` rows after rows disappeared.
    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }
}

/// First row to draw so that the focused row fits into `height`.
fn first_visible_row(rows: &[FormRow], focus: usize, height: u16) -> usize {
    let focus = focus.min(rows.len().saturating_sub(1));
    let mut first = 0;
    while first < focus {
        let needed: u16 = rows[first..=focus].iter().map(FormRow::height).sum();
        if needed <= height {
            break;
        }
        first += 1;
    }
    first
}

/// Renders form rows within the given area, scrolled so the focused row is visible.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(rows: &[FormRow], focus: usize, frame: &mut Frame, area: Rect) {
    if rows.is_empty() {
        return;
    }
    let first = first_visible_row(rows, focus, area.height);
    let shown = &rows[first..];
    let mut constraints: Vec<Constraint> = shown
        .iter()
        .map(|row| Constraint::Length(row.height()))
        .collect();
    constraints.push(Constraint::Min(0));

    let areas = Layout::vertical(constraints).split(area);

    for (offset, row) in shown.iter().enumerate() {
        let row_area = areas[offset];
        if row_area.height == 0 {
            break;
        }
        let is_focused = first + offset == focus;

        let border_color = if row.error.is_some() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let label = if row.required {
            format!("{} *", row.label)
        } else {
            row.label.clone()
        };

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut text = Text::from(row.value.clone());
        if is_focused {
            let cursor = Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            );
            match text.lines.last_mut() {
                Some(line) if !row.value.ends_with('\n') => line.spans.push(cursor),
                _ => text.lines.push(Line::from(cursor)),
            }
        }

        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, row_area);

        // Error sits on the bottom border of the row.
        if let Some(ref err) = row.error {
            let error_line = Paragraph::new(Span::styled(
                err.as_str(),
                Style::default().fg(Color::Red),
            ));
            let err_area = Rect {
                x: row_area.x + 2,
                y: row_area.y + row_area.height.saturating_sub(1),
                width: row_area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}
