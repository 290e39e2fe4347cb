//! Closed screen: shown outside the availability window.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::controller::FormController;
use crate::tui::action::{Action, ScreenState};

/// State for the closed screen. Any key quits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedScreenState;

impl ScreenState for ClosedScreenState {
    fn handle_key(&mut self, _key: KeyEvent, _controller: &mut FormController) -> Action {
        Action::Quit
    }
}

/// Renders the notice centered in `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_closed(title: &str, notice: &str, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let mut lines: Vec<Line> = notice.lines().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from("Beliebige Taste zum Beenden").style(Style::default().fg(Color::DarkGray)));
    let height = lines.len() as u16;

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [centered] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(inner);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered,
    );
}
