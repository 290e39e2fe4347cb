//! Modal alert box drawn over the form.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::controller::{Alert, AlertKind};

/// Width of the modal, borders included.
const ALERT_WIDTH: u16 = 56;
/// Height of the modal, borders included.
const ALERT_HEIGHT: u16 = 9;

fn title(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::Conflict => " Bereits abgegeben ",
        AlertKind::Rejected => " Fehler ",
        AlertKind::Network => " Keine Verbindung ",
    }
}

/// Centers a `width` x `height` box in `area`, shrinking it to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Renders the alert centered in `area`, clearing what is beneath it.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_alert(alert: &Alert, frame: &mut Frame, area: Rect) {
    let popup = centered(area, ALERT_WIDTH, ALERT_HEIGHT);
    let color = match alert.kind {
        AlertKind::Conflict => Color::Yellow,
        AlertKind::Rejected | AlertKind::Network => Color::Red,
    };

    let block = Block::default()
        .title(title(alert.kind))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let lines = vec![
        Line::from(alert.message.as_str()),
        Line::from(""),
        Line::from("[Enter] OK").style(Style::default().add_modifier(Modifier::BOLD)),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::transport::SubmitOutcome;

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn render(alert: &Alert, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_alert(alert, frame, frame.area()))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn centered_box_fits_inside_area() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = centered(area, ALERT_WIDTH, ALERT_HEIGHT);
        assert_eq!(popup.width, ALERT_WIDTH);
        assert_eq!(popup.height, ALERT_HEIGHT);
        assert_eq!(popup.x, 12);
    }

    #[test]
    fn centered_box_shrinks_on_small_terminals() {
        let area = Rect::new(0, 0, 30, 5);
        let popup = centered(area, ALERT_WIDTH, ALERT_HEIGHT);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 5);
    }

    #[test]
    fn renders_title_and_acknowledge_hint() {
        let alert = Alert::for_outcome(&SubmitOutcome::NetworkFailure).unwrap();
        let output = render(&alert, 80, 24);
        assert!(output.contains("Keine Verbindung"));
        assert!(output.contains("[Enter] OK"));
    }

    #[test]
    fn renders_server_detail() {
        let alert = Alert::for_outcome(&SubmitOutcome::Rejected(Some("Quota".into()))).unwrap();
        let output = render(&alert, 80, 24);
        assert!(output.contains("Quota"));
    }
}
