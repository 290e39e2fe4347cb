//! Status bar widget: one line of submission context.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::controller::SubmitPhase;

/// Data passed to the status bar widget; decoupled from the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Label of the selected category, empty for none.
    pub category: String,
    /// Where the submission cycle stands.
    pub phase: SubmitPhase,
    /// End of the availability window, already formatted.
    pub open_until: String,
}

/// Renders a one-line status bar.
///
/// Display format (left-aligned, Cyan):
/// - Idle:       `Amt: Finanzen  offen bis 30.11.2025, 23:59:00`
/// - Submitting: `Amt: Finanzen  wird gesendet …` (in Yellow)
/// - No category: `Kein Amt gewählt  offen bis …`
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let yellow = Style::default().fg(Color::Yellow);

    let mut spans: Vec<Span> = Vec::new();
    if ctx.category.is_empty() {
        spans.push(Span::styled("Kein Amt gewählt", cyan));
    } else {
        spans.push(Span::styled(format!("Amt: {}", ctx.category), cyan));
    }
    spans.push(Span::styled("  ", cyan));

    match ctx.phase {
        SubmitPhase::Submitting => spans.push(Span::styled("wird gesendet …", yellow)),
        SubmitPhase::AwaitingAcknowledgement => {
            spans.push(Span::styled("Senden fehlgeschlagen", Style::default().fg(Color::Red)));
        }
        SubmitPhase::Idle if !ctx.open_until.is_empty() => {
            spans.push(Span::styled(format!("offen bis {}", ctx.open_until), cyan));
        }
        SubmitPhase::Idle => {}
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
