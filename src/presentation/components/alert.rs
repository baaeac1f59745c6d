use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::layout::popup_rect;

const MAX_WIDTH: u16 = 50;
const DISMISS_HINT: &str = "Enter/Esc to dismiss";

/// Modal box for a pending alert, centered over everything else.
pub fn render_alert(frame: &mut Frame<'_>, message: &str) {
    let area = frame.area();
    let width = MAX_WIDTH.min(area.width.saturating_sub(4)).max(DISMISS_HINT.len() as u16 + 4);
    let text_width = width.saturating_sub(4).max(1) as usize;

    let mut lines: Vec<Line<'static>> = textwrap::wrap(message, text_width)
        .into_iter()
        .map(|line| Line::from(line.into_owned()))
        .collect();
    lines.push(Line::default());
    lines.push(Line::styled(DISMISS_HINT, Style::default().fg(Color::DarkGray)));

    let height = lines.len() as u16 + 2;
    let rect = popup_rect(area, width, height);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title("Alert")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
