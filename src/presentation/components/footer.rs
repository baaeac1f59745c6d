use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Paragraph, Wrap},
};

use super::super::view::UiContext;

pub const HELP_TEXT: &str =
    "Tab/↑/↓ move • Enter add project / move item • Esc clear status • Ctrl+Q quit";

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    if let Some(help) = ctx.help {
        let actions = Paragraph::new(format!("Actions: {help}"))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(actions, rows[0]);
    }

    let mut status = ctx.status_message.to_string();
    if status.trim().is_empty() {
        status = "Ready".to_string();
    }
    let total: usize = ctx.page.lists.iter().map(|list| list.items.len()).sum();
    let badge = Span::styled(format!("[{total} project(s)]"), Style::default().fg(Color::Green));
    let status_widget = Paragraph::new(ratatui::text::Line::from(vec![
        Span::raw("Status: "),
        Span::raw(status),
        Span::raw(" "),
        badge,
    ]))
    .wrap(Wrap { trim: true });
    frame.render_widget(status_widget, rows[1]);
}
