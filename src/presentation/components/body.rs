use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
};

use super::super::view::UiContext;
use super::{form::render_form, lists::render_lists};

pub fn render_body(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    if ctx.page.fields.is_empty() && ctx.page.lists.is_empty() {
        let placeholder = Paragraph::new("Nothing was rendered into the page")
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    }

    let form_height = if ctx.page.fields.is_empty() {
        0
    } else {
        ctx.page.fields.len() as u16 + 2
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(3)])
        .split(area);

    if form_height > 0 {
        render_form(frame, chunks[0], ctx);
    }
    render_lists(frame, chunks[1], ctx);
}
