use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::board::FormField;

use super::components::{render_alert, render_body, render_footer};
use super::snapshot::PageView;

pub struct UiContext<'a> {
    pub page: &'a PageView,
    pub title: Option<&'a str>,
    pub focused_field: Option<FormField>,
    pub focused_item: Option<&'a str>,
    /// Cursor position inside the focused field, in characters.
    pub cursor: usize,
    pub status_message: &'a str,
    pub help: Option<&'a str>,
    pub alert: Option<&'a str>,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(4)])
        .split(frame.area());

    render_body(frame, chunks[0], &ctx);
    render_footer(frame, chunks[1], &ctx);

    if let Some(message) = ctx.alert {
        render_alert(frame, message);
    }
}
