use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::board::FormField;

use super::super::snapshot::PageView;
use super::super::view::UiContext;

const MARKER_WIDTH: u16 = 2;
const SEPARATOR: &str = ": ";

pub fn render_form(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let label_width = label_width(ctx.page);
    let lines: Vec<Line<'static>> = ctx
        .page
        .fields
        .iter()
        .map(|field| {
            let focused = ctx.focused_field == Some(field.field);
            let marker = if focused { "» " } else { "  " };
            let label_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let padding = label_width.saturating_sub(field.label.width());
            Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{}{}", field.label, " ".repeat(padding)), label_style),
                Span::raw(SEPARATOR),
                Span::raw(field.value.clone()),
            ])
        })
        .collect();

    let title = ctx.title.unwrap_or("New project");
    let form = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(form, area);

    if ctx.alert.is_none()
        && let Some(field) = ctx.focused_field
        && let Some(position) = cursor_position(area, ctx.page, field, ctx.cursor)
    {
        frame.set_cursor_position(position);
    }
}

/// Terminal cell of the text cursor when `field` is focused with the cursor
/// `cursor` characters into its value.
pub fn cursor_position(
    area: Rect,
    page: &PageView,
    field: FormField,
    cursor: usize,
) -> Option<(u16, u16)> {
    let row = page.fields.iter().position(|view| view.field == field)?;
    let value = &page.fields[row].value;
    let before: String = value.chars().take(cursor).collect();
    let column = MARKER_WIDTH as usize + label_width(page) + SEPARATOR.len() + before.width();
    let x = area.x.saturating_add(1).saturating_add(column as u16);
    let y = area.y.saturating_add(1).saturating_add(row as u16);
    let max_x = area.right().saturating_sub(2);
    Some((x.min(max_x), y))
}

fn label_width(page: &PageView) -> usize {
    page.fields
        .iter()
        .map(|field| field.label.width())
        .max()
        .unwrap_or(0)
}
