use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::super::snapshot::ListView;
use super::super::view::UiContext;

pub fn render_lists(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let lists = &ctx.page.lists;
    if lists.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, lists.len() as u32); lists.len()];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (list, column) in lists.iter().zip(columns.iter()) {
        render_list(frame, *column, list, ctx.focused_item);
    }
}

fn render_list(frame: &mut Frame<'_>, area: Rect, list: &ListView, focused_item: Option<&str>) {
    let block = Block::default()
        .title(list.heading.clone())
        .borders(Borders::ALL);

    if list.items.is_empty() {
        let placeholder = Paragraph::new("No projects")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem<'static>> = list
        .items
        .iter()
        .map(|item| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        item.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" ({})", item.effort),
                        Style::default().fg(Color::Cyan),
                    ),
                ]),
                Line::styled(
                    item.description.clone(),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let mut state = ListState::default();
    state.select(
        focused_item.and_then(|id| list.items.iter().position(|item| item.id == id)),
    );

    let widget = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");
    frame.render_stateful_widget(widget, area, &mut state);
}
