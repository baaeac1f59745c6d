use std::rc::Rc;

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, layout::Rect};

use crate::board::{FormField, ProjectBoard, TracingNotifier};
use crate::config::{BoardConfig, DEFAULT_MARKUP};
use crate::presentation::{HELP_TEXT, PageView, UiContext, cursor_position, draw};

fn board() -> ProjectBoard {
    ProjectBoard::from_markup(DEFAULT_MARKUP, &BoardConfig::default(), Rc::new(TracingNotifier))
        .expect("markup")
}

fn add_project(board: &mut ProjectBoard, title: &str, description: &str, manday: &str) {
    board.set_field(FormField::Title, title).unwrap();
    board.set_field(FormField::Description, description).unwrap();
    board.set_field(FormField::Manday, manday).unwrap();
    assert!(board.submit().unwrap().is_accepted());
}

fn buffer_text(buffer: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn render(page: &PageView, alert: Option<&str>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
    terminal
        .draw(|frame| {
            draw(
                frame,
                UiContext {
                    page,
                    title: Some("Board"),
                    focused_field: Some(FormField::Title),
                    focused_item: None,
                    cursor: 0,
                    status_message: "Ready",
                    help: Some(HELP_TEXT),
                    alert,
                },
            )
        })
        .unwrap();
    buffer_text(terminal.backend().buffer())
}

#[test]
fn snapshot_reads_labels_headings_and_items_from_the_document() {
    let mut board = board();
    add_project(&mut board, "API", "Design the API", "3");
    let page = PageView::capture(&board);

    let labels: Vec<&str> = page.fields.iter().map(|field| field.label.as_str()).collect();
    assert_eq!(labels, ["Title", "Description", "Man-days"]);
    assert_eq!(page.lists[0].heading, "ACTIVE PROJECTS");
    assert_eq!(page.lists[1].heading, "FINISHED PROJECTS");
    let item = page.item("project-1").unwrap();
    assert_eq!(item.title, "API");
    assert_eq!(item.effort, "3 man-days");
    assert_eq!(item.description, "Design the API");
}

#[test]
fn page_renders_form_lists_and_footer() {
    let mut board = board();
    add_project(&mut board, "API", "Design the API", "40");
    let screen = render(&PageView::capture(&board), None);

    assert!(screen.contains("Board"));
    assert!(screen.contains("» Title"));
    assert!(screen.contains("ACTIVE PROJECTS"));
    assert!(screen.contains("FINISHED PROJECTS"));
    assert!(screen.contains("API (2 man-months)"));
    assert!(screen.contains("No projects"));
    assert!(screen.contains("Status: Ready"));
}

#[test]
fn alert_is_drawn_on_top() {
    let screen = render(&PageView::capture(&board()), Some("input values are invalid"));
    assert!(screen.contains("Alert"));
    assert!(screen.contains("input values are invalid"));
    assert!(screen.contains("Enter/Esc to dismiss"));
}

#[test]
fn cursor_sits_after_the_typed_prefix() {
    let mut board = board();
    board.set_field(FormField::Title, "APIs").unwrap();
    let page = PageView::capture(&board);
    let area = Rect::new(0, 0, 80, 5);

    // marker (2) + widest label "Description" (11) + ": " (2), inside the border
    assert_eq!(cursor_position(area, &page, FormField::Title, 0), Some((16, 1)));
    assert_eq!(cursor_position(area, &page, FormField::Title, 3), Some((19, 1)));
    assert_eq!(cursor_position(area, &page, FormField::Manday, 0), Some((16, 3)));
}

