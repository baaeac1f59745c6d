use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;

use crate::board::{AlertQueue, FormField, Project, ProjectBoard, SubmitOutcome};
use crate::presentation::{self, HELP_TEXT, PageView, UiContext};

use super::{
    focus::{FocusRing, FocusTarget},
    input::{KeyCommand, classify},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

pub(crate) struct App {
    board: ProjectBoard,
    alerts: AlertQueue,
    options: UiOptions,
    title: Option<String>,
    status: StatusLine,
    page: PageView,
    focus: FocusRing,
    cursor: usize,
    should_quit: bool,
}

impl App {
    pub fn new(
        board: ProjectBoard,
        alerts: AlertQueue,
        options: UiOptions,
        title: Option<String>,
    ) -> Self {
        let page = PageView::capture(&board);
        let focus = FocusRing::new(&page);
        let mut app = Self {
            board,
            alerts,
            options,
            title,
            status: StatusLine::new(),
            page,
            focus,
            cursor: 0,
            should_quit: false,
        };
        app.cursor = app.focused_value_len();
        app
    }

    pub fn run(&mut self) -> Result<Vec<Project>> {
        let mut terminal = TerminalGuard::new()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }
        Ok(self.board.projects())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let alert = self.alerts.peek();
        let (focused_field, focused_item) = match self.focus.current() {
            Some(FocusTarget::Field(field)) => (Some(*field), None),
            Some(FocusTarget::Item(id)) => (None, Some(id.as_str())),
            None => (None, None),
        };
        presentation::draw(
            frame,
            UiContext {
                page: &self.page,
                title: self.title.as_deref(),
                focused_field,
                focused_item,
                cursor: self.cursor,
                status_message: self.status.message(),
                help: self.options.show_help.then_some(HELP_TEXT),
                alert: alert.as_deref(),
            },
        );
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if self.alerts.peek().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alerts.pop();
            }
            return Ok(());
        }

        match classify(&key) {
            KeyCommand::Quit => self.should_quit = true,
            KeyCommand::NextFocus => self.move_focus(1),
            KeyCommand::PrevFocus => self.move_focus(-1),
            KeyCommand::ResetStatus => self.status.ready(),
            KeyCommand::Activate => self.activate()?,
            KeyCommand::Edit(event) => self.edit(&event)?,
            KeyCommand::None => {}
        }
        Ok(())
    }

    fn move_focus(&mut self, delta: i32) {
        self.focus.step(delta);
        self.cursor = self.focused_value_len();
    }

    fn activate(&mut self) -> Result<()> {
        match self.focus.current().cloned() {
            Some(FocusTarget::Field(_)) => match self.board.submit()? {
                SubmitOutcome::Accepted(record) => self.status.record_added(&record.title),
                SubmitOutcome::Rejected(rejection) => self.status.rejected(&rejection),
            },
            Some(FocusTarget::Item(id)) => {
                if self.board.activate_project(&id)?
                    && let Some(project) = self.board.store().project(&id)
                {
                    self.status.moved(&project.title, project.status);
                }
            }
            None => {}
        }
        self.refresh();
        Ok(())
    }

    fn edit(&mut self, key: &KeyEvent) -> Result<()> {
        let Some(FocusTarget::Field(field)) = self.focus.current().cloned() else {
            return Ok(());
        };
        let mut chars: Vec<char> = self.board.field_text(field).unwrap_or_default().chars().collect();
        let cursor = self.cursor.min(chars.len());
        let changed = match key.code {
            KeyCode::Char(ch) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                chars.insert(cursor, ch);
                self.cursor = cursor + 1;
                true
            }
            KeyCode::Backspace if cursor > 0 => {
                chars.remove(cursor - 1);
                self.cursor = cursor - 1;
                true
            }
            KeyCode::Delete if cursor < chars.len() => {
                chars.remove(cursor);
                true
            }
            KeyCode::Left => {
                self.cursor = cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (cursor + 1).min(chars.len());
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = chars.len();
                false
            }
            _ => false,
        };
        if changed {
            self.board.set_field(field, chars.into_iter().collect::<String>())?;
            let label = self.field_label(field);
            self.status.editing(&label);
            self.refresh();
        }
        Ok(())
    }

    fn refresh(&mut self) {
        self.page = PageView::capture(&self.board);
        self.focus.sync(&self.page);
        self.cursor = self.cursor.min(self.focused_value_len());
    }

    fn focused_value_len(&self) -> usize {
        match self.focus.current() {
            Some(FocusTarget::Field(field)) => self
                .page
                .fields
                .iter()
                .find(|view| view.field == *field)
                .map(|view| view.value.chars().count())
                .unwrap_or(0),
            _ => 0,
        }
    }

    fn field_label(&self, field: FormField) -> String {
        self.page
            .fields
            .iter()
            .find(|view| view.field == field)
            .map(|view| view.label.clone())
            .unwrap_or_else(|| field.to_string())
    }
}
