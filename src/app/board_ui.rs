use std::rc::Rc;

use anyhow::{Context, Result, bail};

use crate::board::{AlertQueue, Project, ProjectBoard};
use crate::config::{BoardConfig, DEFAULT_MARKUP};

use super::{options::UiOptions, runtime::App};

/// Interactive terminal session over a [`ProjectBoard`].
#[derive(Debug)]
pub struct ProjectBoardUi {
    config: BoardConfig,
    markup: Option<String>,
    title: Option<String>,
    options: UiOptions,
}

impl ProjectBoardUi {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            markup: None,
            title: None,
            options: UiOptions::default(),
        }
    }

    /// Page markup to render into; the bundled page is used otherwise.
    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.markup = Some(markup.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Run until the user quits and return the projects entered.
    pub fn run(self) -> Result<Vec<Project>> {
        let ProjectBoardUi {
            config,
            markup,
            title,
            options,
        } = self;

        let alerts = AlertQueue::new();
        let markup = markup.as_deref().unwrap_or(DEFAULT_MARKUP);
        let board = ProjectBoard::from_markup(markup, &config, Rc::new(alerts.clone()))
            .context("failed to parse page markup")?;
        if !board.is_ready() {
            let issues: Vec<String> = board
                .startup_errors()
                .iter()
                .map(|err| err.to_string())
                .collect();
            bail!("failed to build the page:\n{}", issues.join("\n"));
        }

        let mut app = App::new(board, alerts, options, title);
        app.run()
    }
}
