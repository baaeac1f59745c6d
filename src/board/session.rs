use std::rc::Rc;

use thiserror::Error;
use tracing::{error, info};

use crate::component::{Component, StructuralError};
use crate::config::{BoardConfig, DEFAULT_MARKUP};
use crate::dom::{Document, DomError, EventType, NodeId, parse_document};

use super::input::{FormField, ProjectInput, SubmitOutcome};
use super::list::ProjectList;
use super::model::{Project, ProjectStatus};
use super::notify::{Notifier, RecordSink};
use super::store::ProjectStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("the input form is not mounted")]
    InputUnavailable,
    #[error("the submit event was not handled by the input form")]
    SubmitNotHandled,
    #[error(transparent)]
    Dom(#[from] DomError),
}

/// One page session: the document plus every component rendered into it.
#[derive(Debug)]
pub struct ProjectBoard {
    document: Document,
    config: BoardConfig,
    store: ProjectStore,
    input: Option<ProjectInput>,
    lists: Vec<ProjectList>,
    startup_errors: Vec<StructuralError>,
}

impl ProjectBoard {
    /// Mount the input form and one list per configured status.
    ///
    /// Components are built independently: a structural failure is logged
    /// and kept in [`ProjectBoard::startup_errors`], and the remaining
    /// components are still mounted.
    pub fn launch(mut document: Document, config: &BoardConfig, notifier: Rc<dyn Notifier>) -> Self {
        let store = ProjectStore::new();
        let mut startup_errors = Vec::new();

        let sink: Rc<dyn RecordSink> = Rc::new(store.clone());
        let input = match ProjectInput::mount(&mut document, &config.input, &config.host, notifier, sink)
        {
            Ok(input) => Some(input),
            Err(err) => {
                error!(component = "input", error = %err, "failed to mount component");
                startup_errors.push(err);
                None
            }
        };

        let mut lists = Vec::with_capacity(config.lists.len());
        for list_config in &config.lists {
            match ProjectList::mount(&mut document, list_config, &config.host, &config.item, &store) {
                Ok(list) => lists.push(list),
                Err(err) => {
                    error!(
                        component = "list",
                        status = %list_config.status,
                        error = %err,
                        "failed to mount component"
                    );
                    startup_errors.push(err);
                }
            }
        }

        info!(
            lists = lists.len(),
            input = input.is_some(),
            failures = startup_errors.len(),
            "board launched"
        );
        Self {
            document,
            config: config.clone(),
            store,
            input,
            lists,
            startup_errors,
        }
    }

    pub fn from_markup(
        markup: &str,
        config: &BoardConfig,
        notifier: Rc<dyn Notifier>,
    ) -> Result<Self, DomError> {
        let document = parse_document(markup)?;
        Ok(Self::launch(document, config, notifier))
    }

    /// The stock page with the stock configuration.
    pub fn with_defaults(notifier: Rc<dyn Notifier>) -> Result<Self, DomError> {
        Self::from_markup(DEFAULT_MARKUP, &BoardConfig::default(), notifier)
    }

    pub fn startup_errors(&self) -> &[StructuralError] {
        &self.startup_errors
    }

    pub fn is_ready(&self) -> bool {
        self.startup_errors.is_empty()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn input(&self) -> Option<&ProjectInput> {
        self.input.as_ref()
    }

    pub fn lists(&self) -> &[ProjectList] {
        &self.lists
    }

    pub fn list(&self, status: ProjectStatus) -> Option<&ProjectList> {
        self.lists.iter().find(|list| list.status() == status)
    }

    pub fn projects(&self) -> Vec<Project> {
        self.store.projects()
    }

    /// Type into a form control, replacing its value.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<(), BoardError> {
        let control = self.control(field)?;
        self.document.set_value(control, value)?;
        Ok(())
    }

    pub fn field_text(&self, field: FormField) -> Option<String> {
        let control = self.control(field).ok()?;
        self.document.value(control)
    }

    /// Dispatch a submit event at the form and report what the form did with it.
    pub fn submit(&mut self) -> Result<SubmitOutcome, BoardError> {
        let input = self.input.as_ref().ok_or(BoardError::InputUnavailable)?;
        let handler = input.submit_handler();
        let form = input.element();
        handler.take_last_outcome();
        self.document.dispatch_event(form, EventType::Submit)?;
        handler.take_last_outcome().ok_or(BoardError::SubmitNotHandled)
    }

    /// Click `node`.
    pub fn activate(&mut self, node: NodeId) -> Result<(), BoardError> {
        self.document.dispatch_event(node, EventType::Click)?;
        Ok(())
    }

    /// Click the rendered item of project `id`; false when it is not on the page.
    pub fn activate_project(&mut self, id: &str) -> Result<bool, BoardError> {
        let Some(node) = self.document.get_element_by_id(id) else {
            return Ok(false);
        };
        self.activate(node)?;
        Ok(true)
    }

    pub fn to_html(&self) -> String {
        self.document.to_html()
    }

    fn control(&self, field: FormField) -> Result<NodeId, BoardError> {
        self.input
            .as_ref()
            .map(|input| input.controls().control(field))
            .ok_or(BoardError::InputUnavailable)
    }
}
