#![deny(rust_2018_idioms)]

pub mod board;
pub mod component;
pub mod config;
pub mod dom;
pub mod io;
pub mod validation;

#[cfg(feature = "tui")]
mod app;
#[cfg(feature = "tui")]
pub mod presentation;

#[cfg(test)]
mod tests;

#[cfg(feature = "tui")]
pub use app::{ProjectBoardUi, UiOptions};
pub use board::{
    AlertQueue, BoardError, FormField, Notifier, Project, ProjectBoard, ProjectRecord,
    ProjectStatus, ProjectStore, ProjectsDocument, SubmitOutcome, TracingNotifier,
};
pub use component::{Component, ComponentBase, MountOptions, StructuralError, mount};
pub use config::{BoardConfig, DEFAULT_MARKUP, NumericCoercion, load_config_file, load_config_str};
pub use dom::{Document, DomError, InsertPosition, NodeId, parse_document};
pub use io::{DocumentFormat, OutputDestination, OutputOptions, emit, parse_document_str};
pub use validation::{Validatable, ValidationRules, validate};

pub mod prelude {
    #[cfg(feature = "tui")]
    pub use super::{ProjectBoardUi, UiOptions};
    pub use super::{BoardConfig, Component, ProjectBoard, Validatable, ValidationRules, validate};
}
