use thiserror::Error;

use crate::dom::DomError;

/// Unrecoverable failure while building a component. It aborts that
/// component only; siblings mounted independently are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("template `#{0}` was not found")]
    TemplateNotFound(String),
    #[error("element `#{0}` is not a <template>")]
    NotATemplate(String),
    #[error("template `#{0}` has no element content")]
    EmptyTemplate(String),
    #[error("host element `#{0}` was not found")]
    HostNotFound(String),
    #[error("template `#{template}` has no part matching `{selector}`")]
    PartNotFound { template: String, selector: String },
    #[error(transparent)]
    Dom(#[from] DomError),
}
