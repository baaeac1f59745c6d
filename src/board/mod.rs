//! The project board: an entry form, one list per project status and the
//! shared store that keeps them in sync.

mod input;
mod item;
mod list;
mod model;
mod notify;
mod session;
mod store;

pub use input::{
    FormControls, FormField, ProjectInput, RejectionReason, SubmitHandler, SubmitOutcome,
    ValidationRejection,
};
pub use item::ProjectItem;
pub use list::ProjectList;
pub use model::{Project, ProjectRecord, ProjectStatus, ProjectsDocument};
pub use notify::{AlertQueue, Notifier, RecordLog, RecordSink, TracingNotifier};
pub use session::{BoardError, ProjectBoard};
pub use store::{ProjectStore, WeakProjectStore};
