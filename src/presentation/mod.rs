mod components;
mod snapshot;
mod view;

pub use components::HELP_TEXT;
pub use components::cursor_position;
pub use snapshot::{FieldView, ItemView, ListView, PageView};
pub use view::{UiContext, draw};
