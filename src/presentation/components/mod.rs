mod alert;
mod body;
mod footer;
mod form;
mod layout;
mod lists;

pub use alert::render_alert;
pub use body::render_body;
pub use footer::{HELP_TEXT, render_footer};
pub use form::cursor_position;
