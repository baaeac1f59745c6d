mod board_ui;
mod focus;
mod input;
mod options;
mod runtime;
mod status;
mod terminal;

pub use board_ui::ProjectBoardUi;
pub use options::UiOptions;
