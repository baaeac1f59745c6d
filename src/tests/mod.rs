#[cfg(feature = "tui")]
mod presentation;
