use std::time::Duration;

/// Knobs for the terminal front end.
#[derive(Debug, Clone)]
pub struct UiOptions {
    /// How long to wait for a key before redrawing.
    pub tick_rate: Duration,
    pub show_help: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            show_help: true,
        }
    }
}

impl UiOptions {
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }
}
