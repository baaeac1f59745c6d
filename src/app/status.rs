use crate::board::{ProjectStatus, ValidationRejection};

#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Fill in the form and press Enter to add a project.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn record_added(&mut self, title: &str) {
        self.message = format!("Added project \"{title}\"");
    }

    pub fn rejected(&mut self, rejection: &ValidationRejection) {
        self.message = format!("Not added: {rejection}");
    }

    pub fn moved(&mut self, title: &str, status: ProjectStatus) {
        self.message = format!("Moved \"{title}\" to {status}");
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
