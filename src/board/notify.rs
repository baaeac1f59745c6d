use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::warn;

use crate::dom::Document;

use super::model::ProjectRecord;
use super::store::ProjectStore;

/// Blocking user notification.
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// Alerts waiting to be acknowledged, oldest first.
///
/// The terminal front end shows the front message as a modal and pops it
/// when the user dismisses it.
#[derive(Debug, Clone, Default)]
pub struct AlertQueue {
    pending: Rc<RefCell<VecDeque<String>>>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peek(&self) -> Option<String> {
        self.pending.borrow().front().cloned()
    }

    pub fn pop(&self) -> Option<String> {
        self.pending.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl Notifier for AlertQueue {
    fn alert(&self, message: &str) {
        self.pending.borrow_mut().push_back(message.to_string());
    }
}

/// Notifier for headless sessions: alerts only go to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        warn!(message, "alert");
    }
}

/// Consumer of accepted submissions.
pub trait RecordSink {
    fn accept(&self, doc: &mut Document, record: ProjectRecord);
}

impl RecordSink for ProjectStore {
    fn accept(&self, doc: &mut Document, record: ProjectRecord) {
        self.add_project(doc, record);
    }
}

/// Sink that only remembers what it was given.
#[derive(Debug, Clone, Default)]
pub struct RecordLog {
    records: Rc<RefCell<Vec<ProjectRecord>>>,
}

impl RecordLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ProjectRecord> {
        self.records.borrow().clone()
    }
}

impl RecordSink for RecordLog {
    fn accept(&self, _doc: &mut Document, record: ProjectRecord) {
        self.records.borrow_mut().push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_queue_is_fifo_and_shared_between_clones() {
        let queue = AlertQueue::new();
        let notifier: Rc<dyn Notifier> = Rc::new(queue.clone());
        notifier.alert("first");
        notifier.alert("second");

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek().as_deref(), Some("first"));
        assert_eq!(queue.pop().as_deref(), Some("first"));
        assert_eq!(queue.pop().as_deref(), Some("second"));
        assert!(queue.is_empty());
    }

    #[test]
    fn store_sink_adds_projects() {
        let mut doc = Document::new();
        let store = ProjectStore::new();
        store.accept(&mut doc, ProjectRecord::new("API", "Design the API", 3.0));
        assert_eq!(store.len(), 1);
    }
}
