use std::fmt;
use std::rc::Rc;

use super::{Document, DomError, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Submit,
    Click,
    Input,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Submit => "submit",
            EventType::Click => "click",
            EventType::Input => "input",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dispatched event. Listeners receive it mutably and may cancel the
/// default action or stop it from bubbling further.
#[derive(Debug, Clone)]
pub struct Event {
    kind: EventType,
    target: NodeId,
    current_target: NodeId,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    fn new(kind: EventType, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn kind(&self) -> EventType {
        self.kind
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn current_target(&self) -> NodeId {
        self.current_target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

pub(crate) type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;

pub(super) struct Registration {
    id: u64,
    kind: EventType,
    listener: Listener,
}

/// Identifies a registered listener so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    node: NodeId,
    id: u64,
}

impl ListenerHandle {
    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl Document {
    /// Register `listener` for `kind` events reaching `node`.
    ///
    /// The closure gets the document back on every call, so it can capture
    /// component state without holding a borrow of the tree.
    pub fn add_event_listener<F>(
        &mut self,
        node: NodeId,
        kind: EventType,
        listener: F,
    ) -> Result<ListenerHandle, DomError>
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        if !self.contains(node) {
            return Err(DomError::StaleNode(node));
        }
        self.next_listener += 1;
        let id = self.next_listener;
        self.listeners.entry(node).or_default().push(Registration {
            id,
            kind,
            listener: Rc::new(listener),
        });
        Ok(ListenerHandle { node, id })
    }

    pub fn remove_event_listener(&mut self, handle: ListenerHandle) -> bool {
        let Some(registrations) = self.listeners.get_mut(&handle.node) else {
            return false;
        };
        let before = registrations.len();
        registrations.retain(|registration| registration.id != handle.id);
        let removed = registrations.len() != before;
        if registrations.is_empty() {
            self.listeners.remove(&handle.node);
        }
        removed
    }

    pub fn listener_count(&self, node: NodeId, kind: EventType) -> usize {
        self.listeners
            .get(&node)
            .map(|registrations| {
                registrations
                    .iter()
                    .filter(|registration| registration.kind == kind)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Dispatch `kind` at `target` and bubble it up to the root.
    ///
    /// The propagation path is fixed before any listener runs; nodes a
    /// listener detaches still see the event.
    pub fn dispatch_event(&mut self, target: NodeId, kind: EventType) -> Result<Event, DomError> {
        if !self.contains(target) {
            return Err(DomError::StaleNode(target));
        }
        let mut path = vec![target];
        let mut current = self.parent(target);
        while let Some(node) = current {
            path.push(node);
            current = self.parent(node);
        }

        let mut event = Event::new(kind, target);
        for node in path {
            let listeners: Vec<Listener> = self
                .listeners
                .get(&node)
                .map(|registrations| {
                    registrations
                        .iter()
                        .filter(|registration| registration.kind == kind)
                        .map(|registration| Rc::clone(&registration.listener))
                        .collect()
                })
                .unwrap_or_default();
            event.current_target = node;
            for listener in listeners {
                listener(self, &mut event);
            }
            if event.propagation_stopped {
                break;
            }
        }
        event.current_target = target;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn events_bubble_from_target_to_root() {
        let mut doc = Document::new();
        let form = doc.create_element("form");
        let button = doc.create_element("button");
        doc.append_child(doc.root(), form).unwrap();
        doc.append_child(form, button).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        for node in [button, form, doc.root()] {
            let seen = Rc::clone(&seen);
            doc.add_event_listener(node, EventType::Click, move |_, event| {
                seen.borrow_mut().push(event.current_target());
            })
            .unwrap();
        }

        let event = doc.dispatch_event(button, EventType::Click).unwrap();
        assert_eq!(*seen.borrow(), vec![button, form, doc.root()]);
        assert_eq!(event.target(), button);
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn stop_propagation_halts_bubbling() {
        let mut doc = Document::new();
        let form = doc.create_element("form");
        doc.append_child(doc.root(), form).unwrap();
        let reached_root = Rc::new(RefCell::new(false));

        doc.add_event_listener(form, EventType::Submit, |_, event| {
            event.prevent_default();
            event.stop_propagation();
        })
        .unwrap();
        let flag = Rc::clone(&reached_root);
        doc.add_event_listener(doc.root(), EventType::Submit, move |_, _| {
            *flag.borrow_mut() = true;
        })
        .unwrap();

        let event = doc.dispatch_event(form, EventType::Submit).unwrap();
        assert!(event.is_default_prevented());
        assert!(!*reached_root.borrow());
    }

    #[test]
    fn listeners_filter_by_event_type_and_can_be_removed() {
        let mut doc = Document::new();
        let form = doc.create_element("form");
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let handle = doc
            .add_event_listener(form, EventType::Submit, move |_, _| {
                *counter.borrow_mut() += 1;
            })
            .unwrap();

        doc.dispatch_event(form, EventType::Click).unwrap();
        assert_eq!(*count.borrow(), 0);
        doc.dispatch_event(form, EventType::Submit).unwrap();
        assert_eq!(*count.borrow(), 1);

        assert!(doc.remove_event_listener(handle));
        assert!(!doc.remove_event_listener(handle));
        doc.dispatch_event(form, EventType::Submit).unwrap();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn listeners_may_mutate_the_document() {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        doc.append_child(doc.root(), list).unwrap();
        let item = doc.create_element("li");
        doc.append_child(list, item).unwrap();

        doc.add_event_listener(item, EventType::Click, move |doc, _| {
            doc.remove_children(list).unwrap();
        })
        .unwrap();

        doc.dispatch_event(item, EventType::Click).unwrap();
        assert!(doc.children(list).is_empty());
        assert!(!doc.contains(item));
    }

    #[test]
    fn dispatch_on_stale_node_fails() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        doc.discard(node).unwrap();
        assert_eq!(
            doc.dispatch_event(node, EventType::Click).unwrap_err(),
            DomError::StaleNode(node)
        );
    }
}
