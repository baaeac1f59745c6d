use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, info};

use crate::dom::Document;

use super::model::{Project, ProjectRecord, ProjectStatus};

type StoreListener = Rc<dyn Fn(&mut Document, &[Project])>;

#[derive(Default)]
struct StoreState {
    projects: Vec<Project>,
    listeners: Vec<StoreListener>,
    next_id: u64,
}

/// Shared, single-threaded project state.
///
/// Clones are handles to the same store. Listeners run after every change,
/// once the store borrow has been released, so they may read the store
/// again.
#[derive(Clone, Default)]
pub struct ProjectStore {
    inner: Rc<RefCell<StoreState>>,
}

impl fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("ProjectStore")
            .field("projects", &state.projects)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` as a new active project and notify listeners.
    pub fn add_project(&self, doc: &mut Document, record: ProjectRecord) -> Project {
        let project = {
            let mut state = self.inner.borrow_mut();
            state.next_id += 1;
            let project = Project::from_record(format!("project-{}", state.next_id), record);
            state.projects.push(project.clone());
            project
        };
        info!(id = %project.id, title = %project.title, manday = project.manday, "project added");
        self.notify(doc);
        project
    }

    /// Change the status of project `id`. Unknown ids and unchanged
    /// statuses are ignored without notifying anyone.
    pub fn move_project(&self, doc: &mut Document, id: &str, status: ProjectStatus) -> bool {
        let moved = {
            let mut state = self.inner.borrow_mut();
            match state.projects.iter_mut().find(|project| project.id == id) {
                Some(project) if project.status != status => {
                    project.status = status;
                    true
                }
                _ => false,
            }
        };
        if moved {
            debug!(id, status = %status, "project moved");
            self.notify(doc);
        }
        moved
    }

    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&mut Document, &[Project]) + 'static,
    {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    pub fn projects(&self) -> Vec<Project> {
        self.inner.borrow().projects.clone()
    }

    pub fn project(&self, id: &str) -> Option<Project> {
        self.inner
            .borrow()
            .projects
            .iter()
            .find(|project| project.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn downgrade(&self) -> WeakProjectStore {
        WeakProjectStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn notify(&self, doc: &mut Document) {
        let (projects, listeners) = {
            let state = self.inner.borrow();
            (state.projects.clone(), state.listeners.clone())
        };
        for listener in listeners {
            listener(doc, &projects);
        }
    }
}

/// Non-owning store handle for closures the store itself keeps alive.
#[derive(Debug, Clone, Default)]
pub struct WeakProjectStore {
    inner: Weak<RefCell<StoreState>>,
}

impl WeakProjectStore {
    pub fn upgrade(&self) -> Option<ProjectStore> {
        self.inner.upgrade().map(|inner| ProjectStore { inner })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn ids_are_sequential_and_projects_start_active() {
        let mut doc = Document::new();
        let store = ProjectStore::new();
        let first = store.add_project(&mut doc, ProjectRecord::new("A", "first one", 1.0));
        let second = store.add_project(&mut doc, ProjectRecord::new("B", "second one", 2.0));
        assert_eq!(first.id, "project-1");
        assert_eq!(second.id, "project-2");
        assert!(store.projects().iter().all(|p| p.status == ProjectStatus::Active));
    }

    #[test]
    fn listeners_see_released_store_and_skip_noop_moves() {
        let mut doc = Document::new();
        let store = ProjectStore::new();
        let calls = Rc::new(Cell::new(0));
        let weak = store.downgrade();
        let counter = Rc::clone(&calls);
        store.subscribe(move |_, projects| {
            counter.set(counter.get() + 1);
            let store = weak.upgrade().unwrap();
            assert_eq!(store.len(), projects.len());
        });

        let project = store.add_project(&mut doc, ProjectRecord::new("A", "first one", 1.0));
        assert_eq!(calls.get(), 1);
        assert!(!store.move_project(&mut doc, &project.id, ProjectStatus::Active));
        assert!(!store.move_project(&mut doc, "project-99", ProjectStatus::Finished));
        assert_eq!(calls.get(), 1);
        assert!(store.move_project(&mut doc, &project.id, ProjectStatus::Finished));
        assert_eq!(calls.get(), 2);
        assert_eq!(
            store.project(&project.id).map(|p| p.status),
            Some(ProjectStatus::Finished)
        );
    }

    #[test]
    fn weak_handle_does_not_keep_store_alive() {
        let store = ProjectStore::new();
        let weak = store.downgrade();
        assert!(weak.upgrade().is_some());
        drop(store);
        assert!(weak.upgrade().is_none());
    }
}
