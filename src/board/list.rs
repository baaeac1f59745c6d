use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error};

use crate::component::{Component, ComponentBase, MountOptions, StructuralError, mount};
use crate::config::{ItemConfig, ListConfig};
use crate::dom::{Document, NodeId};

use super::item::ProjectItem;
use super::model::{Project, ProjectStatus};
use super::store::{ProjectStore, WeakProjectStore};

/// Rebuilds a list's `<ul>` from a store snapshot.
#[derive(Debug, Clone)]
struct ItemRenderer {
    status: ProjectStatus,
    list: NodeId,
    list_id: String,
    item: ItemConfig,
    store: WeakProjectStore,
    items: Rc<RefCell<Vec<ProjectItem>>>,
}

impl ItemRenderer {
    fn render(&self, doc: &mut Document, projects: &[Project]) {
        if let Err(err) = doc.remove_children(self.list) {
            error!(list = %self.list_id, error = %err, "list element is gone");
            return;
        }
        let mut items = self.items.borrow_mut();
        items.clear();
        for project in projects.iter().filter(|project| project.status == self.status) {
            match ProjectItem::mount(
                doc,
                &self.item,
                &self.list_id,
                project.clone(),
                self.store.clone(),
            ) {
                Ok(item) => items.push(item),
                Err(err) => error!(project = %project.id, error = %err, "failed to render project"),
            }
        }
        debug!(list = %self.list_id, count = items.len(), "list rendered");
    }
}

/// A list of projects sharing one status.
#[derive(Debug)]
pub struct ProjectList {
    base: ComponentBase,
    heading: NodeId,
    heading_text: String,
    renderer: ItemRenderer,
}

impl ProjectList {
    pub fn mount(
        doc: &mut Document,
        config: &ListConfig,
        host: &str,
        item: &ItemConfig,
        store: &ProjectStore,
    ) -> Result<Self, StructuralError> {
        let status = config.status;
        let options = MountOptions::new(config.template.as_str(), host, config.position)
            .with_element_id(format!("{status}-projects"));
        mount(doc, &options, |doc, base| {
            let heading = base.part(doc, "h2")?;
            let list = base.part(doc, "ul")?;
            Ok(Self {
                base,
                heading,
                heading_text: config.heading_text(),
                renderer: ItemRenderer {
                    status,
                    list,
                    list_id: format!("{status}-projects-list"),
                    item: item.clone(),
                    store: store.downgrade(),
                    items: Rc::new(RefCell::new(Vec::new())),
                },
            })
        })
    }

    pub fn status(&self) -> ProjectStatus {
        self.renderer.status
    }

    /// The `<ul>` holding the rendered items.
    pub fn list_element(&self) -> NodeId {
        self.renderer.list
    }

    pub fn heading(&self) -> &str {
        &self.heading_text
    }

    /// Projects currently rendered, in order.
    pub fn projects(&self) -> Vec<Project> {
        self.renderer
            .items
            .borrow()
            .iter()
            .map(|item| item.project().clone())
            .collect()
    }

    /// Rendered item elements, in order.
    pub fn item_elements(&self) -> Vec<NodeId> {
        self.renderer
            .items
            .borrow()
            .iter()
            .map(|item| item.element())
            .collect()
    }
}

impl Component for ProjectList {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn configure(&mut self, _doc: &mut Document) -> Result<(), StructuralError> {
        if let Some(store) = self.renderer.store.upgrade() {
            let renderer = self.renderer.clone();
            store.subscribe(move |doc, projects| renderer.render(doc, projects));
        }
        Ok(())
    }

    fn render_content(&mut self, doc: &mut Document) -> Result<(), StructuralError> {
        doc.set_id(self.renderer.list, self.renderer.list_id.as_str())?;
        doc.set_text_content(self.heading, &self.heading_text)?;
        if let Some(store) = self.renderer.store.upgrade() {
            let projects = store.projects();
            if !projects.is_empty() {
                self.renderer.render(doc, &projects);
            }
        }
        Ok(())
    }
}
