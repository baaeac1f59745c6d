use tracing::debug;

use crate::component::{Component, ComponentBase, MountOptions, StructuralError, mount};
use crate::config::ItemConfig;
use crate::dom::{Document, EventType, InsertPosition, NodeId};

use super::model::Project;
use super::store::WeakProjectStore;

/// One rendered project inside a list.
///
/// Clicking it moves the project to the other list.
#[derive(Debug)]
pub struct ProjectItem {
    base: ComponentBase,
    project: Project,
    store: WeakProjectStore,
    title: NodeId,
    effort: NodeId,
    description: NodeId,
}

impl ProjectItem {
    pub fn mount(
        doc: &mut Document,
        config: &ItemConfig,
        host_id: &str,
        project: Project,
        store: WeakProjectStore,
    ) -> Result<Self, StructuralError> {
        let options = MountOptions::new(config.template.as_str(), host_id, InsertPosition::BeforeEnd)
            .with_element_id(project.id.as_str());
        mount(doc, &options, |doc, base| {
            Ok(Self {
                title: base.part(doc, "h2")?,
                effort: base.part(doc, "h3")?,
                description: base.part(doc, "p")?,
                base,
                project,
                store,
            })
        })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }
}

impl Component for ProjectItem {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn configure(&mut self, doc: &mut Document) -> Result<(), StructuralError> {
        let id = self.project.id.clone();
        let target = self.project.status.toggled();
        let store = self.store.clone();
        doc.add_event_listener(self.element(), EventType::Click, move |doc, _| {
            match store.upgrade() {
                Some(store) => {
                    store.move_project(doc, &id, target);
                }
                None => debug!(id = %id, "store dropped; click ignored"),
            }
        })?;
        Ok(())
    }

    fn render_content(&mut self, doc: &mut Document) -> Result<(), StructuralError> {
        doc.set_text_content(self.title, &self.project.title)?;
        doc.set_text_content(self.effort, &self.project.effort_label())?;
        doc.set_text_content(self.description, &self.project.description)?;
        Ok(())
    }
}
