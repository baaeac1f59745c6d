use tracing::{debug, warn};

use crate::dom::{Document, InsertPosition, NodeId};

use super::StructuralError;

/// Where a component comes from and where it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountOptions {
    pub template_id: String,
    pub host_id: String,
    pub position: InsertPosition,
    pub element_id: Option<String>,
}

impl MountOptions {
    pub fn new(
        template_id: impl Into<String>,
        host_id: impl Into<String>,
        position: InsertPosition,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            host_id: host_id.into(),
            position,
            element_id: None,
        }
    }

    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }
}

/// The attached clone of a template plus the handles it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentBase {
    template_id: String,
    template: NodeId,
    host: NodeId,
    element: NodeId,
}

impl ComponentBase {
    /// Resolve template and host, clone the template's first element and
    /// insert it into the host.
    ///
    /// Every lookup happens before anything is cloned, so an error leaves
    /// the document untouched.
    pub fn attach(doc: &mut Document, options: &MountOptions) -> Result<Self, StructuralError> {
        let template_id = options.template_id.as_str();
        let template = doc
            .get_element_by_id(template_id)
            .ok_or_else(|| StructuralError::TemplateNotFound(template_id.to_string()))?;
        let content = doc
            .template_content(template)
            .ok_or_else(|| StructuralError::NotATemplate(template_id.to_string()))?;
        let source = doc
            .first_element_child(content)
            .ok_or_else(|| StructuralError::EmptyTemplate(template_id.to_string()))?;
        let host = doc
            .get_element_by_id(&options.host_id)
            .ok_or_else(|| StructuralError::HostNotFound(options.host_id.clone()))?;

        let element = doc.import_node(source, true)?;
        if let Some(id) = &options.element_id {
            doc.set_id(element, id.as_str())?;
        }
        doc.insert_adjacent_element(host, options.position, element)?;
        debug!(
            template = template_id,
            host = %options.host_id,
            element = %element,
            "component attached"
        );

        Ok(Self {
            template_id: template_id.to_string(),
            template,
            host,
            element,
        })
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn template(&self) -> NodeId {
        self.template
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    /// First element inside the rendered subtree matching `selector`.
    pub fn part(&self, doc: &Document, selector: &str) -> Result<NodeId, StructuralError> {
        doc.query_selector(self.element, selector)?
            .ok_or_else(|| StructuralError::PartNotFound {
                template: self.template_id.clone(),
                selector: selector.to_string(),
            })
    }
}

/// A concrete component built on a [`ComponentBase`].
///
/// Both hooks default to doing nothing; [`mount`] calls each exactly once.
pub trait Component {
    fn base(&self) -> &ComponentBase;

    fn element(&self) -> NodeId {
        self.base().element()
    }

    /// Wire event listeners.
    fn configure(&mut self, _doc: &mut Document) -> Result<(), StructuralError> {
        Ok(())
    }

    /// Populate text and ids.
    fn render_content(&mut self, _doc: &mut Document) -> Result<(), StructuralError> {
        Ok(())
    }
}

/// Attach a template, let `build` resolve the component's parts, then run
/// `configure` followed by `render_content`.
///
/// If `build` or a hook fails the rendered element is removed again, so a
/// failing component never leaves a half-built subtree behind.
pub fn mount<C, F>(doc: &mut Document, options: &MountOptions, build: F) -> Result<C, StructuralError>
where
    C: Component,
    F: FnOnce(&mut Document, ComponentBase) -> Result<C, StructuralError>,
{
    let base = ComponentBase::attach(doc, options)?;
    let element = base.element();
    let result = build(doc, base).and_then(|mut component| {
        component.configure(doc)?;
        component.render_content(doc)?;
        Ok(component)
    });
    if let Err(err) = &result {
        warn!(template = %options.template_id, error = %err, "mount failed; removing element");
        if let Err(discard) = doc.discard(element) {
            warn!(element = %element, error = %discard, "could not remove failed component");
        }
    }
    result
}
