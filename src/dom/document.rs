use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::DomError;
use super::event::Registration;
use super::selector::Selector;

/// Handle to a node in a [`Document`].
///
/// Ids carry a generation so a handle to a removed node never resolves to
/// whatever node later reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

/// Where an element lands relative to the target's existing children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    /// Before the first child.
    AfterBegin,
    /// After the last child.
    BeforeEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Element,
    Text,
    Fragment,
}

#[derive(Debug, Clone)]
pub(super) struct ElementData {
    pub(super) tag: String,
    pub(super) attributes: IndexMap<String, String>,
    pub(super) value: Option<String>,
    pub(super) content: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub(super) enum NodeData {
    Root,
    Element(ElementData),
    Text(String),
    Fragment,
}

#[derive(Debug, Clone)]
pub(super) struct Node {
    pub(super) data: NodeData,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// An in-memory HTML document.
///
/// Nodes live in an arena owned by the document; every operation addresses
/// them through [`NodeId`]s. Event listeners are stored alongside the tree
/// and dropped together with the node they were registered on.
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
    pub(super) listeners: HashMap<NodeId, Vec<Registration>>,
    pub(super) next_listener: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.node_count())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        let root = NodeId {
            index: 0,
            generation: 0,
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node {
                    data: NodeData::Root,
                    parent: None,
                    children: Vec::new(),
                }),
            }],
            free: Vec::new(),
            root,
            listeners: HashMap::new(),
            next_listener: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, detached ones included.
    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|node| match node.data {
            NodeData::Root => NodeKind::Root,
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Fragment => NodeKind::Fragment,
        })
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeData::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            attributes: IndexMap::new(),
            value: None,
            content: None,
        }))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(text.into()))
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeData::Fragment)
    }

    /// Turn `template` into a `<template>` by giving it an (empty) content fragment.
    pub(crate) fn attach_template_content(&mut self, template: NodeId) -> Result<NodeId, DomError> {
        self.element(template)?;
        let content = self.create_fragment();
        self.element_mut(template)?.content = Some(content);
        Ok(content)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.is_element(*child))
            .collect()
    }

    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.is_element(*child))
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Element))
    }

    /// Whether `id` is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).ok().map(|element| element.tag.as_str())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .ok()
            .and_then(|element| element.attributes.get(name))
            .map(String::as_str)
    }

    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.element(id)
            .ok()
            .into_iter()
            .flat_map(|element| element.attributes.iter())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        self.element_mut(id)?
            .attributes
            .insert(name.to_ascii_lowercase(), value.into());
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.element_mut(id)?.attributes.shift_remove(name))
    }

    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.attribute(id, "id")
    }

    pub fn set_id(&mut self, id: NodeId, value: impl Into<String>) -> Result<(), DomError> {
        self.set_attribute(id, "id", value)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .map(|classes| classes.split_whitespace().any(|candidate| candidate == class))
            .unwrap_or(false)
    }

    /// Concatenated text of `id` and all of its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        if let NodeData::Text(text) = &node.data {
            out.push_str(text);
            return;
        }
        for child in &node.children {
            self.collect_text(*child, out);
        }
    }

    /// Replace every child of `id` with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        if let NodeData::Text(existing) = &mut self.node_mut(id)?.data {
            *existing = text.to_string();
            return Ok(());
        }
        self.remove_children(id)?;
        if !text.is_empty() {
            let child = self.create_text(text);
            self.append_child(id, child)?;
        }
        Ok(())
    }

    /// Current value of a form control.
    ///
    /// A value written with [`Document::set_value`] wins; otherwise `<textarea>`
    /// reports its text and everything else its `value` attribute.
    pub fn value(&self, id: NodeId) -> Option<String> {
        let element = self.element(id).ok()?;
        if let Some(value) = &element.value {
            return Some(value.clone());
        }
        if element.tag == "textarea" {
            return Some(self.text_content(id));
        }
        Some(element.attributes.get("value").cloned().unwrap_or_default())
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> Result<(), DomError> {
        self.element_mut(id)?.value = Some(value.into());
        Ok(())
    }

    /// Content fragment of a `<template>` element.
    pub fn template_content(&self, id: NodeId) -> Option<NodeId> {
        self.element(id).ok().and_then(|element| element.content)
    }

    /// Clone `id` into a new, detached node. With `deep`, descendants and
    /// template contents are cloned too. Listeners are never copied.
    pub fn import_node(&mut self, id: NodeId, deep: bool) -> Result<NodeId, DomError> {
        let source = self.node(id).ok_or(DomError::StaleNode(id))?;
        let data = source.data.clone();
        let children = if deep {
            source.children.clone()
        } else {
            Vec::new()
        };

        let data = match data {
            NodeData::Root => NodeData::Fragment,
            NodeData::Element(mut element) => {
                element.content = match element.content {
                    Some(content) if deep => Some(self.import_node(content, true)?),
                    _ => None,
                };
                NodeData::Element(element)
            }
            other => other,
        };

        let clone = self.alloc(data);
        for child in children {
            let copy = self.import_node(child, true)?;
            self.link(clone, copy, None);
        }
        Ok(clone)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_child(parent, child, None)
    }

    /// Insert `element` into `target` at `position`.
    pub fn insert_adjacent_element(
        &mut self,
        target: NodeId,
        position: InsertPosition,
        element: NodeId,
    ) -> Result<(), DomError> {
        if !self.is_element(element) {
            return Err(DomError::NotAnElement(element));
        }
        let index = match position {
            InsertPosition::AfterBegin => Some(0),
            InsertPosition::BeforeEnd => None,
        };
        self.insert_child(target, element, index)
    }

    fn insert_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: Option<usize>,
    ) -> Result<(), DomError> {
        let parent_node = self.node(parent).ok_or(DomError::StaleNode(parent))?;
        if matches!(parent_node.data, NodeData::Text(_)) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        let child_node = self.node(child).ok_or(DomError::StaleNode(child))?;
        if matches!(child_node.data, NodeData::Root) || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        if matches!(child_node.data, NodeData::Fragment) {
            let moved = child_node.children.clone();
            for (offset, grandchild) in moved.into_iter().enumerate() {
                self.detach(grandchild);
                self.link(parent, grandchild, index.map(|at| at + offset));
            }
            return Ok(());
        }

        self.detach(child);
        self.link(parent, child, index);
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        if let Some(node) = self.raw_mut(parent) {
            match index {
                Some(at) if at < node.children.len() => node.children.insert(at, child),
                _ => node.children.push(child),
            }
        }
        if let Some(node) = self.raw_mut(child) {
            node.parent = Some(parent);
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.raw_mut(parent) {
            node.children.retain(|existing| *existing != child);
        }
        if let Some(node) = self.raw_mut(child) {
            node.parent = None;
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Remove and free every child of `id`. Returns how many children were removed.
    pub fn remove_children(&mut self, id: NodeId) -> Result<usize, DomError> {
        let children = self
            .node(id)
            .map(|node| node.children.clone())
            .ok_or(DomError::StaleNode(id))?;
        for child in &children {
            self.detach(*child);
            self.free_subtree(*child);
        }
        Ok(children.len())
    }

    /// Detach `id` from its parent and free it with its whole subtree.
    pub fn discard(&mut self, id: NodeId) -> Result<(), DomError> {
        if id == self.root {
            return Err(DomError::HierarchyRequest {
                parent: self.root,
                child: id,
            });
        }
        if !self.contains(id) {
            return Err(DomError::StaleNode(id));
        }
        self.detach(id);
        self.free_subtree(id);
        Ok(())
    }

    fn free_subtree(&mut self, id: NodeId) {
        let Some(node) = self.take(id) else {
            return;
        };
        self.listeners.remove(&id);
        if let NodeData::Element(ElementData {
            content: Some(content),
            ..
        }) = node.data
        {
            self.free_subtree(content);
        }
        for child in node.children {
            self.free_subtree(child);
        }
    }

    /// First connected element whose `id` attribute equals `value`, in document order.
    pub fn get_element_by_id(&self, value: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|node| self.element_id(*node) == Some(value))
    }

    /// Descendants of `id` in document order, `id` itself excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|node| selector.matches(self, *node)))
    }

    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .filter(|node| selector.matches(self, *node))
            .collect())
    }

    pub(super) fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.raw_mut(id).ok_or(DomError::StaleNode(id))
    }

    fn raw_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub(super) fn element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        match &self.node(id).ok_or(DomError::StaleNode(id))?.data {
            NodeData::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let node = Node {
            data,
            parent: None,
            children: Vec::new(),
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    fn take(&mut self, id: NodeId) -> Option<Node> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }
}
