//! In-memory document tree.
//!
//! Nodes are reference-counted handles with weak parent links, so a widget
//! can hold on to a node while the tree keeps changing around it. Click
//! handlers run synchronously from [`MemoryNode::click`] and may rebuild any
//! part of the tree, including the node that was clicked.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use dashboard_core::{DashboardError, DashboardResult};

use crate::selector::Selector;
use crate::{Document, Element, Event};

type ClickHandler = Rc<RefCell<dyn FnMut(&dyn Event)>>;

struct NodeData {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<MemoryNode>,
    parent: Weak<RefCell<NodeData>>,
    handlers: Vec<ClickHandler>,
}

/// Handle to a node of the in-memory tree.
#[derive(Clone)]
pub struct MemoryNode(Rc<RefCell<NodeData>>);

impl PartialEq for MemoryNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for MemoryNode {}

impl std::fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("MemoryNode")
            .field("tag", &data.tag)
            .field("classes", &data.classes)
            .field("attributes", &data.attributes)
            .field("children", &data.children.len())
            .finish()
    }
}

impl MemoryNode {
    fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            parent: Weak::new(),
            handlers: Vec::new(),
        })))
    }

    pub fn parent(&self) -> Option<MemoryNode> {
        self.0.borrow().parent.upgrade().map(MemoryNode)
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    /// Attributes other than `class`, in insertion order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.0.borrow().attributes.clone()
    }

    /// Text set directly on this node, excluding descendants.
    pub fn own_text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    pub fn handler_count(&self) -> usize {
        self.0.borrow().handlers.len()
    }

    /// Whether `self` is `other` or one of its ancestors.
    pub fn contains(&self, other: &MemoryNode) -> bool {
        let mut cursor = Some(other.clone());
        while let Some(node) = cursor {
            if node == *self {
                return true;
            }
            cursor = node.parent();
        }
        false
    }

    /// Dispatch a click at this node.
    ///
    /// The propagation path (this node, then its ancestors) is fixed before
    /// any handler runs. Every handler of a node runs; bubbling stops after
    /// the first node whose handler called `stop_propagation`.
    pub fn click(&self) {
        let event = MemoryEvent::default();

        let mut path = vec![self.clone()];
        let mut cursor = self.parent();
        while let Some(node) = cursor {
            cursor = node.parent();
            path.push(node);
        }

        for node in path {
            let handlers = node.0.borrow().handlers.clone();
            for handler in handlers {
                match handler.try_borrow_mut() {
                    Ok(mut handler) => (&mut *handler)(&event),
                    Err(_) => tracing::warn!(
                        "Skipping click handler on <{}> that is already running",
                        Element::tag_name(&node)
                    ),
                }
            }
            if event.stopped.get() {
                break;
            }
        }
    }

    fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.0.borrow_mut().children.retain(|child| child != self);
        }
        self.0.borrow_mut().parent = Weak::new();
    }

    fn descendants(&self, out: &mut Vec<MemoryNode>) {
        for child in self.children() {
            out.push(child.clone());
            child.descendants(out);
        }
    }
}

impl crate::selector::SelectorTarget for MemoryNode {
    fn tag_name(&self) -> String {
        Element::tag_name(self)
    }

    fn has_class(&self, class: &str) -> bool {
        Element::has_class(self, class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        Element::attribute(self, name)
    }

    fn parent(&self) -> Option<Self> {
        MemoryNode::parent(self)
    }
}

impl Element for MemoryNode {
    fn tag_name(&self) -> String {
        self.0.borrow().tag.clone()
    }

    fn text(&self) -> String {
        let mut text = self.own_text();
        for child in self.children() {
            text.push_str(&child.text());
        }
        text
    }

    fn set_text(&self, text: &str) {
        for child in self.children() {
            child.detach();
        }
        self.0.borrow_mut().text = text.to_string();
    }

    fn add_class(&self, class: &str) -> DashboardResult<()> {
        if class.is_empty() || class.chars().any(char::is_whitespace) {
            return Err(DashboardError::Dom(format!("invalid class name {class:?}")));
        }
        let mut data = self.0.borrow_mut();
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn set_attribute(&self, name: &str, value: &str) -> DashboardResult<()> {
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == '=' || c == '"') {
            return Err(DashboardError::Dom(format!("invalid attribute name {name:?}")));
        }

        let mut data = self.0.borrow_mut();
        if name == "class" {
            data.classes = value.split_whitespace().map(str::to_string).collect();
            return Ok(());
        }
        match data.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => data.attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        let data = self.0.borrow();
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.join(" "));
        }
        data.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn append_child(&self, child: &Self) -> DashboardResult<()> {
        if child.contains(self) {
            tracing::debug!(
                "Rejected appending <{}> into its own subtree",
                Element::tag_name(child)
            );
            return Err(DashboardError::Dom(
                "cannot append a node to itself or its descendant".to_string(),
            ));
        }
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
        Ok(())
    }

    fn remove_child(&self, child: &Self) -> DashboardResult<()> {
        if child.parent().as_ref() != Some(self) {
            return Err(DashboardError::Dom("node is not a child".to_string()));
        }
        child.detach();
        Ok(())
    }

    fn first_child(&self) -> Option<Self> {
        self.0.borrow().children.first().cloned()
    }

    fn last_child(&self) -> Option<Self> {
        self.0.borrow().children.last().cloned()
    }

    fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    fn query_selector(&self, selector: &str) -> DashboardResult<Option<Self>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    fn query_selector_all(&self, selector: &str) -> DashboardResult<Vec<Self>> {
        let selector = Selector::parse(selector)?;
        let mut nodes = Vec::new();
        self.descendants(&mut nodes);
        nodes.retain(|node| selector.matches(node));
        Ok(nodes)
    }

    fn on_click<F>(&self, handler: F) -> DashboardResult<()>
    where
        F: FnMut(&dyn Event) + 'static,
    {
        let handler: ClickHandler = Rc::new(RefCell::new(handler));
        self.0.borrow_mut().handlers.push(handler);
        Ok(())
    }

    fn clear_click_handlers(&self) {
        self.0.borrow_mut().handlers.clear();
    }
}

#[derive(Default)]
struct MemoryEvent {
    stopped: Cell<bool>,
}

impl Event for MemoryEvent {
    fn stop_propagation(&self) {
        self.stopped.set(true);
    }
}

/// Factory for [`MemoryNode`]s.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument;

impl MemoryDocument {
    pub fn new() -> Self {
        Self
    }
}

impl Document for MemoryDocument {
    type Node = MemoryNode;

    fn create_element(&self, tag: &str) -> DashboardResult<MemoryNode> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DashboardError::Dom(format!("invalid tag name {tag:?}")));
        }
        Ok(MemoryNode::new(tag))
    }
}
