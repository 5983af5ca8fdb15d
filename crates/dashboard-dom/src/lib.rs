//! Rendering-tree API consumed by the dashboard widgets.
//!
//! Widgets only need a handful of node operations: create an element, set
//! its text, classes and attributes, move children around, find a node by
//! selector and react to clicks. [`Document`] and [`Element`] capture exactly
//! that, so the same widget code drives the in-memory tree used by the CLI
//! and tests ([`MemoryDocument`]) and the browser DOM on `wasm32`.

pub mod html;
pub mod memory;
pub mod selector;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::{MemoryDocument, MemoryNode};
pub use selector::Selector;

use dashboard_core::DashboardResult;

/// A click event as seen by a handler.
pub trait Event {
    /// Keep the event from reaching handlers on ancestor nodes.
    fn stop_propagation(&self);
}

/// Factory for nodes of one tree.
pub trait Document: Clone + 'static {
    type Node: Element;

    fn create_element(&self, tag: &str) -> DashboardResult<Self::Node>;
}

/// Handle to an element node. Clones refer to the same node.
pub trait Element: Clone + 'static {
    /// Lowercase tag name.
    fn tag_name(&self) -> String;

    /// Text of the node and all its descendants.
    fn text(&self) -> String;

    /// Replace all children with `text`.
    fn set_text(&self, text: &str);

    fn set_id(&self, id: &str) -> DashboardResult<()> {
        self.set_attribute("id", id)
    }

    fn add_class(&self, class: &str) -> DashboardResult<()>;

    fn has_class(&self, class: &str) -> bool;

    fn set_attribute(&self, name: &str, value: &str) -> DashboardResult<()>;

    fn attribute(&self, name: &str) -> Option<String>;

    /// Append `child`, detaching it from its current parent first.
    fn append_child(&self, child: &Self) -> DashboardResult<()>;

    fn remove_child(&self, child: &Self) -> DashboardResult<()>;

    fn first_child(&self) -> Option<Self>;

    fn last_child(&self) -> Option<Self>;

    fn children(&self) -> Vec<Self>;

    /// First descendant matching `selector`, in document order.
    fn query_selector(&self, selector: &str) -> DashboardResult<Option<Self>>;

    /// All descendants matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> DashboardResult<Vec<Self>>;

    fn on_click<F>(&self, handler: F) -> DashboardResult<()>
    where
        F: FnMut(&dyn Event) + 'static;

    /// Drop every click handler registered on this node.
    fn clear_click_handlers(&self);
}
