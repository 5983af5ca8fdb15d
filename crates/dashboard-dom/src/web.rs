//! Browser backend: the widgets drive `web_sys` nodes directly.
//!
//! Click listeners are owned by a per-thread registry keyed by element, so
//! [`Element::clear_click_handlers`] can detach them and free their closures
//! when a widget rebuilds its nodes.

use std::cell::RefCell;

use dashboard_core::{DashboardError, DashboardResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::{Document, Element, Event};

type Listener = Closure<dyn FnMut(web_sys::Event)>;

thread_local! {
    static LISTENERS: RefCell<Vec<(web_sys::Element, Listener)>> = RefCell::new(Vec::new());
}

fn js_error_message(err: JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    if let Ok(error) = err.dyn_into::<js_sys::Error>() {
        return error.message().into();
    }
    "unknown JavaScript error".to_string()
}

fn dom_error(err: JsValue) -> DashboardError {
    DashboardError::Dom(js_error_message(err))
}

/// The page's `document`.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> DashboardResult<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or_else(|| DashboardError::Dom("no document available".to_string()))
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<web_sys::Element> {
        self.document.get_element_by_id(id)
    }
}

impl Document for WebDocument {
    type Node = web_sys::Element;

    fn create_element(&self, tag: &str) -> DashboardResult<web_sys::Element> {
        self.document.create_element(tag).map_err(dom_error)
    }
}

struct WebEvent(web_sys::Event);

impl Event for WebEvent {
    fn stop_propagation(&self) {
        self.0.stop_propagation();
    }
}

impl Element for web_sys::Element {
    fn tag_name(&self) -> String {
        web_sys::Element::tag_name(self).to_ascii_lowercase()
    }

    fn text(&self) -> String {
        web_sys::Node::text_content(self).unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        web_sys::Node::set_text_content(self, Some(text));
    }

    fn add_class(&self, class: &str) -> DashboardResult<()> {
        self.class_list().add_1(class).map_err(dom_error)
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn set_attribute(&self, name: &str, value: &str) -> DashboardResult<()> {
        web_sys::Element::set_attribute(self, name, value).map_err(dom_error)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        web_sys::Element::get_attribute(self, name)
    }

    fn append_child(&self, child: &Self) -> DashboardResult<()> {
        web_sys::Node::append_child(self, child)
            .map(|_| ())
            .map_err(dom_error)
    }

    fn remove_child(&self, child: &Self) -> DashboardResult<()> {
        web_sys::Node::remove_child(self, child)
            .map(|_| ())
            .map_err(dom_error)
    }

    fn first_child(&self) -> Option<Self> {
        self.first_element_child()
    }

    fn last_child(&self) -> Option<Self> {
        self.last_element_child()
    }

    fn children(&self) -> Vec<Self> {
        let collection = web_sys::Element::children(self);
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect()
    }

    fn query_selector(&self, selector: &str) -> DashboardResult<Option<Self>> {
        web_sys::Element::query_selector(self, selector)
            .map_err(|err| DashboardError::InvalidSelector(js_error_message(err)))
    }

    fn query_selector_all(&self, selector: &str) -> DashboardResult<Vec<Self>> {
        let list = web_sys::Element::query_selector_all(self, selector)
            .map_err(|err| DashboardError::InvalidSelector(js_error_message(err)))?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .collect())
    }

    fn on_click<F>(&self, handler: F) -> DashboardResult<()>
    where
        F: FnMut(&dyn Event) + 'static,
    {
        let mut handler = handler;
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            handler(&WebEvent(event));
        }) as Box<dyn FnMut(web_sys::Event)>);

        self.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        LISTENERS.with(|listeners| listeners.borrow_mut().push((self.clone(), closure)));
        Ok(())
    }

    fn clear_click_handlers(&self) {
        let removed: Vec<(web_sys::Element, Listener)> = LISTENERS.with(|listeners| {
            let mut listeners = listeners.borrow_mut();
            let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut *listeners)
                .into_iter()
                .partition(|(element, _)| element == self);
            *listeners = kept;
            removed
        });

        // Closures are dropped outside the registry borrow.
        for (element, listener) in removed {
            if let Err(err) =
                element.remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            {
                tracing::debug!("Failed to remove click listener: {}", js_error_message(err));
            }
        }
    }
}
