//! Pagination control.
//!
//! The control is rebuilt from scratch on every render: the `ul.pagination`
//! node under the container is reused, its children are cleared and a fresh
//! set of handles is created from the current [`PageWindow`]. Clicking a
//! handle renders the control for the new page and then notifies the
//! caller, so the caller always sees the new control before its own refresh.
//!
//! [`PageWindow`]: dashboard_core::PageWindow

use std::rc::Rc;

use dashboard_core::{DashboardResult, PaginationConfig};
use dashboard_dom::{Document, Element};

use crate::nodes::{clear_node, element_with_classes};

pub const PREVIOUS_LABEL: &str = "\u{ab}";
pub const NEXT_LABEL: &str = "\u{bb}";
pub const ELLIPSIS_LABEL: &str = "\u{2026}";

const PAGINATION_SELECTOR: &str = "ul.pagination";
const ACTIVE_CLASS: &str = "active";
const ACTIVE_SELECTOR: &str = "a.active";
const INDEX_ATTRIBUTE: &str = "data-index";

/// Pagination controller bound to a container.
pub struct Pagination<D: Document> {
    document: D,
    container: D::Node,
    config: PaginationConfig,
    on_change: Rc<dyn Fn(usize)>,
}

impl<D: Document> Clone for Pagination<D> {
    fn clone(&self) -> Self {
        Self {
            document: self.document.clone(),
            container: self.container.clone(),
            config: self.config,
            on_change: Rc::clone(&self.on_change),
        }
    }
}

impl<D: Document> Pagination<D> {
    /// `on_change` receives the newly selected page index after each click.
    pub fn new<F>(document: D, container: D::Node, config: PaginationConfig, on_change: F) -> Self
    where
        F: Fn(usize) + 'static,
    {
        Self {
            document,
            container,
            config,
            on_change: Rc::new(on_change),
        }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Render the control for `data_count` records with `current_index`
    /// active.
    ///
    /// Returns `None` without touching the container when everything fits on
    /// one page.
    pub fn render(&self, data_count: usize, current_index: usize) -> DashboardResult<Option<D::Node>> {
        if !self.config.needs_pagination(data_count) {
            return Ok(None);
        }

        let window = self.config.window(data_count, current_index);
        if window.current != current_index {
            tracing::warn!(
                "Page {} out of range for {} pages, showing page {}",
                current_index,
                window.page_count,
                window.current
            );
        }
        tracing::debug!(
            "Rendering pagination: pages {}..{} of {}, current {}",
            window.start,
            window.end,
            window.page_count,
            window.current
        );

        let list = match self.container.query_selector(PAGINATION_SELECTOR)? {
            Some(list) => list,
            None => {
                let list = element_with_classes(&self.document, "ul", &["pagination"])?;
                self.container.append_child(&list)?;
                list
            }
        };
        clear_node(&list)?;

        let previous = self.add_handle(&list, PREVIOUS_LABEL)?;
        let controller = self.clone();
        let active_list = list.clone();
        previous.on_click(move |event| {
            if let Some(index) = active_index(&active_list) {
                if index > 0 {
                    controller.select(data_count, index - 1);
                }
            }
            event.stop_propagation();
        })?;

        if window.show_leading_ellipsis() {
            self.add_handle(&list, ELLIPSIS_LABEL)?;
        }

        for index in window.pages() {
            let handle = self.add_handle(&list, &(index + 1).to_string())?;
            handle.set_attribute(INDEX_ATTRIBUTE, &index.to_string())?;
            if window.is_active(index) {
                handle.add_class(ACTIVE_CLASS)?;
            }

            let controller = self.clone();
            handle.on_click(move |event| {
                controller.select(data_count, index);
                event.stop_propagation();
            })?;
        }

        if window.show_trailing_ellipsis() {
            self.add_handle(&list, ELLIPSIS_LABEL)?;
        }

        let next = self.add_handle(&list, NEXT_LABEL)?;
        let controller = self.clone();
        let active_list = list.clone();
        let page_count = window.page_count;
        next.on_click(move |event| {
            if let Some(index) = active_index(&active_list) {
                if index + 1 < page_count {
                    controller.select(data_count, index + 1);
                }
            }
            event.stop_propagation();
        })?;

        Ok(Some(list))
    }

    fn select(&self, data_count: usize, index: usize) {
        if let Err(e) = self.render(data_count, index) {
            tracing::error!("Failed to render pagination for page {}: {}", index, e);
            return;
        }
        (self.on_change)(index);
    }

    fn add_handle(&self, list: &D::Node, label: &str) -> DashboardResult<D::Node> {
        let item = self.document.create_element("li")?;
        let link = self.document.create_element("a")?;
        link.set_text(label);
        item.append_child(&link)?;
        list.append_child(&item)?;
        Ok(link)
    }
}

/// Index tagged on the active handle of a rendered control.
fn active_index<N: Element>(list: &N) -> Option<usize> {
    list.query_selector(ACTIVE_SELECTOR)
        .ok()
        .flatten()?
        .attribute(INDEX_ATTRIBUTE)?
        .parse()
        .ok()
}

/// Render a pagination control with the default sizing.
pub fn create_pagination<D, F>(
    doc: &D,
    container: &D::Node,
    data_count: usize,
    current_index: usize,
    callback: F,
) -> DashboardResult<Option<D::Node>>
where
    D: Document,
    F: Fn(usize) + 'static,
{
    Pagination::new(
        doc.clone(),
        container.clone(),
        PaginationConfig::default(),
        callback,
    )
    .render(data_count, current_index)
}
