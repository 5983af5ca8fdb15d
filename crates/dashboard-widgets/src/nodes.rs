//! Small node-building helpers shared by the widgets.

use dashboard_core::DashboardResult;
use dashboard_dom::{Document, Element};

/// Remove every child of `node`, text included.
///
/// Click handlers on the removed subtree are dropped as well, so a removed
/// node should not be re-attached expecting its handlers to survive.
pub fn clear_node<N: Element>(node: &N) -> DashboardResult<()> {
    while let Some(child) = node.last_child() {
        release_handlers(&child);
        node.remove_child(&child)?;
    }
    node.set_text("");
    Ok(())
}

fn release_handlers<N: Element>(node: &N) {
    node.clear_click_handlers();
    for child in node.children() {
        release_handlers(&child);
    }
}

pub(crate) fn element_with_classes<D: Document>(
    doc: &D,
    tag: &str,
    classes: &[&str],
) -> DashboardResult<D::Node> {
    let node = doc.create_element(tag)?;
    for class in classes {
        node.add_class(class)?;
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_dom::MemoryDocument;

    #[test]
    fn test_clear_node_removes_elements_and_text() {
        let doc = MemoryDocument::new();
        let container = doc.create_element("div").unwrap();
        container.set_text("Loading...");
        container.append_child(&doc.create_element("span").unwrap()).unwrap();

        clear_node(&container).unwrap();

        assert_eq!(container.child_count(), 0);
        assert_eq!(container.text(), "");
        assert_eq!(container.inner_html(), "");
    }

    #[test]
    fn test_clear_node_drops_nested_handlers() {
        let doc = MemoryDocument::new();
        let container = doc.create_element("div").unwrap();
        let item = doc.create_element("li").unwrap();
        let link = doc.create_element("a").unwrap();
        item.append_child(&link).unwrap();
        container.append_child(&item).unwrap();
        item.on_click(|_| {}).unwrap();
        link.on_click(|_| {}).unwrap();
        container.on_click(|_| {}).unwrap();

        clear_node(&container).unwrap();

        assert_eq!(item.handler_count(), 0);
        assert_eq!(link.handler_count(), 0);
        assert_eq!(container.handler_count(), 1);
    }
}
