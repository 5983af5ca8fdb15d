use dashboard_core::DashboardResult;
use dashboard_dom::{Document, Element};

use crate::nodes::{clear_node, element_with_classes};

pub const ALL_GOOD_MESSAGE: &str = "All good";

/// Replace the contents of `container` with a success message.
pub fn set_all_good<D: Document>(doc: &D, container: &D::Node) -> DashboardResult<D::Node> {
    clear_node(container)?;

    let message = element_with_classes(doc, "p", &["alert", "alert-success"])?;
    message.set_text(ALL_GOOD_MESSAGE);
    container.append_child(&message)?;

    Ok(message)
}
