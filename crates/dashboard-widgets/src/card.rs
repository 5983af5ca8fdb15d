use dashboard_core::DashboardResult;
use dashboard_dom::{Document, Element};

use crate::nodes::element_with_classes;

/// Responsive grid classes of the card's outer column.
const COLUMN_CLASSES: [&str; 5] = ["col", "col-sm-12", "col-md-12", "col-lg-6", "col-xl-3"];

/// The two slots of a card that callers fill in.
#[derive(Debug, Clone)]
pub struct Card<N> {
    /// Main content area.
    pub content: N,
    /// Single action slot, a list item in the card's action bar.
    pub action: N,
}

/// Build a titled card inside `container`.
///
/// ```text
/// div#id.col... > div.card > h3.card-title
///                          > div.card-content
///                          > ul.card-actions.float-left > li
/// ```
pub fn create_card<D: Document>(
    doc: &D,
    container: &D::Node,
    id: &str,
    title: &str,
) -> DashboardResult<Card<D::Node>> {
    let column = element_with_classes(doc, "div", &COLUMN_CLASSES)?;
    column.set_id(id)?;

    let card = element_with_classes(doc, "div", &["card"])?;

    let header = element_with_classes(doc, "h3", &["card-title"])?;
    header.set_text(title);

    let content = element_with_classes(doc, "div", &["card-content"])?;

    let actions = element_with_classes(doc, "ul", &["card-actions", "float-left"])?;
    let action = doc.create_element("li")?;
    actions.append_child(&action)?;

    card.append_child(&header)?;
    card.append_child(&content)?;
    card.append_child(&actions)?;
    column.append_child(&card)?;
    container.append_child(&column)?;

    Ok(Card { content, action })
}
