use std::fmt::Display;

use dashboard_core::DashboardResult;
use dashboard_dom::{Document, Element};

/// Content of padding cells: a non-breaking space keeps the row height.
pub const PLACEHOLDER: &str = "\u{a0}";

/// Build a table with one header row inside `container` and return its
/// empty body.
pub fn create_table<D, S>(doc: &D, container: &D::Node, columns: &[S]) -> DashboardResult<D::Node>
where
    D: Document,
    S: AsRef<str>,
{
    let table = doc.create_element("table")?;
    let thead = doc.create_element("thead")?;
    let tbody = doc.create_element("tbody")?;
    let head = doc.create_element("tr")?;

    for column in columns {
        let th = doc.create_element("th")?;
        th.set_text(column.as_ref());
        head.append_child(&th)?;
    }

    thead.append_child(&head)?;
    table.append_child(&thead)?;
    table.append_child(&tbody)?;
    container.append_child(&table)?;

    Ok(tbody)
}

/// Append a text cell to `row`.
pub fn add_table_col<D: Document>(
    doc: &D,
    row: &D::Node,
    value: impl Display,
) -> DashboardResult<D::Node> {
    let td = doc.create_element("td")?;
    td.set_text(&value.to_string());
    row.append_child(&td)?;
    Ok(td)
}

/// Append a row holding one cell per value.
pub fn add_table_row<D, V>(doc: &D, body: &D::Node, values: &[V]) -> DashboardResult<D::Node>
where
    D: Document,
    V: Display,
{
    let tr = doc.create_element("tr")?;
    for value in values {
        add_table_col(doc, &tr, value)?;
    }
    body.append_child(&tr)?;
    Ok(tr)
}

/// Pad `container` with `count` rows of `columns_count` blank cells.
pub fn add_empty_table_rows<D: Document>(
    doc: &D,
    container: &D::Node,
    count: usize,
    columns_count: usize,
) -> DashboardResult<()> {
    for _ in 0..count {
        let tr = doc.create_element("tr")?;
        for _ in 0..columns_count {
            add_table_col(doc, &tr, PLACEHOLDER)?;
        }
        container.append_child(&tr)?;
    }
    Ok(())
}
