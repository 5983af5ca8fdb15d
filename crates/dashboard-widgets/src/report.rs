//! A titled card holding a paginated table of records.

use std::rc::Rc;

use dashboard_core::{subset, DashboardError, DashboardResult, PaginationConfig};
use dashboard_dom::Document;
use serde_json::Value;

use crate::card::{create_card, Card};
use crate::nodes::clear_node;
use crate::pagination::Pagination;
use crate::status::set_all_good;
use crate::table::{add_empty_table_rows, add_table_row, create_table};

/// Header name used when records are bare scalars.
pub const SCALAR_COLUMN: &str = "value";

/// What to render: card identity plus the table header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSpec {
    pub id: String,
    pub title: String,
    pub columns: Vec<String>,
}

impl ReportSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            columns,
        }
    }
}

/// Table body that shows one page of rows at a time.
pub struct ReportTable<D: Document> {
    document: D,
    body: D::Node,
    rows: Rc<Vec<Vec<String>>>,
    columns_count: usize,
    page_size: usize,
}

impl<D: Document> Clone for ReportTable<D> {
    fn clone(&self) -> Self {
        Self {
            document: self.document.clone(),
            body: self.body.clone(),
            rows: Rc::clone(&self.rows),
            columns_count: self.columns_count,
            page_size: self.page_size,
        }
    }
}

impl<D: Document> ReportTable<D> {
    pub fn body(&self) -> &D::Node {
        &self.body
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Replace the body with page `index`, padded to a full page.
    pub fn render_page(&self, index: usize) -> DashboardResult<()> {
        clear_node(&self.body)?;

        let page = subset(&self.rows, index, self.page_size);
        for row in page {
            add_table_row(&self.document, &self.body, row.as_slice())?;
        }
        add_empty_table_rows(
            &self.document,
            &self.body,
            self.page_size - page.len(),
            self.columns_count,
        )?;

        tracing::debug!("Rendered page {} with {} rows", index, page.len());
        Ok(())
    }
}

/// A rendered report: either an "All good" card or a paginated table.
pub struct Report<D: Document> {
    card: Card<D::Node>,
    table: Option<ReportTable<D>>,
    pagination: Option<Pagination<D>>,
}

impl<D: Document> Report<D> {
    /// Build the report card inside `container` and show the first page.
    pub fn render(
        doc: &D,
        container: &D::Node,
        spec: &ReportSpec,
        rows: Vec<Vec<String>>,
        config: PaginationConfig,
    ) -> DashboardResult<Self> {
        config.validate()?;
        let card = create_card(doc, container, &spec.id, &spec.title)?;

        if rows.is_empty() {
            tracing::debug!("Report {} has no rows", spec.id);
            set_all_good(doc, &card.content)?;
            return Ok(Self {
                card,
                table: None,
                pagination: None,
            });
        }

        tracing::debug!("Rendering report {} with {} rows", spec.id, rows.len());
        let body = create_table(doc, &card.content, &spec.columns)?;
        let table = ReportTable {
            document: doc.clone(),
            body,
            rows: Rc::new(rows),
            columns_count: spec.columns.len(),
            page_size: config.page_size,
        };
        table.render_page(0)?;

        let pager = table.clone();
        let pagination = Pagination::new(doc.clone(), card.action.clone(), config, move |index| {
            if let Err(e) = pager.render_page(index) {
                tracing::error!("Failed to render report page {}: {}", index, e);
            }
        });
        pagination.render(table.row_count(), 0)?;

        Ok(Self {
            card,
            table: Some(table),
            pagination: Some(pagination),
        })
    }

    pub fn card(&self) -> &Card<D::Node> {
        &self.card
    }

    pub fn table(&self) -> Option<&ReportTable<D>> {
        self.table.as_ref()
    }

    pub fn is_all_good(&self) -> bool {
        self.table.is_none()
    }

    /// Show page `index`, clamped to the last page.
    pub fn render_page(&self, index: usize) -> DashboardResult<()> {
        let (Some(table), Some(pagination)) = (&self.table, &self.pagination) else {
            return Ok(());
        };

        let row_count = table.row_count();
        let last = pagination.config().page_count(row_count).saturating_sub(1);
        let index = index.min(last);

        table.render_page(index)?;
        pagination.render(row_count, index)?;
        Ok(())
    }
}

/// Turn a JSON array into a header and text rows.
///
/// Arrays of objects take their columns from `columns` or the keys of the
/// first object. Arrays of arrays take `columns` or numbered headers; a record
/// wider than the given `columns` is rejected. Arrays of scalars become a
/// single [`SCALAR_COLUMN`].
pub fn rows_from_json(
    value: &Value,
    columns: Option<&[String]>,
) -> DashboardResult<(Vec<String>, Vec<Vec<String>>)> {
    let records = value.as_array().ok_or_else(|| {
        DashboardError::Validation("report data must be a JSON array".to_string())
    })?;

    let Some(first) = records.first() else {
        return Ok((columns.map(<[String]>::to_vec).unwrap_or_default(), Vec::new()));
    };

    match first {
        Value::Object(object) => {
            let columns = match columns {
                Some(columns) => columns.to_vec(),
                None => object.keys().cloned().collect(),
            };
            let rows = records
                .iter()
                .enumerate()
                .map(|(i, record)| -> DashboardResult<Vec<String>> {
                    let object = record.as_object().ok_or_else(|| mixed_records(i))?;
                    Ok(columns
                        .iter()
                        .map(|column| object.get(column).map(cell_text).unwrap_or_default())
                        .collect())
                })
                .collect::<DashboardResult<Vec<_>>>()?;
            Ok((columns, rows))
        }
        Value::Array(_) => {
            let mut rows = records
                .iter()
                .enumerate()
                .map(|(i, record)| -> DashboardResult<Vec<String>> {
                    let cells = record.as_array().ok_or_else(|| mixed_records(i))?;
                    Ok(cells.iter().map(cell_text).collect())
                })
                .collect::<DashboardResult<Vec<_>>>()?;

            let columns = match columns {
                Some(columns) => columns.to_vec(),
                None => {
                    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
                    (1..=width).map(|n| format!("Column {n}")).collect()
                }
            };
            for (i, row) in rows.iter_mut().enumerate() {
                if row.len() > columns.len() {
                    return Err(DashboardError::Validation(format!(
                        "record {i} has {} cells but only {} columns",
                        row.len(),
                        columns.len()
                    )));
                }
                row.resize(columns.len(), String::new());
            }
            Ok((columns, rows))
        }
        _ => {
            let rows = records
                .iter()
                .enumerate()
                .map(|(i, record)| -> DashboardResult<Vec<String>> {
                    if record.is_object() || record.is_array() {
                        return Err(mixed_records(i));
                    }
                    Ok(vec![cell_text(record)])
                })
                .collect::<DashboardResult<Vec<_>>>()?;
            let columns = match columns {
                Some(columns) => columns.to_vec(),
                None => vec![SCALAR_COLUMN.to_string()],
            };
            Ok((columns, rows))
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn mixed_records(index: usize) -> DashboardError {
    DashboardError::Validation(format!(
        "record {index} does not match the shape of the first record"
    ))
}
