pub mod card;
pub mod nodes;
pub mod pagination;
pub mod report;
pub mod status;
pub mod table;

pub use card::{create_card, Card};
pub use nodes::clear_node;
pub use pagination::{create_pagination, Pagination};
pub use report::{rows_from_json, Report, ReportSpec, ReportTable};
pub use status::set_all_good;
pub use table::{add_empty_table_rows, add_table_col, add_table_row, create_table};
