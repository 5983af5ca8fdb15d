pub mod config;
pub mod error;
pub mod pagination;
pub mod range;
pub mod result;

pub use config::{DashboardConfig, HttpConfig};
pub use error::DashboardError;
pub use pagination::{PageWindow, PaginationConfig};
pub use range::{range, subset};
pub use result::DashboardResult;
