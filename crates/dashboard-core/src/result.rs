use crate::error::DashboardError;

pub type DashboardResult<T> = Result<T, DashboardError>;
