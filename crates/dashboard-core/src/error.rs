use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
