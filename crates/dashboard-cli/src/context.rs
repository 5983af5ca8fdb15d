use std::path::Path;

use dashboard_core::{DashboardConfig, DashboardResult};

pub struct CliContext {
    pub config: DashboardConfig,
}

impl CliContext {
    /// An explicit config file must load; the platform default may be absent.
    pub fn load(config_path: Option<&Path>) -> DashboardResult<Self> {
        let config = match config_path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                DashboardConfig::load_from(path)?
            }
            None => DashboardConfig::load(),
        };
        Ok(Self { config })
    }
}
