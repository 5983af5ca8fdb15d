use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Render paginated report cards as HTML", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a config file (or set DASHBOARD_CONFIG env var)
    #[arg(long, global = true, value_name = "FILE", env = "DASHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a JSON report into a card and print its HTML
    Render(RenderArgs),
    /// Show which page handles the pagination control would display
    Window(WindowArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct RenderArgs {
    /// http(s) URL or local path of a JSON array of records
    #[arg(value_name = "SOURCE")]
    pub source: String,
    /// Card title
    #[arg(long, default_value = "Report")]
    pub title: String,
    /// Card element id
    #[arg(long, default_value = "report")]
    pub id: String,
    /// Columns to show, in order (defaults to the first record's keys)
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,
    /// Zero-based page to show
    #[arg(long, default_value_t = 0)]
    pub page: usize,
}

#[derive(Args)]
pub struct WindowArgs {
    /// Number of records
    pub data_count: usize,
    /// Zero-based current page
    pub current_index: usize,
}
