use anyhow::Context;
use dashboard_dom::{Document, Element, MemoryDocument};
use dashboard_http::Fetcher;
use dashboard_widgets::{rows_from_json, Report, ReportSpec};
use serde_json::Value;

use crate::cli::RenderArgs;
use crate::context::CliContext;

pub async fn handle(ctx: &CliContext, args: RenderArgs) -> anyhow::Result<()> {
    let data = load_source(ctx, &args.source).await?;
    let (columns, rows) = rows_from_json(&data, args.columns.as_deref())?;

    let doc = MemoryDocument::new();
    let container = doc.create_element("div")?;
    container.add_class("row")?;

    let spec = ReportSpec::new(args.id, args.title, columns);
    let report = Report::render(&doc, &container, &spec, rows, ctx.config.pagination)?;
    if args.page > 0 {
        report.render_page(args.page)?;
    }

    println!("{}", container.outer_html());
    Ok(())
}

async fn load_source(ctx: &CliContext, source: &str) -> anyhow::Result<Value> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let fetcher = Fetcher::from_config(&ctx.config.http)?;
        let value = fetcher
            .fetch_json(source)
            .await
            .with_context(|| format!("Failed to fetch {}", source))?;
        return Ok(value);
    }

    let content = std::fs::read_to_string(source)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", source, e))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid JSON in {}: {}", source, e))?;
    Ok(value)
}
