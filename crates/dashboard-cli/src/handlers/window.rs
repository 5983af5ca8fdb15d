use serde::Serialize;

use crate::cli::WindowArgs;
use crate::context::CliContext;
use crate::output;

#[derive(Serialize)]
struct WindowSummary {
    paginated: bool,
    page_count: usize,
    current: usize,
    start: usize,
    end: usize,
    leading_ellipsis: bool,
    trailing_ellipsis: bool,
}

pub fn handle(ctx: &CliContext, args: WindowArgs) -> anyhow::Result<()> {
    let pagination = &ctx.config.pagination;
    let window = pagination.window(args.data_count, args.current_index);

    output::output_success(WindowSummary {
        paginated: pagination.needs_pagination(args.data_count),
        page_count: window.page_count,
        current: window.current,
        start: window.start,
        end: window.end,
        leading_ellipsis: window.show_leading_ellipsis(),
        trailing_ellipsis: window.show_trailing_ellipsis(),
    })
}
