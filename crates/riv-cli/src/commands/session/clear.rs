use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct SessionClearResponse {
    cleared: bool,
    path: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.session.clear()?;
    output(
        &SessionClearResponse {
            cleared: true,
            path: ctx.session.path().map(|p| p.display().to_string()),
        },
        flags.format,
    )
}
