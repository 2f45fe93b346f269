use std::io::Read;

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;

use super::show::SessionStatus;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionObserveArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ObserveResponse {
    updated: bool,
    session: SessionStatus,
}

pub fn handle(args: &SessionObserveArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let body = match &args.body {
        Some(body) => body.clone(),
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("failed to read request body from stdin")?;
            body
        }
    };

    let updated = ctx.session.observe(&args.url, &body);
    if !updated {
        tracing::info!(url = %args.url, "request carried no usable identity");
    }

    output(
        &ObserveResponse {
            updated,
            session: SessionStatus::of(&ctx.session, Utc::now()),
        },
        flags.format,
    )
}
