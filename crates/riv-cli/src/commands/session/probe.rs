use anyhow::{Context, bail};
use riv_gateway::FetchOptions;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionProbeArgs;
use crate::commands::NO_SESSION_HELP;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ProbeResponse {
    accepted: bool,
    probe: String,
    /// Children of the probe container; `0` when the endpoint reported it empty.
    children: usize,
}

pub async fn handle(args: &SessionProbeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !ctx.session.is_valid() {
        bail!(NO_SESSION_HELP);
    }
    let gateway = ctx.gateway()?;

    let children = match gateway.fetch(&args.probe, FetchOptions::default()).await {
        Ok(container) => container.children().len(),
        Err(error) if error.is_empty_zone() => 0,
        Err(error) => return Err(error).context("session probe failed"),
    };

    output(
        &ProbeResponse {
            accepted: true,
            probe: args.probe.clone(),
            children,
        },
        flags.format,
    )
}
