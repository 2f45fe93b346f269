use anyhow::{Context, bail};
use chrono::Utc;
use riv_core::session::{SENTINEL_ASSOCIATE, SENTINEL_WAREHOUSE_ID};
use riv_gateway::bootstrap_session;

use super::show::SessionStatus;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionSetArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &SessionSetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.no_probe {
        let warehouse_id = args.warehouse_id.trim();
        let associate = args.associate.trim();
        if warehouse_id.is_empty()
            || associate.is_empty()
            || warehouse_id == SENTINEL_WAREHOUSE_ID
            || associate == SENTINEL_ASSOCIATE
        {
            bail!("'{warehouse_id}'/'{associate}' is not a usable identity");
        }
        ctx.session.update(warehouse_id, associate, None);
    } else {
        let gateway = ctx.gateway()?;
        bootstrap_session(&gateway, &args.warehouse_id, &args.associate, &args.probe)
            .await
            .context("identifiers were not accepted by the endpoint")?;
    }

    output(&SessionStatus::of(&ctx.session, Utc::now()), flags.format)
}
