mod clear;
mod observe;
mod probe;
mod set;
mod show;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::context::AppContext;

/// Handle `riv session <subcommand>`.
pub async fn handle(action: &SessionCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SessionCommands::Show => show::handle(ctx, flags),
        SessionCommands::Set(args) => set::handle(args, ctx, flags).await,
        SessionCommands::Clear => clear::handle(ctx, flags),
        SessionCommands::Observe(args) => observe::handle(args, ctx, flags),
        SessionCommands::Probe(args) => probe::handle(args, ctx, flags).await,
    }
}
