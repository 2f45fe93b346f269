pub mod container;
pub mod date;
pub mod scan;
pub mod session;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::context::AppContext;

/// Operator instructions shown whenever a command needs a session and has none.
pub const NO_SESSION_HELP: &str = "no valid session. Open the warehouse app, run one container \
search, then either pass that request to `riv session observe <URL> <BODY>` or store the \
identifiers with `riv session set <WAREHOUSE_ID> <ASSOCIATE>`";

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Scan(args) => scan::handle(&args, ctx, flags).await,
        Commands::Container(args) => container::handle(&args, ctx, flags).await,
        Commands::Session { action } => session::handle(&action, ctx, flags).await,
        Commands::Date(args) => date::handle(&args, flags),
    }
}
