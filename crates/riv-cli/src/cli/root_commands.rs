use clap::{Args, Subcommand};
use riv_core::ZoneSegment;

use crate::cli::subcommands::SessionCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Scan drop zones for pallets, units and categories.
    Scan(ScanArgs),
    /// Fetch one container and list its immediate children.
    Container(ContainerArgs),
    /// Session identity management.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Format a legacy DD-MM-YYYY HH:MM date.
    Date(DateArgs),
}

/// Arguments for `riv scan`.
#[derive(Clone, Debug, Args)]
pub struct ScanArgs {
    /// Zone range as PREFIX:START-END (repeatable).
    #[arg(short, long = "segment", value_name = "PREFIX:START-END")]
    pub segments: Vec<ZoneSegment>,
    /// Extra zone IDs, comma or space separated (repeatable).
    #[arg(short, long = "zone", value_name = "IDS")]
    pub zones: Vec<String>,
    /// Descend into every pallet to count units and collect CDDs.
    #[arg(long)]
    pub deep: bool,
    /// Skip Clean Decant Date resolution after a deep scan.
    #[arg(long)]
    pub no_cdd: bool,
    /// Replay container responses from a JSON fixture instead of the network.
    #[arg(long, value_name = "PATH")]
    pub fixture: Option<String>,
}

/// Arguments for `riv container`.
#[derive(Clone, Debug, Args)]
pub struct ContainerArgs {
    /// Container ID (zone, pallet or tote).
    pub id: String,
}

/// Arguments for `riv date`.
#[derive(Clone, Debug, Args)]
pub struct DateArgs {
    /// Date text, e.g. "07-05-2025 02:07".
    pub text: String,
}
