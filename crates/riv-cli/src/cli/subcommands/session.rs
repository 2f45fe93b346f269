use clap::{Args, Subcommand};

/// Session identity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// Show the stored session and whether it is usable.
    Show,
    /// Store identifiers, verifying them against the endpoint first.
    Set(SessionSetArgs),
    /// Forget the stored session.
    Clear,
    /// Feed a captured request (URL + JSON body) to the session observer.
    Observe(SessionObserveArgs),
    /// Check that the stored session is accepted by the endpoint.
    Probe(SessionProbeArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SessionSetArgs {
    /// Warehouse ID, e.g. KTW1.
    pub warehouse_id: String,
    /// Associate login.
    pub associate: String,
    /// Container used to test the identifiers.
    #[arg(long, default_value = "DZ-CDPL-A01")]
    pub probe: String,
    /// Store without contacting the endpoint.
    #[arg(long)]
    pub no_probe: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SessionObserveArgs {
    /// Request URL as seen by the host application.
    pub url: String,
    /// Request body; read from stdin when omitted.
    pub body: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SessionProbeArgs {
    /// Container used to test the session.
    #[arg(long, default_value = "DZ-CDPL-A01")]
    pub probe: String,
}
