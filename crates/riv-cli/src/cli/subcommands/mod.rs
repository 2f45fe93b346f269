mod session;

pub use session::{SessionCommands, SessionObserveArgs, SessionProbeArgs, SessionSetArgs};
