use std::path::Path;

use anyhow::Context;
use riv_config::RivConfig;

use crate::cli::GlobalFlags;

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RivConfig> {
    load_dotenv()?;

    let extra = flags.config.as_deref().map(Path::new);
    if let Some(path) = extra
        && !path.exists()
    {
        anyhow::bail!("config file '{}' does not exist", path.display());
    }

    RivConfig::load_from(extra).context("failed to load riv configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
