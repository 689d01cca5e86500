use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use pagedeck_core::AppConfig;

pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists.\nUse --force to overwrite it with the defaults.",
            path.display()
        );
    }

    AppConfig::default().save_to(path)?;
    info!("Wrote default configuration to {}", path.display());
    println!("Wrote {}", path.display());

    Ok(())
}
