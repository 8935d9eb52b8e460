use std::path::Path;

use anyhow::{Result, anyhow, bail};
use zxp_magic::{CommandGateway, validate_package_path};

pub async fn run(gateway: &CommandGateway, path: &Path) -> Result<()> {
    if validate_package_path(path).is_err() {
        bail!("{} is not a .zxp or .zxpinstall package", path.display());
    }

    let outcome = gateway.install_extension(path).await?;
    let record = outcome.into_result().map_err(|message| anyhow!(message))?;

    tracing::info!(id = %record.id, version = %record.version, "installed");
    println!("Installed {} {} ({})", record.name, record.version, record.id);
    if let Some(path) = &record.install_path {
        println!("Location: {}", path.display());
    }
    Ok(())
}
