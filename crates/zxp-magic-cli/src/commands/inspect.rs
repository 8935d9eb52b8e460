use std::path::Path;

use anyhow::{Result, bail};
use zxp_magic::{CommandGateway, validate_package_path};

use super::format;

/// Print the manifest details of a package without installing it.
pub async fn run(gateway: &CommandGateway, path: &Path) -> Result<()> {
    if validate_package_path(path).is_err() {
        bail!("{} is not a .zxp or .zxpinstall package", path.display());
    }

    let record = gateway.inspect_package(path).await?;
    print!("{}", format::extension_details(&record));
    Ok(())
}
