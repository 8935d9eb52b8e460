use anyhow::Result;
use zxp_magic::{CommandGateway, ExtensionId};

pub async fn run(gateway: &CommandGateway, id: &str) -> Result<()> {
    let id = ExtensionId::new(id);
    gateway.uninstall_extension(&id).await?;
    tracing::info!(%id, "uninstalled");
    println!("Removed {id}");
    Ok(())
}
