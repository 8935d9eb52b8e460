use anyhow::Result;
use zxp_magic::CommandGateway;

/// Print the host debug flag, or set it first when `setting` is given.
pub async fn run(gateway: &CommandGateway, setting: Option<bool>) -> Result<()> {
    let enabled = match setting {
        Some(enabled) => {
            gateway.set_debug_mode(enabled).await?;
            enabled
        }
        None => gateway.get_debug_mode().await?,
    };

    println!("Debug mode: {}", if enabled { "on" } else { "off" });
    Ok(())
}
