use anyhow::Result;
use zxp_magic::CommandGateway;

use super::format;

pub async fn run(gateway: &CommandGateway) -> Result<()> {
    let records = gateway.list_extensions().await?;
    print!("{}", format::extension_table(&records));
    Ok(())
}
