use anyhow::{Result, bail};
use zxp_magic::{CommandGateway, ExtensionId, ExtensionRecord};

use super::format;

pub async fn run(gateway: &CommandGateway, id: &str) -> Result<()> {
    let records = gateway.list_extensions().await?;
    let Some(record) = find(&records, &ExtensionId::new(id)) else {
        bail!("Extension not installed: {id}");
    };
    print!("{}", format::extension_details(record));
    Ok(())
}

fn find<'a>(records: &'a [ExtensionRecord], id: &ExtensionId) -> Option<&'a ExtensionRecord> {
    records.iter().find(|r| &r.id == id)
}
