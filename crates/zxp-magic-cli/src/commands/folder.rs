use anyhow::Result;
use zxp_magic::CommandGateway;

/// Print the extensions folder, and reveal it in the file manager when
/// `open` is set.
pub async fn run(gateway: &CommandGateway, open: bool) -> Result<()> {
    let path = gateway.get_extensions_folder_path().await?;
    println!("{}", path.display());

    if open {
        gateway.open_extensions_folder().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use zxp_magic::test_support::{BackendCall, FakeBackend};

    use super::*;

    #[tokio::test]
    async fn opens_only_when_asked() {
        let backend = Arc::new(FakeBackend::new());
        let gateway = CommandGateway::new(backend.clone());

        run(&gateway, false).await.unwrap();
        assert_eq!(backend.calls(), vec![BackendCall::GetExtensionsFolder]);

        run(&gateway, true).await.unwrap();
        assert_eq!(backend.calls().last(), Some(&BackendCall::OpenFolder));
    }
}
