use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backend::{Backend, BackendError};
use crate::record::{ExtensionId, ExtensionRecord, InstallOutcome};

/// A backend failure reduced to one displayable message, whatever the
/// transport did wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for GatewayError {}

impl From<BackendError> for GatewayError {
    fn from(err: BackendError) -> Self {
        Self::new(err.to_string())
    }
}

/// Async boundary in front of every backend capability.
///
/// Stateless and cheap to clone. Each call is a single attempt; retrying is
/// left to the caller.
#[derive(Clone)]
pub struct CommandGateway {
    backend: Arc<dyn Backend>,
}

impl CommandGateway {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn label(&self) -> &str {
        self.backend.label()
    }

    pub async fn install_extension(&self, path: &Path) -> Result<InstallOutcome, GatewayError> {
        tracing::debug!(path = %path.display(), "install");
        normalize("install", self.backend.install(path).await)
    }

    pub async fn inspect_package(&self, path: &Path) -> Result<ExtensionRecord, GatewayError> {
        normalize("inspect", self.backend.inspect(path).await)
    }

    pub async fn list_extensions(&self) -> Result<Vec<ExtensionRecord>, GatewayError> {
        normalize("list", self.backend.list().await)
    }

    pub async fn uninstall_extension(&self, id: &ExtensionId) -> Result<(), GatewayError> {
        tracing::debug!(%id, "uninstall");
        normalize("uninstall", self.backend.uninstall(id).await)
    }

    pub async fn open_extensions_folder(&self) -> Result<(), GatewayError> {
        normalize("open-folder", self.backend.open_folder().await)
    }

    pub async fn get_debug_mode(&self) -> Result<bool, GatewayError> {
        normalize("get-debug-mode", self.backend.debug_mode().await)
    }

    pub async fn set_debug_mode(&self, enabled: bool) -> Result<(), GatewayError> {
        normalize("set-debug-mode", self.backend.set_debug_mode(enabled).await)
    }

    pub async fn get_extensions_folder_path(&self) -> Result<PathBuf, GatewayError> {
        normalize("get-extensions-folder", self.backend.extensions_folder().await)
    }
}

fn normalize<T>(operation: &str, result: Result<T, BackendError>) -> Result<T, GatewayError> {
    result.map_err(|err| {
        tracing::warn!(operation, error = %err, "backend call failed");
        GatewayError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{BackendCall, FakeBackend};

    #[tokio::test]
    async fn rejected_message_passes_through_verbatim() {
        let backend = Arc::new(FakeBackend::new());
        backend.fail_next_uninstall(BackendError::Rejected("Extension is in use".into()));
        let gateway = CommandGateway::new(backend);

        let err = gateway
            .uninstall_extension(&ExtensionId::new("a"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Extension is in use");
    }

    #[tokio::test]
    async fn transport_failures_become_one_message() {
        let backend = Arc::new(FakeBackend::new());
        backend.fail_next_list(BackendError::Disconnected("helper exited".into()));
        let gateway = CommandGateway::new(backend);

        let err = gateway.list_extensions().await.unwrap_err();
        assert_eq!(err.to_string(), "backend unavailable: helper exited");
    }

    #[tokio::test]
    async fn failed_call_is_not_retried() {
        let backend = Arc::new(FakeBackend::new());
        backend.fail_next_list(BackendError::Serialization("eof".into()));
        let gateway = CommandGateway::new(Arc::clone(&backend) as Arc<dyn Backend>);

        assert!(gateway.list_extensions().await.is_err());
        assert_eq!(backend.calls(), vec![BackendCall::List]);
    }

    #[tokio::test]
    async fn debug_mode_round_trips_through_backend() {
        let backend = Arc::new(FakeBackend::new());
        let gateway = CommandGateway::new(Arc::clone(&backend) as Arc<dyn Backend>);

        gateway.set_debug_mode(true).await.unwrap();
        assert!(gateway.get_debug_mode().await.unwrap());
    }
}
