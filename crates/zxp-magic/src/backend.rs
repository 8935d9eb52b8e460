use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::record::{ExtensionId, ExtensionRecord, InstallOutcome};

/// Errors that can occur when calling the privileged backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The reply could not be decoded.
    #[error("malformed backend reply: {0}")]
    Serialization(String),

    /// The backend ran the command and refused it. The message is user-facing.
    #[error("{0}")]
    Rejected(String),

    /// The backend could not be reached or died mid-call.
    #[error("backend unavailable: {0}")]
    Disconnected(String),

    #[error("{0}")]
    Other(String),
}

/// The privileged service that unpacks packages and mutates the host
/// environment.
///
/// The controller never touches the filesystem or host settings itself;
/// every effect goes through one of these calls.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Human-readable label identifying this backend.
    fn label(&self) -> &str;

    /// Install the package at `path`.
    async fn install(&self, path: &Path) -> Result<InstallOutcome, BackendError>;

    /// Read a package's manifest without installing it.
    async fn inspect(&self, path: &Path) -> Result<ExtensionRecord, BackendError>;

    /// List every installed extension.
    async fn list(&self) -> Result<Vec<ExtensionRecord>, BackendError>;

    /// Remove an installed extension.
    async fn uninstall(&self, id: &ExtensionId) -> Result<(), BackendError>;

    /// Reveal the per-user extensions folder in the OS file manager.
    async fn open_folder(&self) -> Result<(), BackendError>;

    async fn debug_mode(&self) -> Result<bool, BackendError>;

    async fn set_debug_mode(&self, enabled: bool) -> Result<(), BackendError>;

    async fn extensions_folder(&self) -> Result<PathBuf, BackendError>;
}

#[async_trait::async_trait]
impl<T: Backend + ?Sized> Backend for Arc<T> {
    fn label(&self) -> &str {
        (**self).label()
    }

    async fn install(&self, path: &Path) -> Result<InstallOutcome, BackendError> {
        (**self).install(path).await
    }

    async fn inspect(&self, path: &Path) -> Result<ExtensionRecord, BackendError> {
        (**self).inspect(path).await
    }

    async fn list(&self) -> Result<Vec<ExtensionRecord>, BackendError> {
        (**self).list().await
    }

    async fn uninstall(&self, id: &ExtensionId) -> Result<(), BackendError> {
        (**self).uninstall(id).await
    }

    async fn open_folder(&self) -> Result<(), BackendError> {
        (**self).open_folder().await
    }

    async fn debug_mode(&self) -> Result<bool, BackendError> {
        (**self).debug_mode().await
    }

    async fn set_debug_mode(&self, enabled: bool) -> Result<(), BackendError> {
        (**self).set_debug_mode(enabled).await
    }

    async fn extensions_folder(&self) -> Result<PathBuf, BackendError> {
        (**self).extensions_folder().await
    }
}
