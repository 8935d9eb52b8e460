use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::process::Command;
use zxp_magic::{Backend, BackendError, ExtensionId, ExtensionRecord, InstallOutcome};

use crate::protocol::{self, ProcessError, Verb};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the helper executable.
#[derive(Debug, Clone)]
pub struct ProcessBackendConfig {
    pub program: PathBuf,
    /// Arguments placed before the verb on every call.
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl ProcessBackendConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Talks to the privileged helper, one process per command.
pub struct ProcessBackend {
    config: ProcessBackendConfig,
    label: String,
}

impl ProcessBackend {
    pub fn new(config: ProcessBackendConfig) -> Self {
        let label = config
            .program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.program.display().to_string());
        Self { config, label }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        verb: Verb,
        operand: Option<&OsStr>,
    ) -> Result<T, ProcessError> {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args).arg(verb.as_str());
        if let Some(operand) = operand {
            cmd.arg(operand);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(program = %self.config.program.display(), verb = verb.as_str(), "calling helper");

        let child = cmd.spawn().map_err(|source| ProcessError::Spawn {
            program: self.config.program.display().to_string(),
            source,
        })?;

        // Dropping the wait future on timeout kills the child.
        let output = tokio::time::timeout(self.config.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProcessError::Timeout {
                verb: verb.as_str(),
                secs: self.config.timeout.as_secs(),
            })??;

        if !output.status.success() {
            tracing::debug!(verb = verb.as_str(), status = %output.status, "helper exited unsuccessfully");
        }

        protocol::decode_reply(&output.stdout, &output.stderr, output.status.code())
    }
}

#[async_trait::async_trait]
impl Backend for ProcessBackend {
    fn label(&self) -> &str {
        &self.label
    }

    async fn install(&self, path: &Path) -> Result<InstallOutcome, BackendError> {
        Ok(self.call(Verb::Install, Some(path.as_os_str())).await?)
    }

    async fn inspect(&self, path: &Path) -> Result<ExtensionRecord, BackendError> {
        Ok(self.call(Verb::Inspect, Some(path.as_os_str())).await?)
    }

    async fn list(&self) -> Result<Vec<ExtensionRecord>, BackendError> {
        Ok(self.call(Verb::List, None).await?)
    }

    async fn uninstall(&self, id: &ExtensionId) -> Result<(), BackendError> {
        Ok(self
            .call(Verb::Uninstall, Some(OsStr::new(id.as_str())))
            .await?)
    }

    async fn open_folder(&self) -> Result<(), BackendError> {
        Ok(self.call(Verb::OpenFolder, None).await?)
    }

    async fn debug_mode(&self) -> Result<bool, BackendError> {
        Ok(self.call(Verb::GetDebugMode, None).await?)
    }

    async fn set_debug_mode(&self, enabled: bool) -> Result<(), BackendError> {
        let operand = if enabled { "true" } else { "false" };
        Ok(self
            .call(Verb::SetDebugMode, Some(OsStr::new(operand)))
            .await?)
    }

    async fn extensions_folder(&self) -> Result<PathBuf, BackendError> {
        Ok(self.call(Verb::GetExtensionsFolder, None).await?)
    }
}
