use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::{Backend, BackendError, ExtensionId, ExtensionRecord, HostCompatibility, InstallOutcome};

/// A call observed by [`FakeBackend`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Install(PathBuf),
    Inspect(PathBuf),
    List,
    Uninstall(ExtensionId),
    OpenFolder,
    GetDebugMode,
    SetDebugMode(bool),
    GetExtensionsFolder,
}

/// Build a record the way the backend would after installing `id`.
pub fn sample_record(id: &str) -> ExtensionRecord {
    ExtensionRecord {
        id: ExtensionId::new(id),
        name: id.rsplit('.').next().unwrap_or(id).to_owned(),
        version: "1.0.0".to_owned(),
        description: Some(format!("{id} description")),
        author: None,
        cep_runtime_version: Some("11.0".to_owned()),
        host_compatibility: vec![HostCompatibility::new("Photoshop", "All")],
        install_path: Some(PathBuf::from("/extensions").join(id)),
        icon_path: None,
    }
}

#[derive(Default)]
struct State {
    records: Vec<ExtensionRecord>,
    calls: Vec<BackendCall>,
    install_replies: VecDeque<Result<InstallOutcome, BackendError>>,
    list_failures: VecDeque<BackendError>,
    uninstall_failures: VecDeque<BackendError>,
    set_debug_failures: VecDeque<BackendError>,
    debug_mode: bool,
}

/// In-memory backend for tests. Keeps an ordered extension list, records
/// every call and fails on demand.
///
/// Unless a reply is queued, `install` succeeds with a record whose id is
/// `com.example.<file stem>` and adds it to the list.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ExtensionRecord>) -> Self {
        let backend = Self::new();
        backend.lock().records = records;
        backend
    }

    pub fn add(&self, record: ExtensionRecord) {
        self.lock().records.push(record);
    }

    /// Queue the reply for the next `install` call.
    pub fn queue_install(&self, reply: Result<InstallOutcome, BackendError>) {
        self.lock().install_replies.push_back(reply);
    }

    pub fn fail_next_list(&self, err: BackendError) {
        self.lock().list_failures.push_back(err);
    }

    pub fn fail_next_uninstall(&self, err: BackendError) {
        self.lock().uninstall_failures.push_back(err);
    }

    pub fn fail_next_set_debug_mode(&self, err: BackendError) {
        self.lock().set_debug_failures.push_back(err);
    }

    pub fn records(&self) -> Vec<ExtensionRecord> {
        self.lock().records.clone()
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    /// Number of `install` calls that reached the backend.
    pub fn install_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, BackendCall::Install(_)))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn record_for_package(path: &Path) -> ExtensionRecord {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("package");
    sample_record(&format!("com.example.{stem}"))
}

#[async_trait::async_trait]
impl Backend for FakeBackend {
    fn label(&self) -> &str {
        "fake"
    }

    async fn install(&self, path: &Path) -> Result<InstallOutcome, BackendError> {
        let mut state = self.lock();
        state.calls.push(BackendCall::Install(path.to_path_buf()));

        if let Some(reply) = state.install_replies.pop_front() {
            if let Ok(InstallOutcome {
                succeeded: true,
                record: Some(record),
                ..
            }) = &reply
            {
                state.records.retain(|r| r.id != record.id);
                state.records.push(record.clone());
            }
            return reply;
        }

        let record = record_for_package(path);
        state.records.retain(|r| r.id != record.id);
        state.records.push(record.clone());
        Ok(InstallOutcome::success(record))
    }

    async fn inspect(&self, path: &Path) -> Result<ExtensionRecord, BackendError> {
        self.lock().calls.push(BackendCall::Inspect(path.to_path_buf()));
        let mut record = record_for_package(path);
        record.install_path = None;
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ExtensionRecord>, BackendError> {
        let mut state = self.lock();
        state.calls.push(BackendCall::List);
        if let Some(err) = state.list_failures.pop_front() {
            return Err(err);
        }
        Ok(state.records.clone())
    }

    async fn uninstall(&self, id: &ExtensionId) -> Result<(), BackendError> {
        let mut state = self.lock();
        state.calls.push(BackendCall::Uninstall(id.clone()));
        if let Some(err) = state.uninstall_failures.pop_front() {
            return Err(err);
        }
        let before = state.records.len();
        state.records.retain(|r| &r.id != id);
        if state.records.len() == before {
            return Err(BackendError::Rejected(format!(
                "Extension {id} is not installed"
            )));
        }
        Ok(())
    }

    async fn open_folder(&self) -> Result<(), BackendError> {
        self.lock().calls.push(BackendCall::OpenFolder);
        Ok(())
    }

    async fn debug_mode(&self) -> Result<bool, BackendError> {
        let mut state = self.lock();
        state.calls.push(BackendCall::GetDebugMode);
        Ok(state.debug_mode)
    }

    async fn set_debug_mode(&self, enabled: bool) -> Result<(), BackendError> {
        let mut state = self.lock();
        state.calls.push(BackendCall::SetDebugMode(enabled));
        if let Some(err) = state.set_debug_failures.pop_front() {
            return Err(err);
        }
        state.debug_mode = enabled;
        Ok(())
    }

    async fn extensions_folder(&self) -> Result<PathBuf, BackendError> {
        self.lock().calls.push(BackendCall::GetExtensionsFolder);
        Ok(PathBuf::from("/extensions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_install_adds_record_to_list() {
        let backend = FakeBackend::new();
        let outcome = backend.install(Path::new("/tmp/panel.zxp")).await.unwrap();
        assert!(outcome.succeeded);

        let list = backend.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, ExtensionId::new("com.example.panel"));
    }

    #[tokio::test]
    async fn queued_failure_leaves_list_untouched() {
        let backend = FakeBackend::new();
        backend.queue_install(Ok(InstallOutcome::failure("corrupt archive")));

        let outcome = backend.install(Path::new("/tmp/panel.zxp")).await.unwrap();
        assert!(!outcome.succeeded);
        assert!(backend.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn uninstall_missing_id_is_rejected() {
        let backend = FakeBackend::new();
        let result = backend.uninstall(&ExtensionId::new("missing")).await;
        assert!(matches!(result, Err(BackendError::Rejected(_))));
    }

    #[tokio::test]
    async fn list_preserves_arrival_order() {
        let backend = FakeBackend::with_records(vec![sample_record("b"), sample_record("a")]);
        let ids: Vec<_> = backend
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn calls_are_recorded_in_order() {
        let backend = FakeBackend::new();
        backend.list().await.unwrap();
        backend.set_debug_mode(true).await.unwrap();
        assert_eq!(
            backend.calls(),
            vec![BackendCall::List, BackendCall::SetDebugMode(true)]
        );
    }
}
