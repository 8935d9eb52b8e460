use std::path::{Path, PathBuf};

use zxp_magic::{ExtensionId, ExtensionRecord};

use crate::library::RefreshTicket;

/// Install lifecycle.
///
/// `Finalizing` covers the gap between a successful install command and the
/// library refresh that follows it; the success card appears only once that
/// refresh has landed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InstallState {
    #[default]
    Idle,
    Installing {
        package: PathBuf,
    },
    Finalizing {
        record: ExtensionRecord,
        refresh: RefreshTicket,
    },
    Settled(ExtensionRecord),
}

impl InstallState {
    /// An install is in flight; new pick or drop triggers are refused.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Installing { .. } | Self::Finalizing { .. })
    }

    pub fn settled(&self) -> Option<&ExtensionRecord> {
        match self {
            Self::Settled(record) => Some(record),
            _ => None,
        }
    }

    pub fn package(&self) -> Option<&Path> {
        match self {
            Self::Installing { package } => Some(package),
            _ => None,
        }
    }

    /// Enter `Installing`, discarding any previous success. Returns false
    /// and changes nothing while busy.
    pub fn begin(&mut self, package: PathBuf) -> bool {
        if self.is_busy() {
            return false;
        }
        *self = Self::Installing { package };
        true
    }

    pub fn command_succeeded(&mut self, record: ExtensionRecord, refresh: RefreshTicket) {
        *self = Self::Finalizing { record, refresh };
    }

    pub fn command_failed(&mut self) {
        *self = Self::Idle;
    }

    /// A refresh issued under `ticket` completed, successfully or not.
    pub fn refresh_landed(&mut self, ticket: RefreshTicket) {
        if let Self::Finalizing { record, refresh } = self
            && ticket >= *refresh
        {
            *self = Self::Settled(record.clone());
        }
    }

    /// "Install another" or "view in library".
    pub fn dismiss(&mut self) {
        if matches!(self, Self::Settled(_)) {
            *self = Self::Idle;
        }
    }

    /// Drop a settled success card for an extension that was just removed.
    pub fn forget(&mut self, id: &ExtensionId) {
        if self.settled().is_some_and(|r| &r.id == id) {
            *self = Self::Idle;
        }
    }
}
