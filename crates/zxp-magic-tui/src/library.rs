use zxp_magic::{ExtensionId, ExtensionRecord, GatewayError};

/// Identifies one refresh request. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// What happened to a completed refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// The list call failed; previous contents were kept.
    Failed,
    /// A newer refresh already landed; this result was discarded.
    Superseded,
}

/// Verbatim snapshot of the backend's extension list.
///
/// Only replaced wholesale by a completed refresh; never patched from
/// install or uninstall results.
#[derive(Debug)]
pub struct LibraryCache {
    records: Vec<ExtensionRecord>,
    /// True until the first successful load.
    loading: bool,
    /// Set when the latest refresh failed.
    stale: bool,
    issued: u64,
    applied: u64,
    cursor: usize,
}

impl Default for LibraryCache {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            stale: false,
            issued: 0,
            applied: 0,
            cursor: 0,
        }
    }
}

impl LibraryCache {
    pub fn records(&self) -> &[ExtensionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn contains(&self, id: &ExtensionId) -> bool {
        self.records.iter().any(|r| &r.id == id)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn record_at_cursor(&self) -> Option<&ExtensionRecord> {
        self.records.get(self.cursor)
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.records.len() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Issue a ticket for a new list call.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Apply the result of the list call issued under `ticket`.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<ExtensionRecord>, GatewayError>,
    ) -> RefreshOutcome {
        if ticket.0 <= self.applied {
            tracing::debug!(ticket = ticket.0, applied = self.applied, "discarding superseded refresh");
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(records) => {
                self.applied = ticket.0;
                self.records = records;
                self.loading = false;
                self.stale = false;
                self.cursor = self.cursor.min(self.records.len().saturating_sub(1));
                RefreshOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(error = %err, "library refresh failed, keeping previous list");
                self.stale = true;
                RefreshOutcome::Failed
            }
        }
    }
}
