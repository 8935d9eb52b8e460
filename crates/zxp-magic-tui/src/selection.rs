use zxp_magic::{ExtensionId, ExtensionRecord};

/// The single extension whose detail view is open, if any.
#[derive(Debug, Default)]
pub struct Selection {
    record: Option<ExtensionRecord>,
}

impl Selection {
    pub fn current(&self) -> Option<&ExtensionRecord> {
        self.record.as_ref()
    }

    pub fn is_selected(&self, id: &ExtensionId) -> bool {
        self.record.as_ref().is_some_and(|r| &r.id == id)
    }

    pub fn select(&mut self, record: ExtensionRecord) {
        self.record = Some(record);
    }

    pub fn clear(&mut self) {
        self.record = None;
    }

    /// Clear only if `id` is the selected record. Returns whether it was.
    pub fn clear_if(&mut self, id: &ExtensionId) -> bool {
        let hit = self.is_selected(id);
        if hit {
            self.record = None;
        }
        hit
    }

    /// Bring the selection in line with a fresh library snapshot: drop it if
    /// its id vanished, otherwise take the newer record.
    pub fn reconcile(&mut self, records: &[ExtensionRecord]) {
        let Some(selected) = &self.record else {
            return;
        };
        self.record = records.iter().find(|r| r.id == selected.id).cloned();
    }
}
