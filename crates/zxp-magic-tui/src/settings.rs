use std::path::{Path, PathBuf};

use zxp_magic::GatewayError;

/// Settings panel state: debug mode and the extensions folder.
#[derive(Debug, Default)]
pub struct SettingsState {
    /// `None` until the first read completes.
    debug_mode: Option<bool>,
    /// A `set_debug_mode` call is in flight.
    toggling: bool,
    extensions_folder: Option<PathBuf>,
}

impl SettingsState {
    pub fn debug_mode(&self) -> Option<bool> {
        self.debug_mode
    }

    pub fn is_loading(&self) -> bool {
        self.debug_mode.is_none()
    }

    pub fn is_toggling(&self) -> bool {
        self.toggling
    }

    pub fn extensions_folder(&self) -> Option<&Path> {
        self.extensions_folder.as_deref()
    }

    /// A failed read leaves debug mode shown as off.
    pub fn debug_mode_loaded(&mut self, result: Result<bool, GatewayError>) {
        let enabled = result.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not read debug mode");
            false
        });
        self.debug_mode = Some(enabled);
    }

    pub fn extensions_folder_loaded(&mut self, result: Result<PathBuf, GatewayError>) {
        match result {
            Ok(path) => self.extensions_folder = Some(path),
            Err(err) => tracing::warn!(error = %err, "could not resolve extensions folder"),
        }
    }

    /// Flip debug mode optimistically. Returns the value to send to the
    /// backend, or `None` while loading or while a change is in flight.
    pub fn begin_toggle(&mut self) -> Option<bool> {
        if self.toggling {
            return None;
        }
        let next = !self.debug_mode?;
        self.debug_mode = Some(next);
        self.toggling = true;
        Some(next)
    }

    /// Settle a toggle. On failure the previous value is restored and the
    /// error handed back for the caller to surface.
    pub fn toggle_finished(
        &mut self,
        enabled: bool,
        result: Result<(), GatewayError>,
    ) -> Result<(), GatewayError> {
        self.toggling = false;
        if result.is_err() {
            self.debug_mode = Some(!enabled);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(enabled: bool) -> SettingsState {
        let mut settings = SettingsState::default();
        settings.debug_mode_loaded(Ok(enabled));
        settings
    }

    #[test]
    fn toggle_is_refused_until_loaded() {
        let mut settings = SettingsState::default();
        assert!(settings.is_loading());
        assert_eq!(settings.begin_toggle(), None);
    }

    #[test]
    fn failed_read_shows_off() {
        let mut settings = SettingsState::default();
        settings.debug_mode_loaded(Err(GatewayError::new("denied")));
        assert_eq!(settings.debug_mode(), Some(false));
    }

    #[test]
    fn toggle_is_optimistic() {
        let mut settings = loaded(false);
        assert_eq!(settings.begin_toggle(), Some(true));
        assert_eq!(settings.debug_mode(), Some(true));
        assert!(settings.is_toggling());
        assert_eq!(settings.begin_toggle(), None);

        assert!(settings.toggle_finished(true, Ok(())).is_ok());
        assert_eq!(settings.debug_mode(), Some(true));
        assert!(!settings.is_toggling());
    }

    #[test]
    fn failed_toggle_rolls_back() {
        let mut settings = loaded(true);
        let requested = settings.begin_toggle().unwrap();
        assert!(!requested);

        let result = settings.toggle_finished(requested, Err(GatewayError::new("plist locked")));
        assert_eq!(result.unwrap_err().message(), "plist locked");
        assert_eq!(settings.debug_mode(), Some(true));
    }

    #[test]
    fn folder_failure_keeps_unknown() {
        let mut settings = SettingsState::default();
        settings.extensions_folder_loaded(Err(GatewayError::new("no home")));
        assert!(settings.extensions_folder().is_none());
        settings.extensions_folder_loaded(Ok(PathBuf::from("/extensions")));
        assert_eq!(settings.extensions_folder(), Some(Path::new("/extensions")));
    }
}
