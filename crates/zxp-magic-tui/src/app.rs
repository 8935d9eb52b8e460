use std::path::PathBuf;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui_explorer::{FileExplorer, Theme};
use tokio::time::Duration;
use zxp_magic::{ExtensionId, ExtensionRecord, validate_package_path};

use crate::action::{Action, AppCommand};
use crate::drag::{self, DragSignal, DragTracker, DropResolution, FileObjectEvent, NativeDragEvent};
use crate::install::InstallState;
use crate::library::{LibraryCache, RefreshOutcome};
use crate::notification::NotificationQueue;
use crate::selection::Selection;
use crate::settings::SettingsState;

/// Top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Install,
    Library,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Install, Tab::Library];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Install => "Install",
            Tab::Library => "Library",
        }
    }

    fn next(self) -> Self {
        match self {
            Tab::Install => Tab::Library,
            Tab::Library => Tab::Install,
        }
    }
}

/// UI mode the app is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    FilePicker,
    UninstallConfirm,
}

/// The controller state. This is a pure state machine: inputs produce
/// commands (side effects), actions update state.
///
/// Library, selection and install state are only written from the flows
/// below; views read them through accessors.
pub struct App {
    pub tab: Tab,
    /// Settings replace the active tab's content while shown.
    pub show_settings: bool,
    pub mode: Mode,
    /// Backend label for display.
    pub backend_label: String,
    /// File explorer for picking a package.
    pub file_explorer: Option<FileExplorer>,
    /// Directory the picker last browsed.
    pub last_pick_dir: Option<PathBuf>,
    pub spinner_frame: usize,

    install: InstallState,
    drag: DragTracker,
    library: LibraryCache,
    selection: Selection,
    notifications: NotificationQueue,
    settings: SettingsState,
    /// Awaiting confirmation.
    pending_uninstall: Option<ExtensionRecord>,
    /// In flight.
    uninstalling: Option<ExtensionId>,
}

impl App {
    pub fn new(backend_label: String) -> Self {
        Self::with_notification_lifetime(backend_label, crate::notification::DEFAULT_LIFETIME)
    }

    pub fn with_notification_lifetime(backend_label: String, lifetime: Duration) -> Self {
        Self {
            tab: Tab::Install,
            show_settings: false,
            mode: Mode::Normal,
            backend_label,
            file_explorer: None,
            last_pick_dir: None,
            spinner_frame: 0,
            install: InstallState::Idle,
            drag: DragTracker::default(),
            library: LibraryCache::default(),
            selection: Selection::default(),
            notifications: NotificationQueue::new(lifetime),
            settings: SettingsState::default(),
            pending_uninstall: None,
            uninstalling: None,
        }
    }

    /// Commands to issue once at startup.
    pub fn initial_commands(&mut self) -> Vec<AppCommand> {
        vec![
            self.refresh(),
            AppCommand::LoadDebugMode,
            AppCommand::LoadExtensionsFolder,
        ]
    }

    pub fn install_state(&self) -> &InstallState {
        &self.install
    }

    pub fn drag(&self) -> &DragTracker {
        &self.drag
    }

    pub fn library(&self) -> &LibraryCache {
        &self.library
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// The event loop awaits expiry through this.
    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    pub fn settings(&self) -> &SettingsState {
        &self.settings
    }

    pub fn pending_uninstall(&self) -> Option<&ExtensionRecord> {
        self.pending_uninstall.as_ref()
    }

    pub fn uninstalling(&self) -> Option<&ExtensionId> {
        self.uninstalling.as_ref()
    }

    /// Handle a terminal event, returning a command for the event loop.
    ///
    /// Terminals deliver dropped files as a bracketed paste. Drops only
    /// count in normal mode, never over an open overlay.
    pub fn handle_event(&mut self, event: Event) -> AppCommand {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(_) if self.mode != Mode::Normal => {
                tracing::debug!(mode = ?self.mode, "ignoring paste over overlay");
                AppCommand::None
            }
            Event::Paste(text) => self.handle_native_drag(drag::native_drop_from_paste(&text)),
            _ => AppCommand::None,
        }
    }

    /// Handle an async action (result from a background task).
    pub fn handle_action(&mut self, action: Action) -> AppCommand {
        match action {
            Action::InstallCompleted(result) => {
                let result = result
                    .map_err(|e| e.to_string())
                    .and_then(|outcome| outcome.into_result());
                match result {
                    Ok(record) => {
                        tracing::info!(id = %record.id, "extension installed");
                        let ticket = self.library.begin_refresh();
                        self.install.command_succeeded(record, ticket);
                        AppCommand::RefreshLibrary(ticket)
                    }
                    Err(msg) => {
                        tracing::info!(error = %msg, "install failed");
                        self.install.command_failed();
                        self.notifications.error(msg);
                        AppCommand::None
                    }
                }
            }
            Action::LibraryRefreshed { ticket, result } => {
                if self.library.complete_refresh(ticket, result) == RefreshOutcome::Applied {
                    self.selection.reconcile(self.library.records());
                }
                self.install.refresh_landed(ticket);
                AppCommand::None
            }
            Action::UninstallCompleted { record, result } => {
                self.uninstalling = None;
                match result {
                    Ok(()) => {
                        tracing::info!(id = %record.id, "extension removed");
                        self.selection.clear_if(&record.id);
                        self.install.forget(&record.id);
                        self.notifications.success(format!("'{}' removed.", record.name));
                        self.refresh()
                    }
                    Err(err) => {
                        self.notifications.error(err.message());
                        AppCommand::None
                    }
                }
            }
            Action::DebugModeLoaded(result) => {
                self.settings.debug_mode_loaded(result);
                AppCommand::None
            }
            Action::DebugModeChanged { enabled, result } => {
                if let Err(err) = self.settings.toggle_finished(enabled, result) {
                    self.notifications
                        .error(format!("Could not change debug mode: {err}"));
                }
                AppCommand::None
            }
            Action::ExtensionsFolderLoaded(result) => {
                self.settings.extensions_folder_loaded(result);
                AppCommand::None
            }
            Action::ExtensionsFolderOpened(result) => {
                if let Err(err) = result {
                    tracing::warn!(error = %err, "could not open extensions folder");
                }
                AppCommand::None
            }
        }
    }

    /// Tick the app forward (called on interval). Drives the spinner.
    pub fn tick(&mut self) {
        if self.install.is_busy() || self.library.is_loading() || self.uninstalling.is_some() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Clear transient state before the view goes away.
    pub fn teardown(&mut self) {
        self.drag.reset();
        self.notifications.dismiss();
        self.file_explorer = None;
    }

    // --- Flows ---

    pub fn handle_file_object_drag(&mut self, event: FileObjectEvent) -> AppCommand {
        match drag::from_file_object(event) {
            Some(signal) => self.handle_drag(signal),
            None => AppCommand::None,
        }
    }

    pub fn handle_native_drag(&mut self, event: NativeDragEvent) -> AppCommand {
        match drag::from_native(event) {
            Some(signal) => self.handle_drag(signal),
            None => AppCommand::None,
        }
    }

    pub fn handle_drag(&mut self, signal: DragSignal) -> AppCommand {
        match self.drag.apply(signal) {
            DropResolution::Ignored => AppCommand::None,
            DropResolution::Rejected { path, error } => {
                tracing::debug!(path = %path.display(), "rejected drop");
                self.notifications.error(error.to_string());
                AppCommand::None
            }
            DropResolution::Accepted(path) => self.start_install(path),
        }
    }

    /// Install a manually chosen package.
    pub fn install_package(&mut self, path: PathBuf) -> AppCommand {
        if let Err(err) = validate_package_path(&path) {
            self.notifications.error(err.to_string());
            return AppCommand::None;
        }
        self.start_install(path)
    }

    fn start_install(&mut self, path: PathBuf) -> AppCommand {
        if !self.install.begin(path.clone()) {
            tracing::debug!(path = %path.display(), "install already running, ignoring");
            return AppCommand::None;
        }
        self.tab = Tab::Install;
        self.show_settings = false;
        AppCommand::Install(path)
    }

    /// "Install another" on the success card.
    pub fn install_another(&mut self) {
        self.install.dismiss();
    }

    /// "View in library" on the success card.
    pub fn view_in_library(&mut self) {
        self.install.dismiss();
        self.switch_tab(Tab::Library);
    }

    pub fn refresh(&mut self) -> AppCommand {
        AppCommand::RefreshLibrary(self.library.begin_refresh())
    }

    pub fn select(&mut self, record: ExtensionRecord) {
        self.selection.select(record);
    }

    pub fn close_detail(&mut self) {
        self.selection.clear();
    }

    /// Ask for confirmation before removing `record`.
    pub fn request_uninstall(&mut self, record: ExtensionRecord) -> AppCommand {
        if self.uninstalling.is_some() {
            return AppCommand::None;
        }
        self.pending_uninstall = Some(record);
        self.mode = Mode::UninstallConfirm;
        AppCommand::None
    }

    pub fn confirm_uninstall(&mut self) -> AppCommand {
        self.mode = Mode::Normal;
        match self.pending_uninstall.take() {
            Some(record) => self.uninstall(record),
            None => AppCommand::None,
        }
    }

    pub fn cancel_uninstall(&mut self) {
        self.pending_uninstall = None;
        self.mode = Mode::Normal;
    }

    /// Remove `record` without asking. Ignored while another removal runs.
    pub fn uninstall(&mut self, record: ExtensionRecord) -> AppCommand {
        if self.uninstalling.is_some() {
            return AppCommand::None;
        }
        self.uninstalling = Some(record.id.clone());
        AppCommand::Uninstall(record)
    }

    pub fn toggle_debug_mode(&mut self) -> AppCommand {
        match self.settings.begin_toggle() {
            Some(enabled) => AppCommand::SetDebugMode(enabled),
            None => AppCommand::None,
        }
    }

    pub fn open_extensions_folder(&mut self) -> AppCommand {
        AppCommand::OpenExtensionsFolder
    }

    pub fn open_file_picker(&mut self) -> AppCommand {
        if self.install.is_busy() {
            return AppCommand::None;
        }
        let theme = Theme::default().add_default_title();
        match FileExplorer::with_theme(theme) {
            Ok(mut explorer) => {
                if let Some(dir) = &self.last_pick_dir {
                    let _ = explorer.set_cwd(dir);
                }
                self.file_explorer = Some(explorer);
                self.mode = Mode::FilePicker;
            }
            Err(e) => {
                self.notifications
                    .error(format!("Failed to open file browser: {e}"));
            }
        }
        AppCommand::None
    }

    fn close_file_picker(&mut self) {
        if let Some(explorer) = self.file_explorer.take() {
            self.last_pick_dir = Some(explorer.cwd().clone());
        }
        self.mode = Mode::Normal;
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.show_settings = false;
    }

    // --- Keys ---

    fn handle_key(&mut self, key: KeyEvent) -> AppCommand {
        // Ctrl+C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppCommand::Quit;
        }

        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::FilePicker => self.handle_file_picker_key(key),
            Mode::UninstallConfirm => self.handle_uninstall_confirm_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('q') => return AppCommand::Quit,
            KeyCode::Char('s') => {
                self.show_settings = !self.show_settings;
                return AppCommand::None;
            }
            KeyCode::Tab => {
                self.switch_tab(self.tab.next());
                return AppCommand::None;
            }
            KeyCode::Char('1') => {
                self.switch_tab(Tab::Install);
                return AppCommand::None;
            }
            KeyCode::Char('2') => {
                self.switch_tab(Tab::Library);
                return AppCommand::None;
            }
            _ => {}
        }

        if self.show_settings {
            return self.handle_settings_key(key);
        }
        if self.selection.current().is_some() {
            return self.handle_detail_key(key);
        }
        match self.tab {
            Tab::Install => self.handle_install_key(key),
            Tab::Library => self.handle_library_key(key),
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('d') | KeyCode::Char(' ') => self.toggle_debug_mode(),
            KeyCode::Char('o') => self.open_extensions_folder(),
            KeyCode::Esc => {
                self.show_settings = false;
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                self.close_detail();
                AppCommand::None
            }
            KeyCode::Char('x') | KeyCode::Delete => match self.selection.current().cloned() {
                Some(record) => self.request_uninstall(record),
                None => AppCommand::None,
            },
            KeyCode::Char('o') => self.open_extensions_folder(),
            _ => AppCommand::None,
        }
    }

    fn handle_install_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('o') | KeyCode::Char('i') | KeyCode::Enter => {
                if self.install.settled().is_some() {
                    self.install_another();
                }
                self.open_file_picker()
            }
            KeyCode::Char('n') => {
                self.install_another();
                AppCommand::None
            }
            KeyCode::Char('l') => {
                if self.install.settled().is_some() {
                    self.view_in_library();
                }
                AppCommand::None
            }
            KeyCode::Esc => {
                self.notifications.dismiss();
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }

    fn handle_library_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.library.move_cursor_down();
                AppCommand::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.library.move_cursor_up();
                AppCommand::None
            }
            KeyCode::Enter => {
                if let Some(record) = self.library.record_at_cursor().cloned() {
                    self.select(record);
                }
                AppCommand::None
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                match self.library.record_at_cursor().cloned() {
                    Some(record) => self.request_uninstall(record),
                    None => AppCommand::None,
                }
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Esc => {
                self.notifications.dismiss();
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }

    fn handle_file_picker_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Esc => {
                self.close_file_picker();
                AppCommand::None
            }
            KeyCode::Enter => {
                let Some(explorer) = &mut self.file_explorer else {
                    self.mode = Mode::Normal;
                    return AppCommand::None;
                };
                let current = explorer.current();
                if current.is_dir() {
                    let _ = explorer.handle(&Event::Key(key));
                    return AppCommand::None;
                }
                let path = current.path().clone();
                self.close_file_picker();
                self.install_package(path)
            }
            _ => {
                // Pass other keys to the file explorer for navigation
                if let Some(explorer) = &mut self.file_explorer {
                    let event = Event::Key(key);
                    let _ = explorer.handle(&event);
                }
                AppCommand::None
            }
        }
    }

    fn handle_uninstall_confirm_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => self.confirm_uninstall(),
            KeyCode::Esc | KeyCode::Char('n') => {
                self.cancel_uninstall();
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }
}
