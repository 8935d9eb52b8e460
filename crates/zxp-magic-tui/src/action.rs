use std::path::PathBuf;

use zxp_magic::{ExtensionRecord, GatewayError, InstallOutcome};

use crate::library::RefreshTicket;

/// Commands returned by the app to the event loop for side-effect execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// No side effect needed.
    None,
    /// Quit the application.
    Quit,
    /// Install the package at the given path.
    Install(PathBuf),
    /// List installed extensions under the given ticket.
    RefreshLibrary(RefreshTicket),
    /// Remove an installed extension.
    Uninstall(ExtensionRecord),
    LoadDebugMode,
    LoadExtensionsFolder,
    SetDebugMode(bool),
    OpenExtensionsFolder,
}

/// Actions dispatched back into the app from async tasks.
#[derive(Debug)]
pub enum Action {
    InstallCompleted(Result<InstallOutcome, GatewayError>),
    LibraryRefreshed {
        ticket: RefreshTicket,
        result: Result<Vec<ExtensionRecord>, GatewayError>,
    },
    UninstallCompleted {
        record: ExtensionRecord,
        result: Result<(), GatewayError>,
    },
    DebugModeLoaded(Result<bool, GatewayError>),
    DebugModeChanged {
        enabled: bool,
        result: Result<(), GatewayError>,
    },
    ExtensionsFolderLoaded(Result<PathBuf, GatewayError>),
    ExtensionsFolderOpened(Result<(), GatewayError>),
}
