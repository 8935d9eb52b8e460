use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use zxp_magic::test_support::{BackendCall, FakeBackend, sample_record};
use zxp_magic::{BackendError, CommandGateway, ExtensionId, InstallOutcome};
use zxp_magic_tui::action::AppCommand;
use zxp_magic_tui::app::App;
use zxp_magic_tui::drag::{DroppedFile, FileObjectEvent, NativeDragEvent};
use zxp_magic_tui::install::InstallState;
use zxp_magic_tui::notification::NotificationKind;
use zxp_magic_tui::perform;

fn setup(backend: FakeBackend) -> (Arc<FakeBackend>, CommandGateway, App) {
    let backend = Arc::new(backend);
    let gateway = CommandGateway::new(backend.clone());
    let app = App::new(gateway.label().to_owned());
    (backend, gateway, app)
}

/// Run `command` and every follow-up command it causes, one at a time.
async fn drive(app: &mut App, gateway: &CommandGateway, command: AppCommand) {
    let mut pending = VecDeque::from([command]);
    while let Some(command) = pending.pop_front() {
        if let Some(action) = perform(gateway, command).await {
            pending.push_back(app.handle_action(action));
        }
    }
}

async fn start(app: &mut App, gateway: &CommandGateway) {
    for command in app.initial_commands() {
        drive(app, gateway, command).await;
    }
}

fn native_drop(path: &str) -> NativeDragEvent {
    NativeDragEvent::Drop {
        paths: vec![PathBuf::from(path)],
    }
}

#[tokio::test]
async fn startup_loads_library_and_settings() {
    let (backend, gateway, mut app) =
        setup(FakeBackend::with_records(vec![sample_record("com.example.a")]));
    start(&mut app, &gateway).await;

    assert!(!app.library().is_loading());
    assert_eq!(app.library().len(), 1);
    assert_eq!(app.settings().debug_mode(), Some(false));
    assert_eq!(
        app.settings().extensions_folder(),
        Some(std::path::Path::new("/extensions"))
    );
    assert!(backend.calls().contains(&BackendCall::List));
}

#[tokio::test]
async fn successful_drop_install_lands_in_library() {
    let (backend, gateway, mut app) = setup(FakeBackend::new());
    start(&mut app, &gateway).await;

    let command = app.handle_native_drag(native_drop("/Users/me/Downloads/panel.zxp"));
    assert!(matches!(command, AppCommand::Install(_)));
    drive(&mut app, &gateway, command).await;

    let settled = app.install_state().settled().expect("install should settle");
    assert_eq!(settled.id.as_str(), "com.example.panel");
    assert!(settled.host_compatibility[0].is_unconstrained());
    assert!(app.library().contains(&ExtensionId::new("com.example.panel")));
    assert!(app.selection().current().is_none());
    assert!(app.notifications().current().is_none());

    // The refresh ran strictly after the install.
    let calls = backend.calls();
    let install_at = calls
        .iter()
        .position(|c| matches!(c, BackendCall::Install(_)))
        .unwrap();
    let last_list = calls.iter().rposition(|c| *c == BackendCall::List).unwrap();
    assert!(last_list > install_at);
}

#[tokio::test]
async fn wrong_suffix_never_reaches_backend() {
    let (backend, gateway, mut app) = setup(FakeBackend::new());
    start(&mut app, &gateway).await;

    let command = app.handle_file_object_drag(FileObjectEvent::Drop {
        files: vec![DroppedFile {
            name: "notes.txt".into(),
            path: Some(PathBuf::from("/tmp/notes.txt")),
        }],
    });
    drive(&mut app, &gateway, command).await;

    assert_eq!(backend.install_count(), 0);
    let note = app.notifications().current().unwrap();
    assert_eq!(note.kind, NotificationKind::Error);
    assert!(note.text.contains(".zxp") && note.text.contains(".zxpinstall"));
}

#[tokio::test]
async fn reported_install_failure_shows_backend_message() {
    let backend = FakeBackend::new();
    backend.queue_install(Ok(InstallOutcome::failure("Manifest not found in package")));
    let (backend, gateway, mut app) = setup(backend);
    start(&mut app, &gateway).await;

    let command = app.handle_native_drag(native_drop("/tmp/broken.zxp"));
    drive(&mut app, &gateway, command).await;

    assert_eq!(*app.install_state(), InstallState::Idle);
    assert_eq!(
        app.notifications().current().unwrap().text,
        "Manifest not found in package"
    );
    assert!(backend.records().is_empty());
}

#[tokio::test]
async fn transport_failure_returns_to_idle() {
    let backend = FakeBackend::new();
    backend.queue_install(Err(BackendError::Disconnected("helper exited".into())));
    let (_backend, gateway, mut app) = setup(backend);

    let command = app.install_package(PathBuf::from("/tmp/panel.zxpinstall"));
    drive(&mut app, &gateway, command).await;

    assert_eq!(*app.install_state(), InstallState::Idle);
    let note = app.notifications().current().unwrap();
    assert!(note.is_error());
    assert!(note.text.contains("helper exited"));
}

#[tokio::test]
async fn second_drop_during_install_issues_no_backend_call() {
    let (backend, gateway, mut app) = setup(FakeBackend::new());

    let first = app.handle_native_drag(native_drop("/tmp/a.zxp"));
    let second = app.handle_native_drag(native_drop("/tmp/b.zxp"));
    assert_eq!(second, AppCommand::None);

    drive(&mut app, &gateway, first).await;
    drive(&mut app, &gateway, second).await;
    assert_eq!(backend.install_count(), 1);
}

#[tokio::test]
async fn uninstalling_selected_extension_clears_selection() {
    let (backend, gateway, mut app) = setup(FakeBackend::with_records(vec![
        sample_record("com.example.a"),
        sample_record("com.example.b"),
    ]));
    start(&mut app, &gateway).await;
    app.select(sample_record("com.example.a"));

    app.request_uninstall(sample_record("com.example.a"));
    let command = app.confirm_uninstall();
    drive(&mut app, &gateway, command).await;

    assert!(app.selection().current().is_none());
    assert!(!app.library().contains(&ExtensionId::new("com.example.a")));
    assert_eq!(app.library().len(), 1);
    assert_eq!(backend.records().len(), 1);
    let note = app.notifications().current().unwrap();
    assert_eq!(note.kind, NotificationKind::Success);
    assert_eq!(note.text, "'a' removed.");
}

#[tokio::test]
async fn uninstall_transport_failure_changes_nothing() {
    let backend = FakeBackend::with_records(vec![sample_record("com.example.a")]);
    backend.fail_next_uninstall(BackendError::Disconnected("timed out".into()));
    let (_backend, gateway, mut app) = setup(backend);
    start(&mut app, &gateway).await;
    app.select(sample_record("com.example.a"));

    let command = app.uninstall(sample_record("com.example.a"));
    drive(&mut app, &gateway, command).await;

    assert_eq!(app.library().len(), 1);
    assert_eq!(app.selection().current().unwrap().id.as_str(), "com.example.a");
    let note = app.notifications().current().unwrap();
    assert!(note.is_error());
    assert!(note.text.contains("timed out"));
    assert!(app.uninstalling().is_none());
}

#[tokio::test]
async fn failed_refresh_is_silent_and_keeps_cache() {
    let backend = FakeBackend::with_records(vec![sample_record("com.example.a")]);
    let (backend, gateway, mut app) = setup(backend);
    start(&mut app, &gateway).await;

    backend.fail_next_list(BackendError::Rejected("registry locked".into()));
    let command = app.refresh();
    drive(&mut app, &gateway, command).await;

    assert_eq!(app.library().len(), 1);
    assert!(app.library().is_stale());
    assert!(app.notifications().current().is_none());
}

#[tokio::test]
async fn debug_toggle_failure_rolls_back() {
    let backend = FakeBackend::new();
    backend.fail_next_set_debug_mode(BackendError::Rejected("permission denied".into()));
    let (backend, gateway, mut app) = setup(backend);
    start(&mut app, &gateway).await;

    let command = app.toggle_debug_mode();
    assert_eq!(command, AppCommand::SetDebugMode(true));
    drive(&mut app, &gateway, command).await;

    assert_eq!(app.settings().debug_mode(), Some(false));
    assert!(app.notifications().current().unwrap().is_error());
    assert!(backend.calls().contains(&BackendCall::SetDebugMode(true)));
}

#[tokio::test(start_paused = true)]
async fn notifications_expire_on_their_own_clock() {
    let (_backend, gateway, mut app) = setup(FakeBackend::new());
    start(&mut app, &gateway).await;

    app.install_package(PathBuf::from("/tmp/a.txt"));
    tokio::time::advance(std::time::Duration::from_millis(3000)).await;
    app.install_package(PathBuf::from("/tmp/b.pdf"));
    let second_at = tokio::time::Instant::now();

    let expired = app.notifications_mut().expired().await.unwrap();
    assert!(second_at.elapsed() >= std::time::Duration::from_millis(4000));
    assert!(expired.text.contains(".zxp"));
    assert!(app.notifications().current().is_none());
}

#[tokio::test]
async fn manual_refresh_picks_up_outside_installs() {
    let (backend, gateway, mut app) = setup(FakeBackend::new());
    start(&mut app, &gateway).await;
    assert!(app.library().is_empty());

    backend.add(sample_record("com.example.outside"));
    let command = app.refresh();
    drive(&mut app, &gateway, command).await;

    assert!(app.library().contains(&ExtensionId::new("com.example.outside")));
    assert!(!app.library().is_stale());
}
