pub mod action;
pub mod app;
pub mod drag;
pub mod install;
pub mod library;
pub mod notification;
mod render;
pub mod selection;
pub mod settings;

use crossterm::ExecutableCommand;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio::time::{Duration, interval};
use zxp_magic::CommandGateway;

use crate::action::{Action, AppCommand};
use crate::app::App;

/// Options for [`run`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// How long a notification stays on screen.
    pub notification_lifetime: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            notification_lifetime: notification::DEFAULT_LIFETIME,
        }
    }
}

/// Launch the interactive TUI. Returns when the user quits.
pub async fn run(gateway: CommandGateway, options: RunOptions) -> anyhow::Result<()> {
    // Terminal setup.
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, gateway, options).await;

    // Terminal teardown (always runs).
    disable_raw_mode()?;
    std::io::stdout().execute(DisableBracketedPaste)?;
    std::io::stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    gateway: CommandGateway,
    options: RunOptions,
) -> anyhow::Result<()> {
    use futures::StreamExt;

    let mut app = App::with_notification_lifetime(
        gateway.label().to_owned(),
        options.notification_lifetime,
    );

    let (action_tx, mut action_rx) = mpsc::channel::<Action>(32);
    let mut event_stream = EventStream::new();
    let mut tick_interval = interval(Duration::from_millis(100));

    for command in app.initial_commands() {
        dispatch(&gateway, &action_tx, command);
    }

    loop {
        terminal.draw(|frame| render::render(frame, &app))?;

        let command = tokio::select! {
            Some(event_result) = event_stream.next() => {
                match event_result {
                    Ok(event) => {
                        // Key presses and pasted text (terminal file drops) only.
                        match &event {
                            Event::Key(key) if key.kind != KeyEventKind::Press => continue,
                            Event::Key(_) | Event::Paste(_) => {}
                            _ => continue,
                        }
                        app.handle_event(event)
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "terminal event error");
                        continue;
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.handle_action(action)
            }
            Some(expired) = app.notifications_mut().expired() => {
                tracing::debug!(text = %expired.text, "notification expired");
                AppCommand::None
            }
            _ = tick_interval.tick() => {
                app.tick();
                AppCommand::None
            }
        };

        match command {
            AppCommand::None => {}
            AppCommand::Quit => break,
            command => dispatch(&gateway, &action_tx, command),
        }
    }

    app.teardown();
    Ok(())
}

/// Run `command` on its own task and feed the result back to the loop.
fn dispatch(gateway: &CommandGateway, tx: &mpsc::Sender<Action>, command: AppCommand) {
    let gateway = gateway.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        if let Some(action) = perform(&gateway, command).await {
            let _ = tx.send(action).await;
        }
    });
}

/// Execute one command against the gateway, producing the action that
/// reports its result. `None` and `Quit` have no side effect here.
pub async fn perform(gateway: &CommandGateway, command: AppCommand) -> Option<Action> {
    let action = match command {
        AppCommand::None | AppCommand::Quit => return None,
        AppCommand::Install(path) => Action::InstallCompleted(gateway.install_extension(&path).await),
        AppCommand::RefreshLibrary(ticket) => Action::LibraryRefreshed {
            ticket,
            result: gateway.list_extensions().await,
        },
        AppCommand::Uninstall(record) => {
            let result = gateway.uninstall_extension(&record.id).await;
            Action::UninstallCompleted { record, result }
        }
        AppCommand::LoadDebugMode => Action::DebugModeLoaded(gateway.get_debug_mode().await),
        AppCommand::LoadExtensionsFolder => {
            Action::ExtensionsFolderLoaded(gateway.get_extensions_folder_path().await)
        }
        AppCommand::SetDebugMode(enabled) => Action::DebugModeChanged {
            enabled,
            result: gateway.set_debug_mode(enabled).await,
        },
        AppCommand::OpenExtensionsFolder => {
            Action::ExtensionsFolderOpened(gateway.open_extensions_folder().await)
        }
    };
    Some(action)
}
