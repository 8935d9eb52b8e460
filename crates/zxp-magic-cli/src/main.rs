mod commands;
mod config;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use zxp_magic::CommandGateway;
use zxp_magic_process::{ProcessBackend, ProcessBackendConfig};
use zxp_magic_tui::RunOptions;

use crate::config::AppConfig;

const LOG_ENV: &str = "ZXP_MAGIC_LOG";

#[derive(Parser)]
#[command(name = "zxp-magic")]
#[command(about = "Install and manage Adobe CEP extension packages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Install a .zxp or .zxpinstall package
    Install {
        /// Path to the package file
        path: PathBuf,
    },
    /// Show what a package contains without installing it
    Inspect {
        /// Path to the package file
        path: PathBuf,
    },
    /// List installed extensions
    List,
    /// Show details of an installed extension
    Show {
        /// Extension ID (e.g. com.example.panel)
        id: String,
    },
    /// Remove an installed extension
    Uninstall {
        /// Extension ID (e.g. com.example.panel)
        id: String,
    },
    /// Print the extensions folder
    Folder {
        /// Also reveal it in the file manager
        #[arg(long)]
        open: bool,
    },
    /// Show or change the host debug mode
    Debug {
        /// New setting; omit to print the current one
        setting: Option<Toggle>,
    },
    /// Launch the interactive TUI
    Tui,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("could not determine cache directory")?;
    let dir = base.join("zxp-magic");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create cache directory: {}", dir.display()))?;
    Ok(dir)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// One-shot commands log to stderr next to their output.
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// The TUI owns the terminal, so its log goes to a file.
fn init_file_logging() -> Result<PathBuf> {
    let path = cache_dir()?.join("zxp-magic.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}

fn build_gateway(app_config: &AppConfig) -> CommandGateway {
    let program = config::helper_program(app_config, std::env::var(config::HELPER_ENV).ok());
    let mut backend_config = ProcessBackendConfig::new(program);
    backend_config.args = app_config.backend.args.clone();
    backend_config.timeout = app_config.backend.timeout();

    tracing::debug!(
        program = %backend_config.program.display(),
        timeout_secs = backend_config.timeout.as_secs(),
        "using helper"
    );
    CommandGateway::new(Arc::new(ProcessBackend::new(backend_config)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let app_config = config::load_config();

    if matches!(cli.command, Command::Tui) {
        match init_file_logging() {
            Ok(path) => tracing::info!(log = %path.display(), "starting TUI"),
            Err(e) => eprintln!("warning: logging disabled: {e:#}"),
        }
    } else {
        init_stderr_logging();
    }

    let gateway = build_gateway(&app_config);

    match cli.command {
        Command::Install { path } => commands::install::run(&gateway, &path).await,
        Command::Inspect { path } => commands::inspect::run(&gateway, &path).await,
        Command::List => commands::list::run(&gateway).await,
        Command::Show { id } => commands::show::run(&gateway, &id).await,
        Command::Uninstall { id } => commands::uninstall::run(&gateway, &id).await,
        Command::Folder { open } => commands::folder::run(&gateway, open).await,
        Command::Debug { setting } => {
            let setting = setting.map(|t| matches!(t, Toggle::On));
            commands::debug::run(&gateway, setting).await
        }
        Command::Tui => {
            let options = RunOptions {
                notification_lifetime: app_config.notifications.lifetime(),
            };
            zxp_magic_tui::run(gateway, options).await
        }
    }
}
