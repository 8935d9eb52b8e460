use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Helper looked up on `PATH` when the config names none.
pub const DEFAULT_HELPER: &str = "zxp-magic-helper";

/// Environment variable that overrides `[backend] program`.
pub const HELPER_ENV: &str = "ZXP_MAGIC_HELPER";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendSection,
    pub notifications: NotificationSection,
}

/// How to reach the privileged helper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendSection {
    pub program: String,
    /// Passed before the verb on every call.
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            program: DEFAULT_HELPER.into(),
            args: Vec::new(),
            timeout_secs: zxp_magic_process::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl BackendSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationSection {
    pub duration_ms: u64,
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            duration_ms: zxp_magic_tui::notification::DEFAULT_LIFETIME.as_millis() as u64,
        }
    }
}

impl NotificationSection {
    pub fn lifetime(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Config file path: `~/.config/zxp-magic/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("zxp-magic").join("config.toml"))
}

/// Load config from file, falling back to defaults if missing.
pub fn load_config() -> AppConfig {
    if let Some(path) = config_path()
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
            return config;
        }
        eprintln!(
            "warning: failed to parse config at {}, using defaults",
            path.display()
        );
    }

    AppConfig::default()
}

/// The helper program to run, honoring [`HELPER_ENV`].
pub fn helper_program(config: &AppConfig, env_override: Option<String>) -> PathBuf {
    match env_override {
        Some(program) if !program.trim().is_empty() => PathBuf::from(program),
        _ => PathBuf::from(&config.backend.program),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.backend.program, DEFAULT_HELPER);
        assert_eq!(config.backend.timeout(), Duration::from_secs(120));
        assert_eq!(config.notifications.lifetime(), Duration::from_millis(4000));
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[backend]
program = "/opt/zxp/helper"
args = ["--bridge", "stdio"]
timeout_secs = 30

[notifications]
duration_ms = 2500
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.program, "/opt/zxp/helper");
        assert_eq!(config.backend.args, vec!["--bridge", "stdio"]);
        assert_eq!(config.backend.timeout(), Duration::from_secs(30));
        assert_eq!(config.notifications.lifetime(), Duration::from_millis(2500));
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str("[backend]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.backend.program, DEFAULT_HELPER);
        assert!(config.backend.args.is_empty());
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.notifications, NotificationSection::default());
    }

    #[test]
    fn wrong_types_fail_to_parse() {
        assert!(toml::from_str::<AppConfig>("[backend]\ntimeout_secs = \"soon\"\n").is_err());
    }

    #[test]
    fn env_override_wins_over_config() {
        let config = AppConfig::default();
        assert_eq!(
            helper_program(&config, Some("/tmp/helper".into())),
            PathBuf::from("/tmp/helper")
        );
        assert_eq!(
            helper_program(&config, Some("  ".into())),
            PathBuf::from(DEFAULT_HELPER)
        );
        assert_eq!(helper_program(&config, None), PathBuf::from(DEFAULT_HELPER));
    }
}
