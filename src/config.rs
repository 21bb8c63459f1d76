use crate::error::{ShellError, ShellResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

pub const CONFIG_FILE: &str = "shell.json";
pub const ENV_START_URL: &str = "CHAT_SHELL_START_URL";
pub const ENV_LOG_LEVEL: &str = "CHAT_SHELL_LOG";

/// Host-side settings. Only presentation and plumbing live here: the engine
/// feature policy and the grant policy are fixed in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub app_name: String,
    /// Where the hosted client is loaded from. `None` loads the bundled build.
    pub start_url: Option<String>,
    /// Web inspector. Follows the build profile unless set.
    pub devtools: bool,
    pub log_level: String,
    pub window_label: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            app_name: "Chat E2EE".to_string(),
            start_url: None,
            devtools: cfg!(debug_assertions),
            log_level: "info".to_string(),
            window_label: "main".to_string(),
        }
    }
}

impl ShellConfig {
    /// Read `shell.json` from `dir`, then apply environment overrides.
    ///
    /// Startup never stops here. A missing file yields the defaults; a file
    /// that cannot be read or parsed is replaced by the defaults and its
    /// error is handed back for the caller to report. Overrides apply in
    /// every case.
    pub fn load(dir: &Path) -> (Self, Option<ShellError>) {
        Self::load_with(dir, |key| std::env::var(key).ok())
    }

    pub fn load_with<F>(dir: &Path, lookup: F) -> (Self, Option<ShellError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config, error) = match Self::read(dir) {
            Ok(config) => (config, None),
            Err(e) => (ShellConfig::default(), Some(e)),
        };
        (config.with_overrides(lookup), error)
    }

    fn read(dir: &Path) -> ShellResult<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(ShellConfig::default());
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_START_URL).filter(|s| !s.trim().is_empty()) {
            self.start_url = Some(url);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|s| !s.trim().is_empty()) {
            self.log_level = level;
        }
        self
    }

    /// Unknown level names fall back to `Info`.
    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level
            .trim()
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }

    /// Parsed `start_url`, if one is configured.
    pub fn start_url(&self) -> ShellResult<Option<Url>> {
        self.start_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|e| ShellError::Config(format!("start_url '{raw}': {e}")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, error) = ShellConfig::load_with(dir.path(), no_env);
        assert!(error.is_none());
        assert_eq!(config.app_name, "Chat E2EE");
        assert_eq!(config.window_label, "main");
        assert_eq!(config.devtools, cfg!(debug_assertions));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "devtools": true, "start_url": "https://chat.example.org" }"#,
        )
        .unwrap();

        let (config, error) = ShellConfig::load_with(dir.path(), no_env);
        assert!(error.is_none());
        assert!(config.devtools);
        assert_eq!(config.app_name, "Chat E2EE");
        assert_eq!(config.log_level, ShellConfig::default().log_level);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();

        let (config, error) = ShellConfig::load_with(dir.path(), no_env);
        assert!(matches!(error, Some(ShellError::Json(_))));
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn malformed_file_still_honours_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();

        let (config, error) = ShellConfig::load_with(dir.path(), |key| match key {
            ENV_START_URL => Some("http://10.0.2.2:3000".into()),
            ENV_LOG_LEVEL => Some("debug".into()),
            _ => None,
        });
        assert!(error.is_some());
        assert_eq!(config.start_url.as_deref(), Some("http://10.0.2.2:3000"));
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
        assert_eq!(config.app_name, "Chat E2EE");
    }

    #[test]
    fn unreadable_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be
        std::fs::create_dir(dir.path().join(CONFIG_FILE)).unwrap();

        let (config, error) = ShellConfig::load_with(dir.path(), no_env);
        assert!(matches!(error, Some(ShellError::Io(_))));
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn env_overrides_file_values() {
        let config = ShellConfig {
            start_url: Some("https://from-file.example".into()),
            ..Default::default()
        }
        .with_overrides(|key| match key {
            ENV_START_URL => Some("http://10.0.2.2:3000".into()),
            ENV_LOG_LEVEL => Some("trace".into()),
            _ => None,
        });

        assert_eq!(config.start_url.as_deref(), Some("http://10.0.2.2:3000"));
        assert_eq!(config.log_level(), log::LevelFilter::Trace);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let config = ShellConfig::default().with_overrides(|_| Some("  ".into()));
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = ShellConfig {
            log_level: "chatty".into(),
            ..Default::default()
        };
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn start_url_is_validated() {
        let good = ShellConfig {
            start_url: Some("https://localhost:3000/chat".into()),
            ..Default::default()
        };
        assert_eq!(
            good.start_url().unwrap().unwrap().as_str(),
            "https://localhost:3000/chat"
        );

        let bad = ShellConfig {
            start_url: Some("not a url".into()),
            ..Default::default()
        };
        assert!(matches!(bad.start_url(), Err(ShellError::Config(_))));

        assert!(ShellConfig::default().start_url().unwrap().is_none());
    }
}
