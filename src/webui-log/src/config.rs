// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! `[webui-log]` section of `webui-log.toml`.
//!
//! Looked up in `./`, then `<config dir>/webui-log/`, then `/etc/webui-log/`.
//! The `level` key is passed to [`crate::configure`] as the explicit request,
//! so `SD_WEBUI_LOG_LEVEL` only applies when the file leaves it unset.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::LogSettings;

const FILE_NAME: &str = "webui-log.toml";
const SECTION: &str = "webui-log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, String),

    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Requested level (trace, debug, info, warning, error, critical)
    pub level: Option<String>,
    /// Colourise level names
    pub rich: bool,
    /// Targets pinned at WARNING; replaces the built-in list when set
    pub quiet_targets: Option<Vec<String>>,
}

/// Whole-file view; other tables in the file are ignored.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigDocument {
    #[serde(rename = "webui-log", default)]
    section: Option<LogConfig>,
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("webui-log").join(FILE_NAME));
    }
    paths.push(Path::new("/etc/webui-log").join(FILE_NAME));
    paths
}

fn read_section(path: &Path) -> Result<Option<LogConfig>, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;
    let document: ConfigDocument = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
    Ok(document.section)
}

impl LogConfig {
    /// Load `[webui-log]` from `path`. A file without the section is an error.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        read_section(path)?.ok_or_else(|| {
            ConfigError::ParseError(path.to_path_buf(), format!("missing [{SECTION}] section"))
        })
    }

    /// First file on the search path that has the section, with its path.
    /// Falls back to the defaults when none does.
    pub fn load_from_default_paths() -> Result<(Self, Option<PathBuf>), ConfigError> {
        for path in search_paths().into_iter().filter(|p| p.exists()) {
            if let Some(cfg) = read_section(&path)? {
                return Ok((cfg, Some(path)));
            }
        }
        Ok((Self::default(), None))
    }

    /// Overlay file settings on top of settings resolved from the environment.
    /// `rich` can only switch the renderer on.
    pub fn apply(&self, settings: LogSettings) -> LogSettings {
        let rich = settings.rich || self.rich;
        let settings = settings.with_rich(rich);
        match &self.quiet_targets {
            Some(targets) => settings.with_quiet_targets(targets.iter().cloned()),
            None => settings,
        }
    }

    /// Sample file contents for `--print-config`.
    pub fn example_toml() -> String {
        let example = ConfigDocument {
            section: Some(LogConfig {
                level: Some("info".to_string()),
                rich: false,
                quiet_targets: Some(vec!["reqwest".to_string(), "hyper".to_string()]),
            }),
        };
        toml::to_string_pretty(&example).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LogLevel;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_section() {
        let file = write_config(
            r#"
[webui-log]
level = "debug"
rich = true
quiet_targets = ["sqlx"]
"#,
        );
        let cfg = LogConfig::load_from_file(file.path()).unwrap();
        assert_eq!(cfg.level.as_deref(), Some("debug"));
        assert!(cfg.rich);
        assert_eq!(cfg.quiet_targets, Some(vec!["sqlx".to_string()]));
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let file = write_config("[webui-log]\nlevel = \"error\"\n");
        let cfg = LogConfig::load_from_file(file.path()).unwrap();
        assert_eq!(cfg.level.as_deref(), Some("error"));
        assert!(!cfg.rich);
        assert!(cfg.quiet_targets.is_none());
    }

    #[test]
    fn test_other_tables_ignored() {
        let file = write_config("[webui]\nport = 7860\n\n[webui-log]\nrich = true\n");
        let cfg = LogConfig::load_from_file(file.path()).unwrap();
        assert!(cfg.rich);
        assert!(cfg.level.is_none());
    }

    #[test]
    fn test_missing_section_is_error() {
        let file = write_config("[other]\nlevel = \"debug\"\n");
        let err = LogConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_, ref msg) if msg.contains("[webui-log]")));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let file = write_config("[webui-log\n");
        let err = LogConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(..)));
    }

    #[test]
    fn test_unreadable_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LogConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(..)));
    }

    #[test]
    fn test_apply_overlays_settings() {
        let cfg = LogConfig {
            level: None,
            rich: true,
            quiet_targets: Some(vec!["tonic".to_string()]),
        };
        let settings = cfg.apply(LogSettings::new(LogLevel::Debug));
        assert_eq!(settings.level, LogLevel::Debug);
        assert!(settings.rich);
        assert_eq!(settings.quiet_targets, vec!["tonic".to_string()]);

        let settings = LogConfig::default().apply(LogSettings::default().with_rich(true));
        assert!(settings.rich);
        assert_eq!(settings.quiet_targets, LogSettings::default().quiet_targets);
    }

    #[test]
    fn test_example_toml_parses() {
        let example = LogConfig::example_toml();
        let file = write_config(&example);
        let cfg = LogConfig::load_from_file(file.path()).unwrap();
        assert_eq!(cfg.level.as_deref(), Some("info"));
        assert_eq!(cfg.quiet_targets.map(|t| t.len()), Some(2));
    }
}
