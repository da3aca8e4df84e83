// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

use crate::filter::DEFAULT_QUIET_TARGETS;
use crate::level::{resolve_level, LogLevel, LEVEL_ENV};

/// Environment variable that switches on the colourised renderer.
pub const RICH_ENV: &str = "SD_WEBUI_RICH_LOG";

/// Fully resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Global threshold
    pub level: LogLevel,
    /// Colourise level names
    pub rich: bool,
    /// Targets pinned at WARNING regardless of `level`
    pub quiet_targets: Vec<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl LogSettings {
    /// Plain output at `level` with the default quiet targets.
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            rich: false,
            quiet_targets: DEFAULT_QUIET_TARGETS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Resolve settings from an explicit request and the process environment.
    pub fn from_env(requested: Option<&str>) -> Self {
        Self::from_lookup(requested, |key| std::env::var(key).ok())
    }

    /// Same as [`LogSettings::from_env`] with a caller-supplied variable lookup.
    pub fn from_lookup<F>(requested: Option<&str>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = resolve_level(requested, lookup(LEVEL_ENV).as_deref());
        let rich = lookup(RICH_ENV).is_some_and(|v| !v.is_empty());
        Self {
            rich,
            ..Self::new(level)
        }
    }

    /// Switch the colourised renderer on or off.
    pub fn with_rich(mut self, rich: bool) -> Self {
        self.rich = rich;
        self
    }

    /// Replace the quiet target list.
    pub fn with_quiet_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quiet_targets = targets.into_iter().map(Into::into).collect();
        self
    }
}
