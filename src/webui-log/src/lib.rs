// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod format;
pub mod level;
#[cfg(feature = "progress")]
pub mod progress;
pub mod settings;
pub mod writer;

#[cfg(test)]
mod testutil;

pub use config::{ConfigError, LogConfig};
pub use context::{configure, configure_settings, current_level, try_configure_with};
pub use error::LoggingError;
pub use level::{resolve_level, LogLevel, ParseLevelError};
pub use settings::LogSettings;
pub use writer::{ConsoleStrategy, ProgressDisplay};
