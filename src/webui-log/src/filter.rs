// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

use tracing_subscriber::filter::{LevelFilter, Targets};

use crate::level::LogLevel;

/// HTTP client targets that log every request at INFO/DEBUG.
pub const DEFAULT_QUIET_TARGETS: &[&str] = &["reqwest", "hyper", "hyper_util", "h2"];

/// Threshold for quiet targets. Independent of the global level.
pub const QUIET_LEVEL: LevelFilter = LevelFilter::WARN;

/// Build the target filter for `level`, capping every quiet target.
pub fn build_targets<S: AsRef<str>>(level: LogLevel, quiet_targets: &[S]) -> Targets {
    quiet_targets.iter().fold(
        Targets::new().with_default(level.as_level_filter()),
        |targets, target| targets.with_target(target.as_ref(), QUIET_LEVEL),
    )
}
