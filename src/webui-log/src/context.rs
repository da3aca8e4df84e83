// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Process-wide logging context.
//!
//! The first successful call installs a single formatter + writer on the
//! global `tracing` dispatcher. Later calls only swap the level filter, so
//! configuring twice never duplicates output.

use std::sync::{Mutex, PoisonError};

use tracing::Subscriber;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, Registry};

use crate::error::LoggingError;
use crate::filter::build_targets;
use crate::format::LineFormat;
use crate::level::LogLevel;
use crate::settings::LogSettings;
use crate::writer::ConsoleStrategy;

/// Handle used to swap the installed level filter.
pub type FilterHandle = reload::Handle<Targets, Registry>;

struct LoggingContext {
    filter: FilterHandle,
    level: LogLevel,
}

static CONTEXT: Mutex<Option<LoggingContext>> = Mutex::new(None);

/// Build a subscriber for `settings` without installing it.
pub fn build_subscriber<W>(
    settings: &LogSettings,
    make_writer: W,
) -> (impl Subscriber + Send + Sync + 'static, FilterHandle)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let (filter, handle) =
        reload::Layer::new(build_targets(settings.level, &settings.quiet_targets));
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_ansi(settings.rich)
            .event_format(LineFormat::new(settings.rich))
            .with_writer(make_writer),
    );
    (subscriber, handle)
}

/// Configure logging from `requested`, then `SD_WEBUI_LOG_LEVEL`, then INFO.
///
/// Safe to call more than once; never panics.
pub fn configure(requested: Option<&str>) {
    configure_settings(&LogSettings::from_env(requested));
}

/// Configure logging from already resolved settings, writing to stderr.
pub fn configure_settings(settings: &LogSettings) {
    if let Err(err) = try_configure_with(settings, ConsoleStrategy::detect().make_writer()) {
        tracing::warn!("Logging configuration left unchanged: {}", err);
    }
}

/// Install on first use, otherwise reload the level filter.
///
/// `make_writer` and `settings.rich` only take effect on the installing call.
pub fn try_configure_with<W>(settings: &LogSettings, make_writer: W) -> Result<(), LoggingError>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let mut context = CONTEXT.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(ctx) = context.as_mut() {
        ctx.filter
            .reload(build_targets(settings.level, &settings.quiet_targets))?;
        ctx.level = settings.level;
        drop(context);
        tracing::debug!("Log level changed to {}", settings.level);
        return Ok(());
    }

    let (subscriber, filter) = build_subscriber(settings, make_writer);
    tracing::subscriber::set_global_default(subscriber)?;
    *context = Some(LoggingContext {
        filter,
        level: settings.level,
    });
    drop(context);

    tracing::debug!(
        "Logging configured (level: {}, rich: {})",
        settings.level,
        settings.rich
    );
    // A host that already owns the `log` facade keeps it.
    if let Err(err) = tracing_log::LogTracer::init() {
        tracing::debug!("`log` records are not forwarded: {}", err);
    }
    Ok(())
}

/// Level applied by the most recent successful configuration.
pub fn current_level() -> Option<LogLevel> {
    CONTEXT
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|ctx| ctx.level)
}
