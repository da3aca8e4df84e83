// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Line layout shared by every console writer:
//!
//! ```text
//! 2026-10-18 14:03:12 [INFO     ][webui::startup      ] Model loaded in 2.1s
//! ```

use std::fmt;

use owo_colors::OwoColorize;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const LEVEL_WIDTH: usize = 9;
const TARGET_WIDTH: usize = 20;

/// Level names as printed in the line prefix.
pub fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

/// Event formatter producing `timestamp [LEVEL][target] message fields`.
#[derive(Debug, Clone)]
pub struct LineFormat<T = ChronoLocal> {
    timer: T,
    rich: bool,
}

impl LineFormat {
    /// Local-time timestamps; `rich` colours the level name.
    pub fn new(rich: bool) -> Self {
        Self {
            timer: ChronoLocal::new(TIMESTAMP_FORMAT.to_string()),
            rich,
        }
    }
}

impl<T> LineFormat<T> {
    /// Swap the timestamp source.
    pub fn with_timer<T2>(self, timer: T2) -> LineFormat<T2> {
        LineFormat {
            timer,
            rich: self.rich,
        }
    }

    fn write_level(&self, writer: &mut Writer<'_>, level: &Level) -> fmt::Result {
        let name = format!("{:<LEVEL_WIDTH$}", level_name(level));
        if !self.rich {
            return write!(writer, "[{name}]");
        }
        match *level {
            Level::TRACE => write!(writer, "[{}]", name.purple()),
            Level::DEBUG => write!(writer, "[{}]", name.blue()),
            Level::INFO => write!(writer, "[{}]", name.green()),
            Level::WARN => write!(writer, "[{}]", name.yellow()),
            Level::ERROR => write!(writer, "[{}]", name.red().bold()),
        }
    }
}

impl<S, N, T> FormatEvent<S, N> for LineFormat<T>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    T: FormatTime,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        self.timer.format_time(&mut writer)?;
        writer.write_char(' ')?;
        self.write_level(&mut writer, meta.level())?;
        write!(writer, "[{:<TARGET_WIDTH$}] ", meta.target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
