// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Console writers.
//!
//! Formatted lines either go straight to stderr or, when a progress display
//! is rendering, through the display so bars are redrawn below the line
//! instead of being torn by it.

use std::io::{self, Stderr, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing_subscriber::fmt::writer::EitherWriter;
use tracing_subscriber::fmt::MakeWriter;

/// Something that draws to the terminal and can print a line above itself.
pub trait ProgressDisplay: Send + Sync {
    /// True while at least one bar is being rendered.
    fn is_active(&self) -> bool;

    /// Write a complete, newline-terminated line without corrupting the display.
    fn write_above(&self, line: &[u8]) -> io::Result<()>;
}

impl<D: ProgressDisplay + ?Sized> ProgressDisplay for &D {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn write_above(&self, line: &[u8]) -> io::Result<()> {
        (**self).write_above(line)
    }
}

impl<D: ProgressDisplay + ?Sized> ProgressDisplay for Arc<D> {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn write_above(&self, line: &[u8]) -> io::Result<()> {
        (**self).write_above(line)
    }
}

/// Routes each write through `display` while it is active, else to `fallback`.
///
/// Anything going wrong on the display path (an error or a panic) sends the
/// line to `fallback` instead.
#[derive(Debug)]
pub struct ProgressAwareWriter<W, D> {
    fallback: W,
    display: D,
}

impl<W, D> ProgressAwareWriter<W, D> {
    pub fn new(fallback: W, display: D) -> Self {
        Self { fallback, display }
    }
}

impl<W: Write, D: ProgressDisplay> Write for ProgressAwareWriter<W, D> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let display = &self.display;
        let routed = panic::catch_unwind(AssertUnwindSafe(|| {
            if display.is_active() {
                display.write_above(buf).map(|()| true)
            } else {
                Ok(false)
            }
        }));
        if let Ok(Ok(true)) = routed {
            return Ok(buf.len());
        }
        self.fallback.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.fallback.flush()
    }
}

/// [`MakeWriter`] producing a [`ProgressAwareWriter`] per event.
#[derive(Debug, Clone)]
pub struct ProgressAwareMakeWriter<M, D> {
    inner: M,
    display: D,
}

impl<M, D> ProgressAwareMakeWriter<M, D> {
    pub fn new(inner: M, display: D) -> Self {
        Self { inner, display }
    }
}

impl<'a, M, D> MakeWriter<'a> for ProgressAwareMakeWriter<M, D>
where
    M: MakeWriter<'a>,
    D: ProgressDisplay + Clone + 'a,
{
    type Writer = ProgressAwareWriter<M::Writer, D>;

    fn make_writer(&'a self) -> Self::Writer {
        ProgressAwareWriter::new(self.inner.make_writer(), self.display.clone())
    }
}

/// Which console writer to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStrategy {
    Plain,
    ProgressAware,
}

impl ConsoleStrategy {
    /// `ProgressAware` when progress bar support is compiled in.
    pub fn detect() -> Self {
        if cfg!(feature = "progress") {
            ConsoleStrategy::ProgressAware
        } else {
            ConsoleStrategy::Plain
        }
    }

    /// Writer for this strategy; progress-aware output uses [`crate::progress::global`].
    pub fn make_writer(self) -> ConsoleMakeWriter {
        match self {
            ConsoleStrategy::Plain => ConsoleMakeWriter::Plain,
            #[cfg(feature = "progress")]
            ConsoleStrategy::ProgressAware => {
                let display: &'static dyn ProgressDisplay = crate::progress::global();
                ConsoleMakeWriter::ProgressAware(ProgressAwareMakeWriter::new(
                    io::stderr as fn() -> Stderr,
                    display,
                ))
            }
            #[cfg(not(feature = "progress"))]
            ConsoleStrategy::ProgressAware => ConsoleMakeWriter::Plain,
        }
    }
}

type StderrProgressWriter = ProgressAwareWriter<Stderr, &'static dyn ProgressDisplay>;

/// Stderr writer selected by [`ConsoleStrategy`].
#[derive(Clone)]
pub enum ConsoleMakeWriter {
    Plain,
    ProgressAware(ProgressAwareMakeWriter<fn() -> Stderr, &'static dyn ProgressDisplay>),
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = EitherWriter<Stderr, StderrProgressWriter>;

    fn make_writer(&'a self) -> Self::Writer {
        match self {
            ConsoleMakeWriter::Plain => EitherWriter::A(io::stderr()),
            ConsoleMakeWriter::ProgressAware(inner) => EitherWriter::B(inner.make_writer()),
        }
    }
}
