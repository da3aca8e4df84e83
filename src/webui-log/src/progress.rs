// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::io::{self, Write};
use std::sync::{Mutex, OnceLock, PoisonError};

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, WeakProgressBar};

use crate::writer::ProgressDisplay;

static GLOBAL: OnceLock<ProgressBars> = OnceLock::new();

/// Process-wide bar registry used by the progress-aware console writer.
pub fn global() -> &'static ProgressBars {
    GLOBAL.get_or_init(ProgressBars::new)
}

/// Progress bars sharing one terminal area.
///
/// Bars must be added through [`ProgressBars::add`] for log lines to be
/// printed above them.
pub struct ProgressBars {
    multi: MultiProgress,
    bars: Mutex<Vec<WeakProgressBar>>,
}

impl Default for ProgressBars {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBars {
    /// Registry drawing to stderr.
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// Registry drawing to `target` instead of stderr.
    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            bars: Mutex::new(Vec::new()),
        }
    }

    /// Attach `bar` to the shared display and start tracking it.
    pub fn add(&self, bar: ProgressBar) -> ProgressBar {
        let bar = self.multi.add(bar);
        let mut bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        bars.retain(|weak| weak.upgrade().is_some_and(|b| !b.is_finished()));
        bars.push(bar.downgrade());
        bar
    }

    /// Number of added bars that are still alive and not finished.
    pub fn active_count(&self) -> usize {
        let bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        bars.iter()
            .filter_map(WeakProgressBar::upgrade)
            .filter(|bar| !bar.is_finished())
            .count()
    }
}

impl ProgressDisplay for ProgressBars {
    fn is_active(&self) -> bool {
        self.active_count() > 0
    }

    fn write_above(&self, line: &[u8]) -> io::Result<()> {
        self.multi.suspend(|| {
            let mut stderr = io::stderr().lock();
            stderr.write_all(line)?;
            stderr.flush()
        })
    }
}
