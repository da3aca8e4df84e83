// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use webui_log::{configure_settings, progress, LogConfig, LogSettings};

type DynResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

const PKG_DESCRIPTION: &str = concat!(env!("CARGO_PKG_NAME"), " - logging alongside progress bars");
const BAR_TEMPLATE: &str = "{prefix:>8} [{bar:40}] {pos}/{len}";

#[derive(Debug, Parser)]
#[command(version = env!("CARGO_PKG_VERSION"), about = PKG_DESCRIPTION)]
struct Cli {
    /// Path to configuration file
    #[arg(long = "config", short = 'C', value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print example configuration and exit
    #[arg(long = "print-config")]
    print_config: bool,
    /// Log level (overrides config file and SD_WEBUI_LOG_LEVEL)
    #[arg(short = 'l', long = "log-level")]
    log_level: Option<String>,
    /// Number of concurrent progress bars
    #[arg(short = 'b', long = "bars", default_value_t = 2)]
    bars: usize,
    /// Steps per bar
    #[arg(short = 's', long = "steps", default_value_t = 20)]
    steps: u64,
    /// Delay between steps in milliseconds
    #[arg(long = "delay-ms", default_value_t = 50)]
    delay_ms: u64,
}

fn run_job(bar: ProgressBar, index: usize, delay: Duration) {
    let len = bar.length().unwrap_or(0);
    for step in 1..=len {
        thread::sleep(delay);
        bar.inc(1);
        if step % 5 == 0 {
            info!(target: "webui::jobs", job = index, step, "Checkpoint reached");
        }
        debug!(target: "webui::jobs", job = index, step, "Step done");
    }
    bar.finish();
    info!(target: "webui::jobs", job = index, "Job finished");
}

fn main() -> DynResult<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", LogConfig::example_toml());
        return Ok(());
    }

    let (cfg, config_path) = if let Some(ref path) = cli.config {
        let cfg = LogConfig::load_from_file(path)?;
        (cfg, Some(path.clone()))
    } else {
        LogConfig::load_from_default_paths()?
    };

    let requested = cli.log_level.as_deref().or(cfg.level.as_deref());
    let settings = cfg.apply(LogSettings::from_env(requested));
    configure_settings(&settings);

    if let Some(ref path) = config_path {
        info!("Loaded configuration from {}", path.display());
    }
    info!(
        "Starting {} jobs of {} steps (level: {})",
        cli.bars, cli.steps, settings.level
    );
    // Dropped by the quiet-target filter unless the level is WARNING or stricter.
    info!(target: "reqwest::connect", "connecting to 127.0.0.1:7860");

    let style = ProgressStyle::with_template(BAR_TEMPLATE)?.progress_chars("=> ");
    let delay = Duration::from_millis(cli.delay_ms);
    let handles: Vec<_> = (0..cli.bars)
        .map(|index| {
            let bar = progress::global().add(ProgressBar::new(cli.steps));
            bar.set_style(style.clone());
            bar.set_prefix(format!("job {index}"));
            thread::spawn(move || run_job(bar, index, delay))
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            warn!("A job thread panicked");
        }
    }

    info!("All jobs finished");
    Ok(())
}
