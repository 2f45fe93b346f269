use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Zone bar shown on stderr while a scan runs. Absent when progress is off.
pub struct ScanProgress {
    bar: Option<ProgressBar>,
    batch_size: usize,
    mode: &'static str,
}

impl ScanProgress {
    #[must_use]
    pub fn start(zones: usize, batch_size: usize, deep: bool) -> Self {
        let mode = if deep { "deep" } else { "surface" };
        let batch_size = batch_size.max(1);
        if !ui::prefs().progress || zones == 0 {
            return Self {
                bar: None,
                batch_size,
                mode,
            };
        }

        let bar = ProgressBar::new(u64::try_from(zones).unwrap_or(u64::MAX));
        bar.set_style(
            ProgressStyle::with_template(zone_template(terminal_columns()))
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(batch_message(mode, 0, zones, batch_size));
        Self {
            bar: Some(bar),
            batch_size,
            mode,
        }
    }

    /// Record a finished batch; `done` counts zones, not batches.
    pub fn batch_done(&self, done: usize, total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_position(u64::try_from(done).unwrap_or(u64::MAX));
            bar.set_message(batch_message(self.mode, done, total, self.batch_size));
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn abandon(&self, reason: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(format!("{} scan stopped: {reason}", self.mode));
        }
    }
}

/// Spinner for single requests such as one container fetch or CDD checks.
pub struct Spinner(Option<ProgressBar>);

impl Spinner {
    #[must_use]
    pub fn start(message: impl Into<String>) -> Self {
        if !ui::prefs().progress {
            return Self(None);
        }

        let spinner = ProgressBar::new_spinner();
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_style(
            ProgressStyle::with_template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.into());
        Self(Some(spinner))
    }

    pub fn finish(&self) {
        if let Some(spinner) = &self.0 {
            spinner.finish_and_clear();
        }
    }
}

fn terminal_columns() -> Option<usize> {
    std::env::var("COLUMNS").ok()?.parse().ok()
}

fn zone_template(columns: Option<usize>) -> &'static str {
    match columns {
        Some(cols) if cols < 80 => "{wide_bar:.cyan/blue} {percent}% {msg}",
        _ => "{bar:40.cyan/blue} {pos}/{len} zones {msg}",
    }
}

fn batch_message(mode: &str, done: usize, total: usize, batch_size: usize) -> String {
    let batches = total.div_ceil(batch_size);
    let finished = done.div_ceil(batch_size).min(batches);
    if finished >= batches {
        format!("{mode} scan, all {batches} batches done")
    } else {
        format!("{mode} scan, batch {} of {batches}", finished + 1)
    }
}
