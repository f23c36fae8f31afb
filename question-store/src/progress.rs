//! Lightweight progress reporting for load-time embedding.
//!
//! `NoopProgress` for headless runs, `IndicatifProgress` when stderr is a TTY.

use std::io::{self, IsTerminal};

use indicatif::{ProgressBar, ProgressStyle};

/// Minimal progress interface used while the corpus is embedded.
pub trait Progress: Send + Sync {
    /// Advance by one item.
    fn step(&self) {}
    /// Finish the UI with a closing message.
    fn finish(&self, _msg: &str) {}
}

/// No-op reporter for servers/headless runs.
#[derive(Default, Clone, Copy)]
pub struct NoopProgress;
impl Progress for NoopProgress {}

/// Indicatif-based bounded bar.
pub struct IndicatifProgress {
    pb: ProgressBar,
}

impl IndicatifProgress {
    pub fn bar(len: u64) -> Self {
        let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>5}/{len:5} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let pb = ProgressBar::new(len);
        pb.set_style(style);
        pb.set_message("embedding questions");
        Self { pb }
    }
}

impl Progress for IndicatifProgress {
    fn step(&self) {
        self.pb.inc(1);
    }
    fn finish(&self, msg: &str) {
        self.pb.finish_with_message(msg.to_string());
    }
}

/// Bar on an interactive terminal, silence otherwise.
pub fn for_terminal(len: u64) -> Box<dyn Progress> {
    if len > 0 && io::stderr().is_terminal() {
        Box::new(IndicatifProgress::bar(len))
    } else {
        Box::new(NoopProgress)
    }
}
