//! Lightweight progress reporting for long-running pipelines.
//!
//! Use `NoopProgress` for headless runs and `IndicatifProgress` when stderr
//! is a terminal. [`reporter`] picks between them.

use indicatif::{ProgressBar, ProgressStyle};

/// Minimal progress interface used by indexing and report generation.
pub trait Progress: Send + Sync {
    /// Set known total steps (optional).
    fn set_total(&self, _n: u64) {}
    /// Advance by one step and show a short message.
    fn step(&self, _msg: &str) {}
    /// Replace current message without advancing.
    fn message(&self, _msg: &str) {}
    /// Finish the UI.
    fn finish(&self, _msg: &str) {}
}

/// No-op reporter for servers/headless runs.
#[derive(Default, Clone, Copy)]
pub struct NoopProgress;
impl Progress for NoopProgress {}

/// Indicatif progress bar. Draws nothing when stderr is not a terminal.
pub struct IndicatifProgress {
    pb: ProgressBar,
}

impl IndicatifProgress {
    /// Bounded bar; the total may be set later through [`Progress::set_total`].
    pub fn bar(len: u64) -> Self {
        let pb = ProgressBar::new(len);
        let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}/{len:3} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        Self { pb }
    }
}

impl Progress for IndicatifProgress {
    fn set_total(&self, n: u64) {
        self.pb.set_length(n);
    }
    fn step(&self, msg: &str) {
        self.pb.inc(1);
        self.pb.set_message(msg.to_string());
    }
    fn message(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
    }
    fn finish(&self, msg: &str) {
        self.pb.finish_with_message(msg.to_string());
    }
}

/// Bar reporter for interactive runs, no-op otherwise.
pub fn reporter(interactive: bool) -> Box<dyn Progress> {
    if interactive {
        Box::new(IndicatifProgress::bar(0))
    } else {
        Box::new(NoopProgress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_tracks_total_and_steps() {
        let progress = IndicatifProgress::bar(0);
        progress.set_total(3);
        for name in ["a", "b", "c"] {
            progress.step(name);
        }
        progress.finish("done");

        assert_eq!(progress.pb.length(), Some(3));
        assert_eq!(progress.pb.position(), 3);
        assert!(progress.pb.is_finished());
        assert_eq!(progress.pb.message(), "done");
    }

    #[test]
    fn headless_reporter_accepts_every_call() {
        let progress = reporter(false);
        progress.set_total(2);
        progress.step("x");
        progress.message("y");
        progress.finish("z");
    }
}
