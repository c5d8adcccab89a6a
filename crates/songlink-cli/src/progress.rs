// SPDX-License-Identifier: GPL-3.0-or-later
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

// The last entry is shown once the spinner finishes.
const FRAMES: &[&str] = &["⠋", "⠙", "⠸", "⠴", "⠦", "⠇", " "];
const TICK: Duration = Duration::from_millis(100);

/// Stderr spinner driven by its own thread.
///
/// The thread shares only the stop flag with the caller. Dropping the spinner
/// stops it, clears the line and joins the thread.
pub struct Spinner {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(FRAMES);
        bar.set_style(style);
        bar.set_message(message.to_string());

        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("spinner".to_string())
            .spawn(move || {
                while !flag.load(Ordering::Acquire) {
                    bar.tick();
                    thread::sleep(TICK);
                }
                bar.finish_and_clear();
            })
            .map_err(|e| debug!(target: "cli", error = %e, "spinner thread unavailable"))
            .ok();

        Self { stop, handle }
    }

    /// Stop and join. Returns once the line has been cleared.
    pub fn finish(self) {
        drop(self);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_joins_thread() {
        let spinner = Spinner::start("working");
        let stop = Arc::clone(&spinner.stop);
        thread::sleep(Duration::from_millis(150));
        spinner.finish();
        assert!(stop.load(Ordering::Acquire));
    }
}
