//! Spinner shown while a prediction is pending
//!
//! Drawn on stdout, next to the result it precedes, and only when stdout is
//! a TTY and NO_COLOR is unset, so piped or `--json` output never carries
//! spinner artifacts. Timing works either way.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::time::{Duration, Instant};

pub struct ProgressIndicator {
    spinner: Option<ProgressBar>,
    start_time: Instant,
}

impl ProgressIndicator {
    /// Start a spinner, unless `enabled` is false or the terminal can't show one
    pub fn new(message: &str, enabled: bool) -> Self {
        let spinner = if enabled && terminal_supports_spinner() {
            let pb = ProgressBar::new_spinner();
            pb.set_draw_target(ProgressDrawTarget::stdout());

            let frames: &[&str] = if supports_unicode() {
                &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]
            } else {
                &["|", "/", "-", "\\"]
            };
            if let Ok(style) = ProgressStyle::default_spinner()
                .tick_strings(frames)
                .template("{spinner} {msg}")
            {
                pb.set_style(style);
            }

            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(80));
            Some(pb)
        } else {
            None
        };

        Self {
            spinner,
            start_time: Instant::now(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.spinner.is_some()
    }

    /// Clear the spinner line and return the elapsed time
    pub fn finish(mut self) -> Duration {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        self.start_time.elapsed()
    }
}

impl Drop for ProgressIndicator {
    fn drop(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

fn terminal_supports_spinner() -> bool {
    spinner_allowed(
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
    )
}

fn spinner_allowed(stdout_is_tty: bool, no_color: bool) -> bool {
    stdout_is_tty && !no_color
}

/// LANG/LC_ALL heuristic; assume Unicode when neither is set
fn supports_unicode() -> bool {
    std::env::var("LANG")
        .or_else(|_| std::env::var("LC_ALL"))
        .map(|val| val.to_lowercase().contains("utf"))
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_indicator_has_no_spinner() {
        let progress = ProgressIndicator::new("Analyzing stats...", false);
        assert!(!progress.is_visible());
    }

    #[test]
    fn test_spinner_needs_stdout_tty_without_no_color() {
        assert!(spinner_allowed(true, false));
        assert!(!spinner_allowed(false, false));
        assert!(!spinner_allowed(true, true));
        assert!(!spinner_allowed(false, true));
    }

    #[test]
    fn test_finish_reports_elapsed() {
        let progress = ProgressIndicator::new("Analyzing stats...", false);
        std::thread::sleep(Duration::from_millis(20));
        assert!(progress.finish() >= Duration::from_millis(20));
    }
}
