// src/progress.rs
//! Page progress spinner using indicatif

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress indicator wrapper
#[derive(Clone)]
pub struct ProgressIndicator {
    spinner: Option<ProgressBar>,
}

impl ProgressIndicator {
    /// Create a new progress indicator
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self::disabled();
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));

        Self {
            spinner: Some(spinner),
        }
    }

    pub fn disabled() -> Self {
        Self { spinner: None }
    }

    /// Show the page currently being resolved
    pub fn set_page(&self, page_num: u32, page_count: u32, found: usize) {
        self.set_message(format!(
            "Resolving certificates on page {} of {} ({} subdomains so far)",
            page_num, page_count, found
        ));
    }

    /// Set the status message
    pub fn set_message(&self, msg: impl Into<String>) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(msg.into());
        }
    }

    /// Temporarily suspend the spinner to print other output
    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if let Some(ref spinner) = self.spinner {
            spinner.suspend(f)
        } else {
            f()
        }
    }

    /// Finish and clear the progress indicator
    pub fn finish(&self) {
        if let Some(ref spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.spinner.is_some()
    }
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self::disabled()
    }
}
