//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress over the tables of a batch comparison
#[derive(Debug)]
pub struct TableProgress {
    pub tables_pb: Option<ProgressBar>,
}

impl TableProgress {
    /// Create progress bar for comparing `total` tables
    pub fn new(total: u64) -> Self {
        Self {
            tables_pb: Some(create_progress_bar(total, "Comparing tables")),
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self { tables_pb: None }
    }

    pub fn start_table(&self, table: &str) {
        if let Some(pb) = &self.tables_pb {
            pb.set_message(table.to_string());
        }
    }

    pub fn finish_table(&self) {
        if let Some(pb) = &self.tables_pb {
            pb.inc(1);
        }
    }

    pub fn finish(&self, message: &str) {
        if let Some(pb) = &self.tables_pb {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for TableProgress {
    fn drop(&mut self) {
        if let Some(pb) = self.tables_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner for open-ended work such as connecting
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a progress bar with known total
fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}/{len:3} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}
