//! Progress reporting for batch execution

use askbatch_application::BatchProgressNotifier;
use askbatch_domain::{BatchReport, DatasourceId};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during batch execution with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(bar) = guard.as_ref() {
                f(bar);
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProgressNotifier for ProgressReporter {
    fn on_batch_start(&self, total_sentences: usize) {
        let bar = ProgressBar::new(total_sentences as u64);
        bar.set_style(Self::bar_style());
        bar.set_prefix("Sentences");
        bar.set_message("Signing in...");

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_datasource_provisioned(&self, model_id: &str, datasource_id: DatasourceId) {
        self.with_bar(|bar| {
            bar.set_message(format!("datasource {} ready for {}", datasource_id, model_id))
        });
    }

    fn on_sentence_resolved(&self, _index: usize, text: &str, success: bool) {
        self.with_bar(|bar| {
            let status = if success {
                format!("{} {}", "v".green(), text)
            } else {
                format!("{} {}", "x".red(), text)
            };
            bar.set_message(status);
            bar.inc(1);
        });
    }

    fn on_poll(&self, attempt: u32, resolved: usize, outstanding: usize) {
        self.with_bar(|bar| {
            bar.set_message(format!("check #{}: {}/{} ready", attempt, resolved, outstanding))
        });
    }

    fn on_report(&self, report: &BatchReport) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_with_message(format!(
                    "{} ({}/{} passed)",
                    "complete!".green(),
                    report.stats.passed,
                    report.stats.count
                ));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl BatchProgressNotifier for SimpleProgress {
    fn on_batch_start(&self, total_sentences: usize) {
        eprintln!(
            "{} {} ({} sentences)",
            "->".cyan(),
            "Running batch".bold(),
            total_sentences
        );
    }

    fn on_datasource_provisioned(&self, model_id: &str, datasource_id: DatasourceId) {
        eprintln!("  {} datasource {} for {}", "+".cyan(), datasource_id, model_id);
    }

    fn on_sentence_resolved(&self, _index: usize, text: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), text);
        } else {
            eprintln!("  {} {} (error)", "x".red(), text);
        }
    }

    fn on_report(&self, _report: &BatchReport) {
        eprintln!();
    }
}
