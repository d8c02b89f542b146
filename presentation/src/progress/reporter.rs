//! Progress reporting for chat requests and round table runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use roundtable_application::ProgressNotifier;
use roundtable_domain::{ModelSpec, Turn};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with indicatif bars and spinners
pub struct ProgressReporter {
    run_bar: Mutex<Option<ProgressBar>>,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            run_bar: Mutex::new(None),
            spinner: Mutex::new(None),
        }
    }

    fn run_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn turn_name(turn: &Turn) -> String {
        match turn {
            Turn::Participant { round, .. } => format!("Round {}", round),
            Turn::Chairman { round } => format!("Round {} summary", round),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_run_start(&self, total_turns: usize) {
        let pb = ProgressBar::new(total_turns as u64);
        pb.set_style(Self::run_style());
        pb.set_prefix("Round 1");
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut slot) = self.run_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_turn_start(&self, turn: &Turn, speaker: &str, model: &ModelSpec) {
        if let Ok(slot) = self.run_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_prefix(Self::turn_name(turn));
            pb.set_message(format!("{} ({}) is thinking...", speaker, model));
        }
    }

    fn on_turn_complete(&self, turn: &Turn, speaker: &str, success: bool) {
        if let Ok(slot) = self.run_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}: {}", "v".green(), Self::turn_name(turn), speaker)
            } else {
                format!("{} {}: {} (failed)", "x".red(), Self::turn_name(turn), speaker)
            };
            pb.println(status);
            pb.inc(1);
        }
    }

    fn on_run_complete(&self, cancelled: bool) {
        if let Ok(mut slot) = self.run_bar.lock()
            && let Some(pb) = slot.take()
        {
            if cancelled {
                pb.abandon_with_message("cancelled".yellow().to_string());
            } else {
                pb.finish_and_clear();
            }
        }
    }

    fn on_request_start(&self, model: &ModelSpec) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(format!("Waiting for {}...", model));
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn on_request_complete(&self, _model: &ModelSpec, _success: bool) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_run_start(&self, total_turns: usize) {
        eprintln!("{} {} ({} turns)", "->".cyan(), "Round table".bold(), total_turns);
    }

    fn on_turn_start(&self, turn: &Turn, speaker: &str, model: &ModelSpec) {
        eprintln!(
            "  {} {}: {} ({})",
            "..".dimmed(),
            ProgressReporter::turn_name(turn),
            speaker,
            model
        );
    }

    fn on_turn_complete(&self, _turn: &Turn, speaker: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), speaker);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), speaker);
        }
    }

    fn on_round_complete(&self, round: u32) {
        eprintln!("{} round {} complete", "->".cyan(), round);
    }

    fn on_request_start(&self, model: &ModelSpec) {
        eprintln!("{} asking {}", "->".cyan(), model);
    }
}
