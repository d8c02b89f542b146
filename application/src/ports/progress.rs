//! Progress notification port
//!
//! Defines the interface for reporting progress while a reply is produced.

use roundtable_domain::{ModelSpec, Turn};

/// Callback for progress updates during standard chat and round table runs
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain log lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called once before the first turn of a round table run
    fn on_run_start(&self, total_turns: usize);

    /// Called before a participant or the chairman is asked
    fn on_turn_start(&self, turn: &Turn, speaker: &str, model: &ModelSpec);

    /// Called after a turn finished, successfully or not
    fn on_turn_complete(&self, turn: &Turn, speaker: &str, success: bool);

    /// Called after the chairman turn of a round
    fn on_round_complete(&self, _round: u32) {}

    /// Called when the run ends (completed or cancelled)
    fn on_run_complete(&self, _cancelled: bool) {}

    // ==================== Standard Chat Callbacks ====================

    /// Called before a standard-mode request is sent
    fn on_request_start(&self, _model: &ModelSpec) {}

    /// Called when a standard-mode request finished
    fn on_request_complete(&self, _model: &ModelSpec, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_run_start(&self, _total_turns: usize) {}
    fn on_turn_start(&self, _turn: &Turn, _speaker: &str, _model: &ModelSpec) {}
    fn on_turn_complete(&self, _turn: &Turn, _speaker: &str, _success: bool) {}
}
