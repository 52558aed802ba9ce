use log::info;
use std::time::{Duration, Instant};

use crate::game::GameState;

/// Statistics for the lifetime of the process, shown in the HUD.
///
/// Fed with [`SessionMetrics::observe`] after every tick and before every
/// frame. The best score follows the live score, so a run in progress can
/// already hold the session record.
pub struct SessionMetrics {
    run_started: Instant,
    /// Set once the observed run is over; freezes the clock
    finished: bool,
    /// Record as it stood when the current run began
    best_before_run: u32,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub runs_finished: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            run_started: Instant::now(),
            finished: false,
            best_before_run: 0,
            elapsed_time: Duration::ZERO,
            best_score: 0,
            runs_finished: 0,
        }
    }

    /// Sync with the current run: advance the clock, raise the record and
    /// count the run once it has ended
    pub fn observe(&mut self, state: &GameState) {
        self.best_score = self.best_score.max(state.run.score);

        if self.finished {
            return;
        }
        self.elapsed_time = self.run_started.elapsed();

        if state.is_game_over() {
            self.finished = true;
            self.runs_finished += 1;
            info!(
                "Run {} over after {} with score {}{}",
                self.runs_finished,
                self.format_time(),
                state.run.score,
                if self.is_new_best() { " (new best)" } else { "" }
            );
        }
    }

    pub fn on_run_start(&mut self) {
        self.run_started = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.finished = false;
        self.best_before_run = self.best_score;
    }

    /// True once the current run has beaten every earlier run
    pub fn is_new_best(&self) -> bool {
        self.best_score > self.best_before_run
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
