// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::monitor::search_monitor::{PruneReason, SearchMonitor};
use crate::solution::Solution;
use crate::stats::SolverStatistics;
use std::time::{Duration, Instant};
use xcopt_model::FilteredTrack;
use xcopt_rules::ScoringRule;

/// Periodic console progress reporting.
///
/// Prints a table row at most every `log_interval`, checking the clock only
/// when the node counter masks to zero to keep the hot path cheap.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_score: Option<f64>,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_score: None,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<12} | {:<12} | {:<12} | {:<14} | {:<12}",
            "Elapsed", "Nodes", "Splits", "Best Score", "Pruned (Bound)", "Infeasible"
        );
        println!("{}", "-".repeat(86));
    }

    #[inline(always)]
    fn log_line(&mut self, stats: &SolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_score_text = match self.best_score {
            Some(score) => format!("{:.2}", score),
            None => "-".to_string(),
        };

        println!(
            "{:<9} | {:<12} | {:<12} | {:<12} | {:<14} | {:<12}",
            format!("{:.1}s", elapsed),
            stats.nodes_processed,
            stats.branches_split,
            best_score_text,
            stats.prunings_bound,
            stats.prunings_infeasible
        );

        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl SearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, track: &FilteredTrack, rule: &ScoringRule) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_score = None;
        println!("Scoring {} under {}", track, rule);
        self.print_header();
    }

    fn on_step(&mut self, stats: &SolverStatistics) {
        if (stats.nodes_processed & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(stats);
        }
    }

    fn on_bound_computed(&mut self, _optimistic: f64, _stats: &SolverStatistics) {}

    fn on_prune(&mut self, _reason: PruneReason, _stats: &SolverStatistics) {}

    fn on_branch_split(&mut self, _children: usize, _stats: &SolverStatistics) {}

    fn on_solution_found(&mut self, solution: &Solution, _stats: &SolverStatistics) {
        self.best_score = Some(solution.score());
    }

    fn on_exit_search(&mut self, stats: &SolverStatistics) {
        println!("{}", "-".repeat(86));
        println!("Search finished after {} nodes.", stats.nodes_processed);
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}
