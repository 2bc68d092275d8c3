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

//! Anytime branch-and-bound solver
//!
//! The solver searches the space of turnpoint assignments over a filtered
//! track to maximize `distance × multiplier − penalty` under one scoring
//! rule. It is exposed as a lazy, finite, one-shot `Iterator`: each `next`
//! runs pop/prune/finalize/split steps until a reporting point and hands
//! back one immutable `Solution` snapshot, keeping all search state for the
//! next call. Dropping the iterator cancels the search; there is nothing
//! else to release.
//!
//! Guarantees at every yield
//! - the global upper bound is non-increasing, incumbent scores are
//!   non-decreasing;
//! - branch bounds never under-estimate any completion (soundness lives in
//!   `eval` and `xcopt_geo`);
//! - ties in the frontier break on the lowest branch identity, so two
//!   invocations with identical inputs produce identical yield sequences.
//!
//! The final yield either proves optimality or, after the refinement depth
//! budget ran out or a monitor terminated the search, reports the best
//! incumbent as a best-effort result.

use crate::branch::{Branch, BranchId};
use crate::config::TuningOptions;
use crate::error::SolveError;
use crate::eval::RouteEvaluator;
use crate::frontier::Frontier;
use crate::monitor::no_op::NoOperationMonitor;
use crate::monitor::search_monitor::{PruneReason, SearchCommand, SearchMonitor};
use crate::solution::Solution;
use crate::stats::SolverStatistics;
use std::time::Instant;
use xcopt_core::num::tolerance::{definitely_greater, leq_within};
use xcopt_model::{FilteredTrack, ScoreInfo};
use xcopt_rules::{find_rule, League, ScoringRule};

/// Solves a track under one scoring rule with no monitoring.
///
/// Validation is synchronous: configuration and track errors surface here,
/// before the sequence produces its first value.
pub fn solve<'a>(
    track: &'a FilteredTrack,
    rule: &'a ScoringRule,
    config: TuningOptions,
) -> Result<SolveIterator<'a, NoOperationMonitor>, SolveError> {
    solve_with_monitor(track, rule, config, NoOperationMonitor::new())
}

/// Solves a rule looked up from a league table by code.
pub fn solve_rule_code<'a>(
    track: &'a FilteredTrack,
    league: League,
    rule_code: &str,
    config: TuningOptions,
) -> Result<SolveIterator<'a, NoOperationMonitor>, SolveError> {
    let rule = find_rule(league, rule_code).ok_or_else(|| SolveError::UnknownRule {
        league: league.code().to_string(),
        code: rule_code.to_string(),
    })?;
    solve(track, rule, config)
}

/// Solves a track under one scoring rule, reporting to `monitor`.
pub fn solve_with_monitor<'a, M>(
    track: &'a FilteredTrack,
    rule: &'a ScoringRule,
    config: TuningOptions,
    mut monitor: M,
) -> Result<SolveIterator<'a, M>, SolveError>
where
    M: SearchMonitor,
{
    config.validate()?;

    let required = rule.shape.min_fixes();
    let actual = track.flight_len();
    if actual < required {
        return Err(SolveError::InvalidTrack { required, actual });
    }

    monitor.on_enter_search(track, rule);

    let evaluator = RouteEvaluator::new(track, rule, config.numeric_tolerance_km);
    let mut iterator = SolveIterator {
        rule,
        config,
        evaluator,
        frontier: Frontier::new(),
        incumbent: None,
        stats: SolverStatistics::default(),
        monitor,
        start_time: Instant::now(),
        last_yield_nodes: 0,
        budget_exhausted: false,
        finished: false,
        launch: track.launch().get() as u32,
        landing: track.landing().get() as u32,
    };
    iterator.seed_root();
    Ok(iterator)
}

/// The best complete, legal candidate found so far.
struct Incumbent {
    score: f64,
    info: ScoreInfo,
    id: BranchId,
    branch_bound: f64,
}

/// A running search: a lazy, finite sequence of improving `Solution`s.
///
/// All mutable search state lives here, owned by this instance; concurrent
/// invocations over the same track and rule table share nothing mutable.
/// The sequence is one-shot; re-scoring requires a fresh `solve` call.
pub struct SolveIterator<'a, M = NoOperationMonitor>
where
    M: SearchMonitor,
{
    rule: &'a ScoringRule,
    config: TuningOptions,
    evaluator: RouteEvaluator<'a>,
    frontier: Frontier,
    incumbent: Option<Incumbent>,
    stats: SolverStatistics,
    monitor: M,
    start_time: Instant,
    last_yield_nodes: u64,
    budget_exhausted: bool,
    finished: bool,
    launch: u32,
    landing: u32,
}

impl<'a, M> SolveIterator<'a, M>
where
    M: SearchMonitor,
{
    /// Statistics collected so far.
    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.stats
    }

    fn seed_root(&mut self) {
        let mut root = Branch::root(self.launch, self.landing, self.rule.shape.num_roles());
        let pricing = self.evaluator.price(&root.roles);
        if !pricing.feasible {
            self.stats.on_pruning_infeasible();
            self.monitor
                .on_prune(PruneReason::Infeasible, &self.stats);
            return;
        }
        root.optimistic = pricing.optimistic;
        self.monitor.on_bound_computed(root.optimistic, &self.stats);
        self.frontier.push(root);
    }

    #[inline]
    fn tolerance(&self) -> f64 {
        self.config.numeric_tolerance_km
    }

    #[inline]
    fn incumbent_score(&self) -> f64 {
        self.incumbent
            .as_ref()
            .map(|incumbent| incumbent.score)
            .unwrap_or(f64::NEG_INFINITY)
    }

    /// The highest score still achievable anywhere: the best live bound or
    /// the incumbent, whichever is larger.
    fn global_upper_bound(&self) -> f64 {
        match (self.frontier.peek_bound(), &self.incumbent) {
            (Some(bound), Some(incumbent)) => bound.max(incumbent.score),
            (Some(bound), None) => bound,
            (None, Some(incumbent)) => incumbent.score,
            (None, None) => 0.0,
        }
    }

    fn improves(&self, score: f64) -> bool {
        match &self.incumbent {
            None => true,
            Some(incumbent) => definitely_greater(score, incumbent.score, self.tolerance()),
        }
    }

    fn install_incumbent(&mut self, score: f64, info: ScoreInfo, id: BranchId, bound: f64) {
        self.stats.on_solution_found();
        self.incumbent = Some(Incumbent {
            score,
            info,
            id,
            branch_bound: bound,
        });
    }

    /// Scores a complete branch; returns `true` on incumbent improvement.
    fn handle_complete(&mut self, branch: &Branch) -> bool {
        let assignment = branch
            .assignment()
            .expect("handle_complete requires a complete branch");
        match self.evaluator.realize(&assignment) {
            None => {
                self.stats.on_pruning_infeasible();
                self.monitor
                    .on_prune(PruneReason::Infeasible, &self.stats);
                false
            }
            Some((score, info)) => {
                if self.improves(score) {
                    self.install_incumbent(score, info, branch.id.clone(), branch.optimistic);
                    true
                } else {
                    self.stats.on_pruning_bound();
                    self.monitor
                        .on_prune(PruneReason::BoundDominated, &self.stats);
                    false
                }
            }
        }
    }

    /// Splits an incomplete branch and enqueues the surviving children;
    /// returns `true` when a midpoint sample improved the incumbent.
    fn expand(&mut self, branch: Branch) -> bool {
        let (left, right) = branch.split();
        let children = left.is_some() as usize + right.is_some() as usize;
        if children == 2 {
            self.stats.on_branch_split();
        } else if children == 1 {
            self.stats.on_refinement();
        }
        self.monitor.on_branch_split(children, &self.stats);
        self.stats.on_depth_update(branch.depth as u64 + 1);

        let mut improved = false;
        for child in [left, right].into_iter().flatten() {
            improved |= self.consider_child(child);
        }
        improved
    }

    fn consider_child(&mut self, mut child: Branch) -> bool {
        let pricing = self.evaluator.price(&child.roles);
        if !pricing.feasible {
            self.stats.on_pruning_infeasible();
            self.monitor
                .on_prune(PruneReason::Infeasible, &self.stats);
            return false;
        }
        // A child never promises more than its parent did.
        child.optimistic = pricing.optimistic.min(child.optimistic);
        self.monitor.on_bound_computed(child.optimistic, &self.stats);

        if self.incumbent.is_some()
            && leq_within(child.optimistic, self.incumbent_score(), self.tolerance())
        {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(PruneReason::BoundDominated, &self.stats);
            return false;
        }

        let mut improved = false;
        if !child.is_complete() {
            if let Some(sample) = child.midpoint_assignment() {
                if let Some((score, info)) = self.evaluator.realize(&sample) {
                    child.realized = score;
                    if self.improves(score) {
                        self.install_incumbent(score, info, child.id.clone(), child.optimistic);
                        improved = true;
                    }
                }
            }
        }

        self.frontier.push(child);
        improved
    }

    fn improved_solution(&mut self) -> Solution {
        let global = self.global_upper_bound();
        let incumbent = self
            .incumbent
            .as_ref()
            .expect("improved_solution requires an incumbent");
        let solution = Solution::new(
            incumbent.id.clone(),
            incumbent.branch_bound,
            global,
            false,
            self.stats.nodes_processed,
            incumbent.score,
            Some(incumbent.info.clone()),
            Some(self.start_time.elapsed()),
        );
        self.last_yield_nodes = self.stats.nodes_processed;
        self.monitor.on_solution_found(&solution, &self.stats);
        solution
    }

    fn progress_solution(&mut self) -> Solution {
        let global = self.global_upper_bound();
        let (id, bound, score, info) = match &self.incumbent {
            Some(incumbent) => (
                incumbent.id.clone(),
                incumbent.branch_bound,
                incumbent.score,
                Some(incumbent.info.clone()),
            ),
            None => (BranchId::Seq(0), global, 0.0, None),
        };
        self.last_yield_nodes = self.stats.nodes_processed;
        Solution::new(
            id,
            bound,
            global,
            false,
            self.stats.nodes_processed,
            score,
            info,
            Some(self.start_time.elapsed()),
        )
    }

    /// Builds the final yield and seals the sequence.
    ///
    /// `proven` is cleared when any branch was dropped at the refinement
    /// depth bound or a monitor terminated the search: the result is then
    /// best-effort, not proven optimal.
    fn final_solution(&mut self, proven: bool) -> Solution {
        self.finished = true;
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        let (id, bound, score, info) = match &self.incumbent {
            Some(incumbent) => (
                incumbent.id.clone(),
                incumbent.branch_bound,
                incumbent.score,
                Some(incumbent.info.clone()),
            ),
            None => (BranchId::Seq(0), 0.0, 0.0, None),
        };
        let global = if proven {
            score.max(0.0)
        } else {
            self.global_upper_bound()
        };
        Solution::new(
            id,
            bound,
            global,
            proven,
            self.stats.nodes_processed,
            score,
            info,
            Some(self.start_time.elapsed()),
        )
    }
}

impl<'a, M> Iterator for SolveIterator<'a, M>
where
    M: SearchMonitor,
{
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        if self.finished {
            return None;
        }

        loop {
            if let SearchCommand::Terminate(_) = self.monitor.search_command(&self.stats) {
                return Some(self.final_solution(false));
            }

            let branch = match self.frontier.pop() {
                None => {
                    let proven = !self.budget_exhausted;
                    return Some(self.final_solution(proven));
                }
                Some(branch) => branch,
            };

            self.stats.on_node_processed();
            self.monitor.on_step(&self.stats);

            // The frontier is bound-ordered: once the best live branch
            // cannot beat the incumbent, nothing can.
            if self.incumbent.is_some()
                && leq_within(branch.optimistic, self.incumbent_score(), self.tolerance())
            {
                return Some(self.final_solution(true));
            }

            let improved = if branch.is_complete() {
                self.handle_complete(&branch)
            } else if branch.depth >= self.config.max_refinement_depth {
                self.budget_exhausted = true;
                self.stats.on_depth_limit_hit();
                false
            } else {
                self.expand(branch)
            };

            if improved {
                return Some(self.improved_solution());
            }

            if self.stats.nodes_processed - self.last_yield_nodes >= self.config.yield_interval {
                return Some(self.progress_solution());
            }
        }
    }
}

impl<'a, M> std::fmt::Debug for SolveIterator<'a, M>
where
    M: SearchMonitor,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolveIterator")
            .field("rule", &self.rule.code)
            .field("frontier", &self.frontier)
            .field("incumbent_score", &self.incumbent_score())
            .field("finished", &self.finished)
            .finish()
    }
}
