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

//! Search monitoring interface
//!
//! Declares the `SearchMonitor` trait and `PruneReason` for observing and
//! controlling the search. Callbacks track the solver lifecycle, and a
//! monitor can influence execution via `SearchCommand` (default: Continue);
//! a terminated search ends its sequence best-effort, exactly like an
//! exhausted refinement budget.

use crate::solution::Solution;
use crate::stats::SolverStatistics;
use xcopt_model::FilteredTrack;
use xcopt_rules::ScoringRule;

/// Instruction a monitor hands back to the solver.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Reasons for pruning a branch.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// No completion of the branch can be legal.
    Infeasible,
    /// The branch bound cannot beat the incumbent.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait SearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, track: &FilteredTrack, rule: &ScoringRule);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &SolverStatistics);
    /// Called to determine the next action of the search.
    fn search_command(&mut self, _statistics: &SolverStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called once per processed branch.
    fn on_step(&mut self, statistics: &SolverStatistics);
    /// Called when a branch bound is computed.
    fn on_bound_computed(&mut self, optimistic: f64, statistics: &SolverStatistics);
    /// Called when a branch is pruned.
    fn on_prune(&mut self, reason: PruneReason, statistics: &SolverStatistics);
    /// Called when a branch is split into live children.
    fn on_branch_split(&mut self, children: usize, statistics: &SolverStatistics);
    /// Called when a new incumbent is found.
    fn on_solution_found(&mut self, solution: &Solution, statistics: &SolverStatistics);
}

impl std::fmt::Debug for dyn SearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn SearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_command_display() {
        assert_eq!(format!("{}", SearchCommand::Continue), "Continue");
        assert_eq!(
            format!("{}", SearchCommand::Terminate("time limit".into())),
            "Terminate: time limit"
        );
        assert_eq!(SearchCommand::default(), SearchCommand::Continue);
    }

    #[test]
    fn test_prune_reason_display() {
        assert_eq!(format!("{}", PruneReason::Infeasible), "Infeasible");
        assert_eq!(format!("{}", PruneReason::BoundDominated), "BoundDominated");
    }
}
