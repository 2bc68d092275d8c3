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

use std::time::Duration;

/// Statistics collected during one solver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Branches popped from the frontier.
    pub nodes_processed: u64,
    /// Splits that produced two live children.
    pub branches_split: u64,
    /// Splits that produced a single surviving child, re-queued under the
    /// parent's identity.
    pub refinements: u64,
    /// Branches discarded because their bound cannot beat the incumbent.
    pub prunings_bound: u64,
    /// Branches discarded because no completion can be legal.
    pub prunings_infeasible: u64,
    /// Branches dropped at the refinement depth bound.
    pub depth_limit_hits: u64,
    /// Incumbent improvements found.
    pub solutions_found: u64,
    /// The deepest refinement level reached.
    pub max_depth: u64,
    /// Total time spent inside the solver.
    pub time_total: Duration,
}

impl Default for SolverStatistics {
    fn default() -> Self {
        Self {
            nodes_processed: 0,
            branches_split: 0,
            refinements: 0,
            prunings_bound: 0,
            prunings_infeasible: 0,
            depth_limit_hits: 0,
            solutions_found: 0,
            max_depth: 0,
            time_total: Duration::ZERO,
        }
    }
}

impl SolverStatistics {
    #[inline]
    pub fn on_node_processed(&mut self) {
        self.nodes_processed = self.nodes_processed.saturating_add(1);
    }

    #[inline]
    pub fn on_branch_split(&mut self) {
        self.branches_split = self.branches_split.saturating_add(1);
    }

    #[inline]
    pub fn on_refinement(&mut self) {
        self.refinements = self.refinements.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_limit_hit(&mut self) {
        self.depth_limit_hits = self.depth_limit_hits.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Xcopt-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes processed:      {}", self.nodes_processed)?;
        writeln!(f, "  Branches split:       {}", self.branches_split)?;
        writeln!(f, "  Refinements:          {}", self.refinements)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (infeasible):{}", self.prunings_infeasible)?;
        writeln!(f, "  Depth limit hits:     {}", self.depth_limit_hits)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let mut stats = SolverStatistics::default();
        stats.on_node_processed();
        stats.on_node_processed();
        stats.on_branch_split();
        stats.on_refinement();
        stats.on_pruning_bound();
        stats.on_pruning_infeasible();
        stats.on_depth_limit_hit();
        stats.on_solution_found();
        stats.on_depth_update(7);
        stats.on_depth_update(3);

        assert_eq!(stats.nodes_processed, 2);
        assert_eq!(stats.branches_split, 1);
        assert_eq!(stats.refinements, 1);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.prunings_infeasible, 1);
        assert_eq!(stats.depth_limit_hits, 1);
        assert_eq!(stats.solutions_found, 1);
        assert_eq!(stats.max_depth, 7);
    }

    #[test]
    fn test_display_lists_counters() {
        let mut stats = SolverStatistics::default();
        stats.on_node_processed();
        let text = format!("{}", stats);
        assert!(text.contains("Nodes processed:      1"));
        assert!(text.contains("Total time:"));
    }
}
