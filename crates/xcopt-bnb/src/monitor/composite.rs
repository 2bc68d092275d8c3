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

use crate::monitor::search_monitor::{PruneReason, SearchCommand, SearchMonitor};
use crate::solution::Solution;
use crate::stats::SolverStatistics;
use xcopt_model::FilteredTrack;
use xcopt_rules::ScoringRule;

/// Fans every callback out to a list of monitors.
///
/// `search_command` returns the first non-`Continue` answer in insertion
/// order.
#[derive(Default)]
pub struct CompositeMonitor {
    monitors: Vec<Box<dyn SearchMonitor>>,
}

impl CompositeMonitor {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add<M>(&mut self, monitor: M)
    where
        M: SearchMonitor + 'static,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl SearchMonitor for CompositeMonitor {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, track: &FilteredTrack, rule: &ScoringRule) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(track, rule);
        }
    }

    fn on_exit_search(&mut self, statistics: &SolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(&mut self, statistics: &SolverStatistics) -> SearchCommand {
        for monitor in &mut self.monitors {
            let command = monitor.search_command(statistics);
            if command != SearchCommand::Continue {
                return command;
            }
        }
        SearchCommand::Continue
    }

    fn on_step(&mut self, statistics: &SolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_step(statistics);
        }
    }

    fn on_bound_computed(&mut self, optimistic: f64, statistics: &SolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_bound_computed(optimistic, statistics);
        }
    }

    fn on_prune(&mut self, reason: PruneReason, statistics: &SolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_prune(reason, statistics);
        }
    }

    fn on_branch_split(&mut self, children: usize, statistics: &SolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_branch_split(children, statistics);
        }
    }

    fn on_solution_found(&mut self, solution: &Solution, statistics: &SolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(solution, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOperationMonitor;

    struct TerminatingMonitor;

    impl SearchMonitor for TerminatingMonitor {
        fn name(&self) -> &str {
            "TerminatingMonitor"
        }
        fn on_enter_search(&mut self, _track: &FilteredTrack, _rule: &ScoringRule) {}
        fn on_exit_search(&mut self, _statistics: &SolverStatistics) {}
        fn search_command(&mut self, _statistics: &SolverStatistics) -> SearchCommand {
            SearchCommand::Terminate("stop".to_string())
        }
        fn on_step(&mut self, _statistics: &SolverStatistics) {}
        fn on_bound_computed(&mut self, _optimistic: f64, _statistics: &SolverStatistics) {}
        fn on_prune(&mut self, _reason: PruneReason, _statistics: &SolverStatistics) {}
        fn on_branch_split(&mut self, _children: usize, _statistics: &SolverStatistics) {}
        fn on_solution_found(&mut self, _solution: &Solution, _statistics: &SolverStatistics) {}
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut composite = CompositeMonitor::new();
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&SolverStatistics::default()),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_first_terminate_wins() {
        let mut composite = CompositeMonitor::new();
        composite.add(NoOperationMonitor::new());
        composite.add(TerminatingMonitor);
        assert_eq!(composite.len(), 2);
        assert_eq!(
            composite.search_command(&SolverStatistics::default()),
            SearchCommand::Terminate("stop".to_string())
        );
    }
}
