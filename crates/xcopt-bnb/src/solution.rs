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

use crate::branch::BranchId;
use std::time::Duration;
use xcopt_model::ScoreInfo;

/// One emitted value of the solution sequence: an immutable snapshot of the
/// search at a reporting point.
///
/// Owned by the caller once yielded; the solver never touches it again.
/// The final value of a sequence either proves optimality (`optimal()`)
/// or signals an exhausted search budget (`!optimal()`, best-effort).
#[derive(Clone, Debug)]
pub struct Solution {
    id: BranchId,
    branch_upper_bound: f64,
    global_upper_bound: f64,
    optimal: bool,
    nodes_processed: u64,
    score: f64,
    score_info: Option<ScoreInfo>,
    elapsed: Option<Duration>,
}

impl Solution {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: BranchId,
        branch_upper_bound: f64,
        global_upper_bound: f64,
        optimal: bool,
        nodes_processed: u64,
        score: f64,
        score_info: Option<ScoreInfo>,
        elapsed: Option<Duration>,
    ) -> Self {
        Self {
            id,
            branch_upper_bound,
            global_upper_bound,
            optimal,
            nodes_processed,
            score,
            score_info,
            elapsed,
        }
    }

    /// Identity of the branch this snapshot reports on.
    #[inline]
    pub fn id(&self) -> &BranchId {
        &self.id
    }

    /// Upper bound of the reported branch.
    #[inline]
    pub fn branch_upper_bound(&self) -> f64 {
        self.branch_upper_bound
    }

    /// Highest score still achievable anywhere in the search.
    /// Non-increasing across the yields of one invocation.
    #[inline]
    pub fn global_upper_bound(&self) -> f64 {
        self.global_upper_bound
    }

    /// `true` on the final yield when optimality was proven; `true` on at
    /// most one yield per sequence.
    #[inline]
    pub fn optimal(&self) -> bool {
        self.optimal
    }

    /// Branches processed so far.
    #[inline]
    pub fn nodes_processed(&self) -> u64 {
        self.nodes_processed
    }

    /// Best realized score so far (zero while no candidate is complete).
    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Full breakdown of the best candidate, when one exists.
    #[inline]
    pub fn score_info(&self) -> Option<&ScoreInfo> {
        self.score_info.as_ref()
    }

    /// Wall-clock time since the search started.
    #[inline]
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// A deterministic one-line digest of this snapshot.
    ///
    /// Excludes wall-clock time, so identical invocations produce identical
    /// digests; test fixtures compare these.
    pub fn summary(&self) -> String {
        format!(
            "{} bound {:.9} global {:.9} score {:.9} optimal {} nodes {}",
            self.id,
            self.branch_upper_bound,
            self.global_upper_bound,
            self.score,
            self.optimal,
            self.nodes_processed
        )
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solution(score {:.2}, global bound {:.2}, {}, {} nodes)",
            self.score,
            self.global_upper_bound,
            if self.optimal { "optimal" } else { "improving" },
            self.nodes_processed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_and_summary() {
        let solution = Solution::new(
            BranchId::Seq(0),
            50.0,
            48.5,
            false,
            12,
            42.0,
            None,
            Some(Duration::from_millis(3)),
        );
        assert_eq!(solution.branch_upper_bound(), 50.0);
        assert_eq!(solution.global_upper_bound(), 48.5);
        assert!(!solution.optimal());
        assert_eq!(solution.nodes_processed(), 12);
        assert_eq!(solution.score(), 42.0);
        assert!(solution.score_info().is_none());
        assert!(solution.elapsed().is_some());
        assert_eq!(
            solution.summary(),
            "#0 bound 50.000000000 global 48.500000000 score 42.000000000 optimal false nodes 12"
        );
    }

    #[test]
    fn test_summary_excludes_elapsed() {
        let with_time = Solution::new(
            BranchId::Seq(0),
            1.0,
            1.0,
            true,
            1,
            1.0,
            None,
            Some(Duration::from_secs(9)),
        );
        let without_time =
            Solution::new(BranchId::Seq(0), 1.0, 1.0, true, 1, 1.0, None, None);
        assert_eq!(with_time.summary(), without_time.summary());
    }
}
