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

//! League scoring over scoped worker threads
//!
//! Runs one independent branch-and-bound search per rule of a league, in
//! parallel via `std::thread::scope`, and collects the final solution of
//! each. Rules the track is too short for are skipped; configuration
//! errors fail fast before any thread is spawned.

use tracing::{debug, info};
use xcopt_bnb::{solve, SolveError, Solution, TuningOptions};
use xcopt_model::FilteredTrack;
use xcopt_rules::{league_rules, League, ScoringRule};

/// The final result of one rule variant.
#[derive(Clone, Debug)]
pub struct RuleScore {
    /// The rule the search ran under.
    pub rule: &'static ScoringRule,
    /// The last yield of the search: proven optimal, or best-effort when
    /// the refinement budget ran out.
    pub solution: Solution,
}

/// All rule results of one league, in table order.
#[derive(Clone, Debug)]
pub struct LeagueScores {
    league: League,
    scores: Vec<RuleScore>,
}

impl LeagueScores {
    /// The league these scores belong to.
    #[inline]
    pub fn league(&self) -> League {
        self.league
    }

    /// Per-rule results in table order; rules the track was too short for
    /// are absent.
    #[inline]
    pub fn scores(&self) -> &[RuleScore] {
        &self.scores
    }

    /// The highest-scoring rule result, if any rule produced one.
    pub fn best(&self) -> Option<&RuleScore> {
        self.scores
            .iter()
            .max_by(|a, b| a.solution.score().total_cmp(&b.solution.score()))
    }
}

impl std::fmt::Display for LeagueScores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "League {} scores:", self.league)?;
        for score in &self.scores {
            writeln!(
                f,
                "  {:<16} {:>8.2} points{}",
                score.rule.code,
                score.solution.score(),
                if score.solution.optimal() {
                    ""
                } else {
                    " (best effort)"
                }
            )?;
        }
        Ok(())
    }
}

/// Scores one track under every rule of a league.
///
/// Each rule gets its own solver invocation on its own scoped thread; the
/// threads share only the read-only track and the static rule table.
/// Results come back in table order regardless of completion order, so the
/// output is deterministic.
pub fn score_league(
    track: &FilteredTrack,
    league: League,
    config: &TuningOptions,
) -> Result<LeagueScores, SolveError> {
    config.validate()?;

    let rules = league_rules(league);
    info!(league = league.code(), rules = rules.len(), "scoring league");

    let finals: Vec<Option<Solution>> = std::thread::scope(|scope| {
        let handles: Vec<_> = rules
            .iter()
            .map(|rule| {
                scope.spawn(move || {
                    if track.flight_len() < rule.shape.min_fixes() {
                        debug!(rule = rule.code, "track too short, skipping rule");
                        return None;
                    }
                    let iterator = solve(track, rule, config.clone())
                        .expect("inputs were validated before spawning");
                    let last = iterator
                        .last()
                        .expect("a solve sequence always ends with a final value");
                    debug!(
                        rule = rule.code,
                        score = last.score(),
                        optimal = last.optimal(),
                        "rule scored"
                    );
                    Some(last)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("scoring thread panicked"))
            .collect()
    });

    let scores = rules
        .iter()
        .zip(finals)
        .filter_map(|(rule, solution)| solution.map(|solution| RuleScore { rule, solution }))
        .collect();

    Ok(LeagueScores {
        league,
        scores,
    })
}
