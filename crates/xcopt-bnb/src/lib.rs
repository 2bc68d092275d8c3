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

//! Xcopt-BnB: anytime branch-and-bound flight scoring
//!
//! Computes the highest-scoring cross-country route achievable from a
//! recorded GPS track under one competition scoring rule. The search space
//! (a few ordered turnpoints chosen out of tens of thousands of fixes)
//! is only tractable through sound upper-bound pruning, and the solver is
//! built around that: role index ranges priced by interval geometry, a
//! best-first frontier, an incumbent, and progressive range refinement.
//!
//! Core flow
//! - Provide a `xcopt_model::FilteredTrack` and a `xcopt_rules::ScoringRule`.
//! - Call `solve` (or `solve_with_monitor`) with `TuningOptions`.
//! - Pull `Solution`s from the returned iterator: improving snapshots with
//!   non-increasing global bounds, ending in one final value that either
//!   proves optimality or reports the best effort after the refinement
//!   budget ran out.
//!
//! Design highlights
//! - Separation of concerns: the branch model carries ranges and bounds;
//!   `eval` prices and realizes routes; monitors observe/control; the
//!   iterator owns all mutable state of one invocation.
//! - Deterministic: frontier ties break on branch identity, so identical
//!   inputs replay identical yield sequences.
//! - Cooperative: each `next` is bounded work, cancellation is dropping
//!   the iterator.
//!
//! Module map
//! - `solver`: the engine and its entry points.
//! - `branch`: role ranges, branch identity, splitting.
//! - `frontier`: the bound-ordered live set.
//! - `eval`: sound pricing and exact realization.
//! - `monitor`: observation and termination control.
//! - `config`, `error`, `stats`, `solution`: the surrounding surface.

pub mod branch;
pub mod config;
pub mod error;
mod eval;
mod frontier;
pub mod monitor;
pub mod solution;
pub mod solver;
pub mod stats;

pub use branch::BranchId;
pub use config::TuningOptions;
pub use error::SolveError;
pub use monitor::composite::CompositeMonitor;
pub use monitor::log::LogMonitor;
pub use monitor::no_op::NoOperationMonitor;
pub use monitor::search_monitor::{PruneReason, SearchCommand, SearchMonitor};
pub use solution::Solution;
pub use solver::{solve, solve_rule_code, solve_with_monitor, SolveIterator};
pub use stats::SolverStatistics;
