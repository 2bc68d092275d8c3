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

//! # Xcopt Model
//!
//! **The Core Domain Model for the Xcopt Flight Scoring Solver.**
//!
//! This crate defines the data structures a scored flight is made of. It is
//! the data interchange layer between the track provider (launch/landing
//! bounded GPS fixes) and the optimizing engine (`xcopt_bnb`).
//!
//! ## Architecture
//!
//! * **`fix`**: one timestamped GPS sample (`Fix`) and its strongly-typed
//!   position in the filtered sequence (`FixIndex`).
//! * **`track`**: the `FilteredTrack` (immutable, read-only for the solver)
//!   and `TrackBuilder` (mutable, optimized for construction).
//! * **`point`**: located result values (`Point`, `Leg`, `ClosingPoints`,
//!   `EndPoints`) that reference originating fixes by index.
//! * **`score`**: the fully realized `ScoreInfo` breakdown of one route.
//!
//! ## Design Philosophy
//!
//! 1. **Type Safety**: fix positions are a distinct index type; they cannot
//!    be confused with raw offsets into other sequences.
//! 2. **Read-Only Sharing**: a `FilteredTrack` is never mutated after
//!    construction, so any number of concurrent solver invocations may
//!    borrow it.
//! 3. **Fail-Fast**: the builder validates chronological ordering eagerly so
//!    the solver never sees an inconsistent track.

pub mod fix;
pub mod point;
pub mod score;
pub mod track;

pub use fix::{Fix, FixIndex};
pub use point::{ClosingPoints, EndPoints, Leg, Point};
pub use score::ScoreInfo;
pub use track::{FilteredTrack, TrackBuilder};
