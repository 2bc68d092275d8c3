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

//! # Xcopt Geo
//!
//! Great-circle geometry for flight scoring: exact distances for realized
//! scores, and interval geometry (bounding boxes over fix ranges) that the
//! branch-and-bound search uses for pruning.
//!
//! The soundness of the whole search rests on one contract kept by this
//! crate: `GeoBox::max_distance_km_to` never under-estimates and
//! `GeoBox::min_distance_km_to` never over-estimates the true distance
//! between any two contained points.
//!
//! Module map
//! - `sphere`: haversine distance on the FAI sphere, path distance,
//!   closing gap.
//! - `bbox`: `GeoBox` with the sound min/max distance bounds.
//! - `bounds`: `TrackBounds`, a per-track cache of chunked boxes with range
//!   queries and a pruned closest-pair search for closing fixes.
//! - `closing`: the closing-distance ladder and triangle leg legality.

pub mod bbox;
pub mod bounds;
pub mod closing;
pub mod sphere;

pub use bbox::GeoBox;
pub use bounds::TrackBounds;
pub use closing::{evaluate_closing, max_legal_gap_km, shape_legality, ClosingEvaluation};
pub use sphere::{closing_gap, distance, distance_deg, path_distance, EARTH_RADIUS_KM};
