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

//! Per-track bound cache
//!
//! `TrackBounds` precomputes chunked bounding boxes over the fix sequence
//! once per solver invocation. Branch pricing then answers two queries:
//!
//! - `range_box(lo, hi)`: a box covering every fix in the inclusive index
//!   range, assembled from whole chunk boxes plus the partial edges.
//! - `closest_pair(a, b)`: the closest pair of fixes between two index
//!   ranges, found with chunk-level lower-bound pruning. Used to place the
//!   closing fixes of triangles and out-and-return routes.
//!
//! The cache is read-only after construction; one instance belongs to one
//! solver invocation.

use crate::bbox::GeoBox;
use crate::sphere::distance_deg;
use xcopt_model::{FilteredTrack, FixIndex};

const CHUNK_SIZE: usize = 32;

/// Chunked bounding boxes over one track's fix sequence.
#[derive(Clone, Debug)]
pub struct TrackBounds {
    chunks: Vec<GeoBox>,
    num_fixes: usize,
}

impl TrackBounds {
    /// Builds the cache for a track. O(n) time and O(n / chunk) memory.
    pub fn new(track: &FilteredTrack) -> Self {
        let fixes = track.fixes();
        let mut chunks = Vec::with_capacity(fixes.len().div_ceil(CHUNK_SIZE));
        for chunk in fixes.chunks(CHUNK_SIZE) {
            let mut bbox = GeoBox::from_fix(&chunk[0]);
            for fix in &chunk[1..] {
                bbox.expand(fix.longitude, fix.latitude);
            }
            chunks.push(bbox);
        }
        Self {
            chunks,
            num_fixes: fixes.len(),
        }
    }

    /// A box covering every fix in the inclusive range `[lo, hi]`.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty or out of bounds.
    pub fn range_box(&self, track: &FilteredTrack, lo: usize, hi: usize) -> GeoBox {
        assert!(
            lo <= hi && hi < self.num_fixes,
            "called `TrackBounds::range_box` with invalid range [{}, {}] over {} fixes",
            lo,
            hi,
            self.num_fixes
        );

        let first = track.fix(FixIndex::new(lo));
        let mut bbox = GeoBox::from_fix(first);
        let mut index = lo + 1;
        while index <= hi {
            let chunk = index / CHUNK_SIZE;
            let chunk_start = chunk * CHUNK_SIZE;
            let chunk_end = (chunk_start + CHUNK_SIZE - 1).min(self.num_fixes - 1);
            if index == chunk_start && chunk_end <= hi {
                bbox.union(&self.chunks[chunk]);
                index = chunk_end + 1;
            } else {
                let fix = track.fix(FixIndex::new(index));
                bbox.expand(fix.longitude, fix.latitude);
                index += 1;
            }
        }
        bbox
    }

    /// Finds the closest pair of fixes `(a, b)` with `a` in `[a_lo, a_hi]`
    /// and `b` in `[b_lo, b_hi]`, returning the pair and its distance in
    /// kilometres.
    ///
    /// Chunk pairs whose box lower bound cannot beat the best pair found so
    /// far are skipped without touching their fixes. Iteration order is
    /// ascending and improvement is strict, so the result is deterministic.
    ///
    /// # Panics
    ///
    /// Panics if either range is empty or out of bounds.
    pub fn closest_pair(
        &self,
        track: &FilteredTrack,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> (FixIndex, FixIndex, f64) {
        assert!(
            a_lo <= a_hi && a_hi < self.num_fixes && b_lo <= b_hi && b_hi < self.num_fixes,
            "called `TrackBounds::closest_pair` with invalid ranges [{}, {}] / [{}, {}] over {} fixes",
            a_lo,
            a_hi,
            b_lo,
            b_hi,
            self.num_fixes
        );

        let mut best = f64::INFINITY;
        let mut best_pair = (FixIndex::new(a_lo), FixIndex::new(b_lo));

        let a_chunks = a_lo / CHUNK_SIZE..=a_hi / CHUNK_SIZE;
        for chunk_a in a_chunks {
            let span_a_lo = (chunk_a * CHUNK_SIZE).max(a_lo);
            let span_a_hi = (chunk_a * CHUNK_SIZE + CHUNK_SIZE - 1).min(a_hi);
            let b_chunks = b_lo / CHUNK_SIZE..=b_hi / CHUNK_SIZE;
            for chunk_b in b_chunks {
                if self.chunks[chunk_a].min_distance_km_to(&self.chunks[chunk_b]) >= best {
                    continue;
                }
                let span_b_lo = (chunk_b * CHUNK_SIZE).max(b_lo);
                let span_b_hi = (chunk_b * CHUNK_SIZE + CHUNK_SIZE - 1).min(b_hi);
                for a in span_a_lo..=span_a_hi {
                    let fix_a = track.fix(FixIndex::new(a));
                    for b in span_b_lo..=span_b_hi {
                        let fix_b = track.fix(FixIndex::new(b));
                        let d = distance_deg(
                            fix_a.longitude,
                            fix_a.latitude,
                            fix_b.longitude,
                            fix_b.latitude,
                        );
                        if d < best {
                            best = d;
                            best_pair = (FixIndex::new(a), FixIndex::new(b));
                        }
                    }
                }
            }
        }

        (best_pair.0, best_pair.1, best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use xcopt_model::TrackBuilder;

    fn random_track(rng: &mut StdRng, len: usize) -> FilteredTrack {
        let mut builder = TrackBuilder::new();
        for i in 0..len {
            builder.push_fix(
                6.0 + rng.gen_range(0.0..1.0),
                45.0 + rng.gen_range(0.0..1.0),
                i as i64 * 1_000,
            );
        }
        builder.build()
    }

    #[test]
    fn test_range_box_covers_every_fix() {
        let mut rng = StdRng::seed_from_u64(11);
        let track = random_track(&mut rng, 100);
        let bounds = TrackBounds::new(&track);

        for &(lo, hi) in &[(0usize, 99usize), (5, 70), (31, 33), (64, 64), (0, 31)] {
            let bbox = bounds.range_box(&track, lo, hi);
            let single = GeoBox::from_fix(track.fix(FixIndex::new(lo)));
            for i in lo..=hi {
                let fix = track.fix(FixIndex::new(i));
                let point = GeoBox::from_fix(fix);
                // A contained point is at distance zero from the range box.
                assert_eq!(bbox.min_distance_km_to(&point), 0.0, "fix {} escapes box", i);
            }
            // The range box never shrinks below a member box.
            assert!(bbox.max_distance_km_to(&single) >= 0.0);
        }
    }

    #[test]
    fn test_closest_pair_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..10 {
            let track = random_track(&mut rng, 80);
            let bounds = TrackBounds::new(&track);

            let (a_lo, a_hi) = (0, 39);
            let (b_lo, b_hi) = (40, 79);
            let (_, _, gap) = bounds.closest_pair(&track, a_lo, a_hi, b_lo, b_hi);

            let mut expected = f64::INFINITY;
            for a in a_lo..=a_hi {
                for b in b_lo..=b_hi {
                    let fa = track.fix(FixIndex::new(a));
                    let fb = track.fix(FixIndex::new(b));
                    let d =
                        distance_deg(fa.longitude, fa.latitude, fb.longitude, fb.latitude);
                    expected = expected.min(d);
                }
            }
            assert!((gap - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_closest_pair_with_overlapping_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        let track = random_track(&mut rng, 50);
        let bounds = TrackBounds::new(&track);
        // A fix paired with itself is the degenerate closest pair.
        let (a, b, gap) = bounds.closest_pair(&track, 0, 49, 0, 49);
        assert_eq!(a, b);
        assert_eq!(gap, 0.0);
    }

    #[test]
    #[should_panic(expected = "invalid range")]
    fn test_range_box_rejects_out_of_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let track = random_track(&mut rng, 10);
        let bounds = TrackBounds::new(&track);
        let _ = bounds.range_box(&track, 5, 10);
    }
}
