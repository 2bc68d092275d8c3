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

//! Filtered GPS track
//!
//! The `FilteredTrack` is the solver's only view of a flight: an ordered,
//! launch/landing-bounded sequence of valid fixes. The track provider owns
//! filtering (invalid fixes, pre-launch and post-landing samples are already
//! gone); the solver treats the result as immutable shared data.
//!
//! Construction goes through `TrackBuilder`, which assigns indices and
//! validates chronological ordering eagerly, so downstream code can rely on
//! strictly increasing timestamps without re-checking them.

use crate::fix::{Fix, FixIndex};

/// An ordered sequence of GPS fixes bounded by launch and landing indices.
///
/// Owned by the caller, read-only for the solver. Indices are strictly
/// increasing by time and no two fixes share a timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredTrack {
    fixes: Vec<Fix>,
    launch: FixIndex,
    landing: FixIndex,
}

impl FilteredTrack {
    /// Constructs a track from an already-filtered fix sequence.
    ///
    /// # Panics
    ///
    /// Panics if the sequence is empty, if fix indices do not match their
    /// positions, if timestamps are not strictly increasing, or if
    /// `launch`/`landing` are out of bounds or out of order.
    pub fn new(fixes: Vec<Fix>, launch: FixIndex, landing: FixIndex) -> Self {
        assert!(
            !fixes.is_empty(),
            "called `FilteredTrack::new` with an empty fix sequence"
        );
        assert!(
            landing.get() < fixes.len(),
            "called `FilteredTrack::new` with landing index out of bounds: the len is {} but the index is {}",
            fixes.len(),
            landing.get()
        );
        assert!(
            launch <= landing,
            "called `FilteredTrack::new` with launch {} after landing {}",
            launch,
            landing
        );
        for (position, fix) in fixes.iter().enumerate() {
            assert_eq!(
                fix.index.get(),
                position,
                "called `FilteredTrack::new` with a fix whose index {} does not match its position {}",
                fix.index,
                position
            );
        }
        for pair in fixes.windows(2) {
            assert!(
                pair[0].timestamp_ms < pair[1].timestamp_ms,
                "called `FilteredTrack::new` with non-increasing timestamps at {}",
                pair[1].index
            );
        }

        Self {
            fixes,
            launch,
            landing,
        }
    }

    /// Returns the fix at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn fix(&self, index: FixIndex) -> &Fix {
        &self.fixes[index.get()]
    }

    /// Returns the launch fix index.
    #[inline]
    pub fn launch(&self) -> FixIndex {
        self.launch
    }

    /// Returns the landing fix index.
    #[inline]
    pub fn landing(&self) -> FixIndex {
        self.landing
    }

    /// Returns the number of fixes in the whole filtered sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    /// Returns `true` if the track holds no fixes.
    ///
    /// Always `false` for a constructed track; present for completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Returns the number of fixes between launch and landing, inclusive.
    #[inline]
    pub fn flight_len(&self) -> usize {
        self.landing.get() - self.launch.get() + 1
    }

    /// Returns all fixes as a slice.
    #[inline]
    pub fn fixes(&self) -> &[Fix] {
        &self.fixes
    }
}

impl std::fmt::Display for FilteredTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FilteredTrack({} fixes, launch {}, landing {})",
            self.fixes.len(),
            self.launch,
            self.landing
        )
    }
}

/// Incremental builder for a `FilteredTrack`.
///
/// Assigns fix indices in push order. By default the whole sequence is
/// flown: launch is the first fix and landing the last; both can be
/// overridden before `build`.
#[derive(Clone, Debug, Default)]
pub struct TrackBuilder {
    fixes: Vec<Fix>,
    launch: Option<FixIndex>,
    landing: Option<FixIndex>,
}

impl TrackBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a valid fix, assigning the next index.
    #[inline]
    pub fn push_fix(&mut self, longitude: f64, latitude: f64, timestamp_ms: i64) -> &mut Self {
        let index = FixIndex::new(self.fixes.len());
        self.fixes
            .push(Fix::new(longitude, latitude, timestamp_ms, true, index));
        self
    }

    /// Overrides the launch index (defaults to the first fix).
    #[inline]
    pub fn with_launch(&mut self, launch: FixIndex) -> &mut Self {
        self.launch = Some(launch);
        self
    }

    /// Overrides the landing index (defaults to the last fix).
    #[inline]
    pub fn with_landing(&mut self, landing: FixIndex) -> &mut Self {
        self.landing = Some(landing);
        self
    }

    /// Finalizes the track.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as `FilteredTrack::new`.
    pub fn build(&mut self) -> FilteredTrack {
        let fixes = std::mem::take(&mut self.fixes);
        let launch = self.launch.unwrap_or_else(|| FixIndex::new(0));
        let landing = self
            .landing
            .unwrap_or_else(|| FixIndex::new(fixes.len().saturating_sub(1)));
        FilteredTrack::new(fixes, launch, landing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_fix_track() -> FilteredTrack {
        let mut builder = TrackBuilder::new();
        builder
            .push_fix(6.0, 45.0, 0)
            .push_fix(6.1, 45.1, 1_000)
            .push_fix(6.2, 45.2, 2_000);
        builder.build()
    }

    #[test]
    fn test_builder_assigns_indices_and_bounds() {
        let track = three_fix_track();
        assert_eq!(track.len(), 3);
        assert_eq!(track.flight_len(), 3);
        assert_eq!(track.launch().get(), 0);
        assert_eq!(track.landing().get(), 2);
        assert_eq!(track.fix(FixIndex::new(1)).longitude, 6.1);
        assert_eq!(track.fix(FixIndex::new(1)).index.get(), 1);
    }

    #[test]
    fn test_launch_landing_override() {
        let mut builder = TrackBuilder::new();
        builder
            .push_fix(6.0, 45.0, 0)
            .push_fix(6.1, 45.1, 1_000)
            .push_fix(6.2, 45.2, 2_000)
            .push_fix(6.3, 45.3, 3_000)
            .with_launch(FixIndex::new(1))
            .with_landing(FixIndex::new(2));
        let track = builder.build();
        assert_eq!(track.len(), 4);
        assert_eq!(track.flight_len(), 2);
    }

    #[test]
    #[should_panic(expected = "non-increasing timestamps")]
    fn test_rejects_non_increasing_timestamps() {
        let mut builder = TrackBuilder::new();
        builder.push_fix(6.0, 45.0, 1_000).push_fix(6.1, 45.1, 1_000);
        let _ = builder.build();
    }

    #[test]
    #[should_panic(expected = "empty fix sequence")]
    fn test_rejects_empty_sequence() {
        let _ = TrackBuilder::new().build();
    }

    #[test]
    #[should_panic(expected = "launch FixIndex(2) after landing FixIndex(1)")]
    fn test_rejects_launch_after_landing() {
        let mut builder = TrackBuilder::new();
        builder
            .push_fix(6.0, 45.0, 0)
            .push_fix(6.1, 45.1, 1_000)
            .push_fix(6.2, 45.2, 2_000)
            .with_launch(FixIndex::new(2))
            .with_landing(FixIndex::new(1));
        let _ = builder.build();
    }

    #[test]
    fn test_display() {
        let track = three_fix_track();
        assert_eq!(
            format!("{}", track),
            "FilteredTrack(3 fixes, launch FixIndex(0), landing FixIndex(2))"
        );
    }
}
