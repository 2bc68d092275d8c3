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

//! Located result values
//!
//! Everything a presentation layer needs to draw a scored route on a map:
//! points that reference their originating fix, scored legs between points,
//! and the closing/end point pairs of closed and open shapes. These are
//! reporting types only; the search itself never keeps more than the fix
//! index of a point.

use crate::fix::{Fix, FixIndex};

/// A located result value referencing the originating fix.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Index of the fix this point was taken from.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub source: FixIndex,
}

impl Point {
    /// Creates a point from raw coordinates.
    #[inline]
    pub fn new(longitude: f64, latitude: f64, source: FixIndex) -> Self {
        Self {
            longitude,
            latitude,
            source,
        }
    }

    /// Creates a point from a fix, keeping the back-reference.
    #[inline]
    pub fn from_fix(fix: &Fix) -> Self {
        Self {
            longitude: fix.longitude,
            latitude: fix.latitude,
            source: fix.index,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Point(lon {:.6}, lat {:.6}, {})",
            self.longitude, self.latitude, self.source
        )
    }
}

/// One scored segment between two points.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// Human-readable label, e.g. `"TP1 : TP2"`.
    pub label: String,
    /// Scoring distance of the segment in kilometres.
    pub distance_km: f64,
    /// Segment start.
    pub start: Point,
    /// Segment finish.
    pub finish: Point,
}

impl Leg {
    /// Creates a leg.
    #[inline]
    pub fn new<L: Into<String>>(label: L, distance_km: f64, start: Point, finish: Point) -> Self {
        Self {
            label: label.into(),
            distance_km,
            start,
            finish,
        }
    }
}

impl std::fmt::Display for Leg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.2} km", self.label, self.distance_km)
    }
}

/// The pair of fixes a closed shape closes over, plus their gap.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosingPoints {
    /// Gap between the two closing fixes in kilometres.
    pub distance_km: f64,
    /// Closing fix on the way in (at or before the first turnpoint).
    pub in_point: Point,
    /// Closing fix on the way out (at or after the last turnpoint).
    pub out_point: Point,
}

/// Start and finish of an open (non-closed) route.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndPoints {
    pub start: Point,
    pub finish: Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_from_fix() {
        let fix = Fix::new(7.25, 46.5, 1_000, true, FixIndex::new(9));
        let point = Point::from_fix(&fix);
        assert_eq!(point.longitude, 7.25);
        assert_eq!(point.latitude, 46.5);
        assert_eq!(point.source.get(), 9);
    }

    #[test]
    fn test_leg_display() {
        let a = Point::new(6.0, 45.0, FixIndex::new(0));
        let b = Point::new(6.1, 45.1, FixIndex::new(1));
        let leg = Leg::new("TP1 : TP2", 13.912, a, b);
        assert_eq!(format!("{}", leg), "TP1 : TP2: 13.91 km");
    }
}
