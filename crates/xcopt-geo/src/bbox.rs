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

//! Geographic bounding boxes with sound distance bounds
//!
//! A `GeoBox` is a latitude/longitude interval product covering a set of
//! fixes. The search prices branches through two bounds:
//!
//! - `max_distance_km_to`: never less than the distance between any two
//!   contained points.
//! - `min_distance_km_to`: never more than the distance between any two
//!   contained points.
//!
//! Both derive from a per-box radius: any contained point can be reached
//! from the box centre by travelling along a meridian and then along a
//! parallel, so half the meridian extent plus half the parallel extent
//! (taken at the latitude closest to the equator, where parallels are
//! longest) bounds the centre distance. The triangle inequality then gives
//! the pairwise bounds. Flight tracks never straddle the antimeridian, so
//! longitude intervals are plain intervals.

use crate::sphere::{distance_deg, EARTH_RADIUS_KM};
use xcopt_model::Fix;

/// An inclusive latitude/longitude box over a set of coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBox {
    min_lon: f64,
    max_lon: f64,
    min_lat: f64,
    max_lat: f64,
}

impl GeoBox {
    /// Creates a degenerate box covering a single coordinate.
    #[inline]
    pub fn from_coords(longitude: f64, latitude: f64) -> Self {
        Self {
            min_lon: longitude,
            max_lon: longitude,
            min_lat: latitude,
            max_lat: latitude,
        }
    }

    /// Creates a box covering a single fix.
    #[inline]
    pub fn from_fix(fix: &Fix) -> Self {
        Self::from_coords(fix.longitude, fix.latitude)
    }

    /// Expands the box to cover an additional coordinate.
    #[inline]
    pub fn expand(&mut self, longitude: f64, latitude: f64) {
        self.min_lon = self.min_lon.min(longitude);
        self.max_lon = self.max_lon.max(longitude);
        self.min_lat = self.min_lat.min(latitude);
        self.max_lat = self.max_lat.max(latitude);
    }

    /// Expands the box to cover another box.
    #[inline]
    pub fn union(&mut self, other: &GeoBox) {
        self.min_lon = self.min_lon.min(other.min_lon);
        self.max_lon = self.max_lon.max(other.max_lon);
        self.min_lat = self.min_lat.min(other.min_lat);
        self.max_lat = self.max_lat.max(other.max_lat);
    }

    /// Returns the box centre as `(longitude, latitude)`.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// An upper bound on the distance from the box centre to any contained
    /// point, in kilometres.
    #[inline]
    pub fn radius_km(&self) -> f64 {
        let meridian_half = EARTH_RADIUS_KM * (self.max_lat - self.min_lat).to_radians() / 2.0;
        let widest_cos = if self.min_lat <= 0.0 && self.max_lat >= 0.0 {
            1.0
        } else {
            self.min_lat.abs().min(self.max_lat.abs()).to_radians().cos()
        };
        let parallel_half =
            EARTH_RADIUS_KM * widest_cos * (self.max_lon - self.min_lon).to_radians() / 2.0;
        meridian_half + parallel_half
    }

    /// An upper bound on the distance between any point of `self` and any
    /// point of `other`, in kilometres. Never under-estimates.
    #[inline]
    pub fn max_distance_km_to(&self, other: &GeoBox) -> f64 {
        let (lon_a, lat_a) = self.center();
        let (lon_b, lat_b) = other.center();
        distance_deg(lon_a, lat_a, lon_b, lat_b) + self.radius_km() + other.radius_km()
    }

    /// A lower bound on the distance between any point of `self` and any
    /// point of `other`, in kilometres. Never over-estimates.
    #[inline]
    pub fn min_distance_km_to(&self, other: &GeoBox) -> f64 {
        let (lon_a, lat_a) = self.center();
        let (lon_b, lat_b) = other.center();
        let centers = distance_deg(lon_a, lat_a, lon_b, lat_b);
        (centers - self.radius_km() - other.radius_km()).max(0.0)
    }
}

impl std::fmt::Display for GeoBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GeoBox(lon [{:.4}, {:.4}], lat [{:.4}, {:.4}])",
            self.min_lon, self.max_lon, self.min_lat, self.max_lat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_single_point_box_has_zero_radius() {
        let bbox = GeoBox::from_coords(6.0, 45.0);
        assert_eq!(bbox.radius_km(), 0.0);
        let other = GeoBox::from_coords(6.0, 46.0);
        let d = distance_deg(6.0, 45.0, 6.0, 46.0);
        assert!((bbox.max_distance_km_to(&other) - d).abs() < 1e-9);
        assert!((bbox.min_distance_km_to(&other) - d).abs() < 1e-9);
    }

    #[test]
    fn test_expand_and_union() {
        let mut bbox = GeoBox::from_coords(6.0, 45.0);
        bbox.expand(6.5, 45.5);
        let mut other = GeoBox::from_coords(7.0, 44.5);
        other.union(&bbox);
        let (lon, lat) = other.center();
        assert!((lon - 6.5).abs() < 1e-12);
        assert!((lat - 45.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_are_sound_for_random_point_sets() {
        // The binding contract: max never under-estimates, min never
        // over-estimates, for any pair of contained points.
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let base_lon = rng.gen_range(-8.0..8.0);
            let base_lat = rng.gen_range(-60.0..60.0);
            let points_a: Vec<(f64, f64)> = (0..8)
                .map(|_| {
                    (
                        base_lon + rng.gen_range(0.0..0.5),
                        base_lat + rng.gen_range(0.0..0.5),
                    )
                })
                .collect();
            let points_b: Vec<(f64, f64)> = (0..8)
                .map(|_| {
                    (
                        base_lon + rng.gen_range(0.5..1.5),
                        base_lat + rng.gen_range(0.2..1.0),
                    )
                })
                .collect();

            let mut box_a = GeoBox::from_coords(points_a[0].0, points_a[0].1);
            for &(lon, lat) in &points_a[1..] {
                box_a.expand(lon, lat);
            }
            let mut box_b = GeoBox::from_coords(points_b[0].0, points_b[0].1);
            for &(lon, lat) in &points_b[1..] {
                box_b.expand(lon, lat);
            }

            let upper = box_a.max_distance_km_to(&box_b);
            let lower = box_a.min_distance_km_to(&box_b);
            for &(lon_a, lat_a) in &points_a {
                for &(lon_b, lat_b) in &points_b {
                    let d = distance_deg(lon_a, lat_a, lon_b, lat_b);
                    assert!(
                        d <= upper + 1e-9,
                        "max bound {} under-estimates pair distance {}",
                        upper,
                        d
                    );
                    assert!(
                        d >= lower - 1e-9,
                        "min bound {} over-estimates pair distance {}",
                        lower,
                        d
                    );
                }
            }
        }
    }

    #[test]
    fn test_min_distance_of_overlapping_boxes_is_zero() {
        let mut box_a = GeoBox::from_coords(6.0, 45.0);
        box_a.expand(7.0, 46.0);
        let mut box_b = GeoBox::from_coords(6.5, 45.5);
        box_b.expand(7.5, 46.5);
        assert_eq!(box_a.min_distance_km_to(&box_b), 0.0);
    }
}
