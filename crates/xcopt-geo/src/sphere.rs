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

//! Great-circle distance on the FAI sphere
//!
//! All scoring distances are haversine distances on a fixed-radius sphere,
//! the datum flight recorders score against. Symmetric, non-negative, zero
//! iff the coordinates coincide within `COORD_EPSILON_DEG`.

use xcopt_model::Point;

/// Radius of the FAI scoring sphere in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Coordinates closer than this (in degrees, per axis) are one point.
pub const COORD_EPSILON_DEG: f64 = 1e-9;

/// Great-circle distance between two coordinate pairs in kilometres.
#[inline]
pub fn distance_deg(lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64) -> f64 {
    if (lon_a - lon_b).abs() <= COORD_EPSILON_DEG && (lat_a - lat_b).abs() <= COORD_EPSILON_DEG {
        return 0.0;
    }

    let lat_a_rad = lat_a.to_radians();
    let lat_b_rad = lat_b.to_radians();
    let d_lat = (lat_b - lat_a).to_radians();
    let d_lon = (lon_b - lon_a).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a_rad.cos() * lat_b_rad.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Great-circle distance between two points in kilometres.
#[inline]
pub fn distance(a: &Point, b: &Point) -> f64 {
    distance_deg(a.longitude, a.latitude, b.longitude, b.latitude)
}

/// Sum of consecutive point distances in kilometres.
#[inline]
pub fn path_distance(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance(&pair[0], &pair[1]))
        .sum()
}

/// Distance between a candidate loop's start and finish points.
///
/// Only meaningful for closed-shape rules; identical to `distance`, named
/// for the call sites that evaluate closing.
#[inline]
pub fn closing_gap(start: &Point, finish: &Point) -> f64 {
    distance(start, finish)
}
