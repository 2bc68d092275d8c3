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

use crate::point::{ClosingPoints, EndPoints, Leg, Point};

/// The fully realized scoring breakdown for one complete route.
///
/// Invariant: `score = distance_km × multiplier − penalty` and `score ≥ 0`,
/// where the multiplier belongs to the rule the route was scored under.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreInfo {
    /// Scored segments in route order.
    pub legs: Vec<Leg>,
    /// Closing fixes of a closed shape (triangle, out-and-return).
    pub closing_points: Option<ClosingPoints>,
    /// Start and finish of an open route.
    pub end_points: Option<EndPoints>,
    /// Chosen turnpoints in track order.
    pub turnpoints: Vec<Point>,
    /// Route distance in kilometres, without penalty applied.
    pub distance_km: f64,
    /// Closing penalty in kilometres.
    pub penalty: f64,
    /// Final score.
    pub score: f64,
}

impl ScoreInfo {
    /// Checks the score identity against a multiplier within `tolerance`.
    #[inline]
    pub fn identity_holds(&self, multiplier: f64, tolerance: f64) -> bool {
        self.score >= 0.0
            && (self.distance_km * multiplier - self.penalty - self.score).abs() <= tolerance
    }
}

impl std::fmt::Display for ScoreInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Score Summary")?;
        writeln!(f, "   Distance: {:.2} km", self.distance_km)?;
        writeln!(f, "   Penalty:  {:.2} km", self.penalty)?;
        writeln!(f, "   Score:    {:.2}", self.score)?;
        if self.legs.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "   {:<16} | {:<10}", "Leg", "Distance")?;
        writeln!(f, "   {:-<16}-+-{:-<10}", "", "")?;
        for leg in &self.legs {
            writeln!(f, "   {:<16} | {:<10.2}", leg.label, leg.distance_km)?;
        }
        Ok(())
    }
}
