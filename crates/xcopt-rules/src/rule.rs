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

/// The route shape a scoring rule applies to, with its structural
/// parameters.
///
/// The shape determines how many *roles* the search assigns: an open
/// distance route needs a start, its turnpoints and a finish as explicit
/// roles, while closed shapes only search for their turnpoints; the
/// closing fixes are derived from the track afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeClass {
    /// Free distance through up to `turnpoints` intermediate vertices.
    OpenDistance {
        /// Number of intermediate turnpoints (0–3).
        turnpoints: u8,
    },
    /// Closed triangle without a leg-ratio requirement.
    FlatTriangle,
    /// Closed triangle whose shortest leg must reach a fraction of the
    /// total.
    FaiTriangle {
        /// Minimum leg length as a fraction of the triangle perimeter.
        min_leg_fraction: f64,
    },
    /// Fly out to one turnpoint and back.
    OutAndReturn,
}

impl ShapeClass {
    /// Number of roles (track indices) the search assigns for this shape.
    #[inline]
    pub fn num_roles(&self) -> usize {
        match self {
            ShapeClass::OpenDistance { turnpoints } => *turnpoints as usize + 2,
            ShapeClass::FlatTriangle | ShapeClass::FaiTriangle { .. } => 3,
            ShapeClass::OutAndReturn => 2,
        }
    }

    /// Minimum number of fixes between launch and landing this shape can be
    /// scored on. Role indices are strictly increasing, so one fix per role
    /// is needed.
    #[inline]
    pub fn min_fixes(&self) -> usize {
        self.num_roles()
    }

    /// Returns `true` for shapes that close over a start/finish gap.
    #[inline]
    pub fn is_closed(&self) -> bool {
        !matches!(self, ShapeClass::OpenDistance { .. })
    }

    /// Number of turnpoints reported for this shape.
    #[inline]
    pub fn turnpoint_count(&self) -> usize {
        match self {
            ShapeClass::OpenDistance { turnpoints } => *turnpoints as usize,
            ShapeClass::FlatTriangle | ShapeClass::FaiTriangle { .. } => 3,
            ShapeClass::OutAndReturn => 2,
        }
    }
}

impl std::fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeClass::OpenDistance { turnpoints } => {
                write!(f, "open distance ({} turnpoints)", turnpoints)
            }
            ShapeClass::FlatTriangle => write!(f, "flat triangle"),
            ShapeClass::FaiTriangle { min_leg_fraction } => {
                write!(f, "FAI triangle (min leg {:.0}%)", min_leg_fraction * 100.0)
            }
            ShapeClass::OutAndReturn => write!(f, "out-and-return"),
        }
    }
}

/// One scoring variant of a league.
///
/// Immutable once loaded from the table; the solver only ever reads it.
/// The three closing thresholds form a ladder (see `xcopt_geo::closing`):
/// a gap inside `closing_distance_fixed_km` or `closing_distance_free_km`
/// costs nothing, a gap inside the `closing_distance_relative` window is
/// penalized by its excess over the free threshold, anything wider is
/// illegal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoringRule {
    /// Short identifier, unique within a league (e.g. `"fai"`).
    pub code: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Score multiplier applied to the route distance.
    pub multiplier: f64,
    /// Closing distance that is always accepted, in kilometres.
    pub closing_distance_fixed_km: Option<f64>,
    /// Closing distance that incurs no penalty, in kilometres.
    pub closing_distance_free_km: Option<f64>,
    /// Closing distance as a fraction of the route distance; gaps inside
    /// this window incur a penalty.
    pub closing_distance_relative: Option<f64>,
    /// The route shape this rule scores.
    pub shape: ShapeClass,
}

impl ScoringRule {
    /// Creates an open-distance rule (no closing requirements).
    pub const fn open_distance(
        code: &'static str,
        name: &'static str,
        multiplier: f64,
        turnpoints: u8,
    ) -> Self {
        Self {
            code,
            name,
            multiplier,
            closing_distance_fixed_km: None,
            closing_distance_free_km: None,
            closing_distance_relative: None,
            shape: ShapeClass::OpenDistance { turnpoints },
        }
    }

    /// Creates a closed-shape rule.
    pub const fn closed(
        code: &'static str,
        name: &'static str,
        multiplier: f64,
        shape: ShapeClass,
        closing_distance_fixed_km: Option<f64>,
        closing_distance_free_km: Option<f64>,
        closing_distance_relative: Option<f64>,
    ) -> Self {
        Self {
            code,
            name,
            multiplier,
            closing_distance_fixed_km,
            closing_distance_free_km,
            closing_distance_relative,
            shape,
        }
    }

    /// The no-penalty closing threshold in kilometres: the larger of the
    /// fixed and free distances, or zero when neither is set.
    #[inline]
    pub fn free_closing_threshold_km(&self) -> f64 {
        let fixed = self.closing_distance_fixed_km.unwrap_or(0.0);
        let free = self.closing_distance_free_km.unwrap_or(0.0);
        fixed.max(free)
    }
}

impl std::fmt::Display for ScoringRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] x{} ({})",
            self.name, self.code, self.multiplier, self.shape
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_distance_roles() {
        let shape = ShapeClass::OpenDistance { turnpoints: 3 };
        assert_eq!(shape.num_roles(), 5);
        assert_eq!(shape.min_fixes(), 5);
        assert_eq!(shape.turnpoint_count(), 3);
        assert!(!shape.is_closed());
    }

    #[test]
    fn test_triangle_roles() {
        let shape = ShapeClass::FaiTriangle {
            min_leg_fraction: 0.28,
        };
        assert_eq!(shape.num_roles(), 3);
        assert_eq!(shape.turnpoint_count(), 3);
        assert!(shape.is_closed());
    }

    #[test]
    fn test_out_and_return_roles() {
        let shape = ShapeClass::OutAndReturn;
        assert_eq!(shape.num_roles(), 2);
        assert_eq!(shape.turnpoint_count(), 2);
        assert!(shape.is_closed());
    }

    #[test]
    fn test_free_closing_threshold() {
        let rule = ScoringRule::closed(
            "tri",
            "Flat triangle",
            1.2,
            ShapeClass::FlatTriangle,
            Some(3.0),
            Some(1.0),
            None,
        );
        assert_eq!(rule.free_closing_threshold_km(), 3.0);

        let open = ScoringRule::open_distance("od", "Open distance", 1.0, 3);
        assert_eq!(open.free_closing_threshold_km(), 0.0);
    }

    #[test]
    fn test_display() {
        let rule = ScoringRule::open_distance("od", "Open distance", 1.0, 3);
        assert_eq!(
            format!("{}", rule),
            "Open distance [od] x1 (open distance (3 turnpoints))"
        );
    }
}
