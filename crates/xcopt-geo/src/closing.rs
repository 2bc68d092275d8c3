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

//! Closing-distance ladder and shape legality
//!
//! A closed shape's start/finish gap is evaluated against a three-rung
//! ladder taken from the rule: a gap within the fixed or free closing
//! distance costs nothing; a gap within the relative window (a fraction of
//! the route distance) is penalized by its excess over the free threshold;
//! a wider gap makes the route illegal under this rule: the candidate is
//! rejected, not penalized.
//!
//! Triangle legality additionally requires every leg of a FAI triangle to
//! reach the rule's minimum fraction of the perimeter. A degenerate route
//! (perimeter within tolerance of zero) is legal and worth zero points.

use xcopt_core::num::tolerance::{approx_zero, leq_within, non_negative};
use xcopt_rules::{ScoringRule, ShapeClass};

/// Result of evaluating a closing gap against a rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosingEvaluation {
    /// Penalty in kilometres, zero inside the free rungs.
    pub penalty_km: f64,
    /// `false` when the gap exceeds every rung and the candidate must be
    /// rejected.
    pub legal: bool,
}

impl ClosingEvaluation {
    #[inline]
    fn legal_free() -> Self {
        Self {
            penalty_km: 0.0,
            legal: true,
        }
    }

    #[inline]
    fn illegal() -> Self {
        Self {
            penalty_km: 0.0,
            legal: false,
        }
    }
}

/// Evaluates a closing gap against the rule's ladder.
///
/// `route_km` is the unpenalized route distance; the relative rung scales
/// with it. Open-distance rules accept any gap with no penalty.
pub fn evaluate_closing(
    gap_km: f64,
    route_km: f64,
    rule: &ScoringRule,
    tolerance_km: f64,
) -> ClosingEvaluation {
    if !rule.shape.is_closed() {
        return ClosingEvaluation::legal_free();
    }

    if let Some(fixed) = rule.closing_distance_fixed_km {
        if leq_within(gap_km, fixed, tolerance_km) {
            return ClosingEvaluation::legal_free();
        }
    }
    if let Some(free) = rule.closing_distance_free_km {
        if leq_within(gap_km, free, tolerance_km) {
            return ClosingEvaluation::legal_free();
        }
    }
    if let Some(relative) = rule.closing_distance_relative {
        if leq_within(gap_km, relative * route_km, tolerance_km) {
            let penalty = non_negative(gap_km - rule.free_closing_threshold_km());
            return ClosingEvaluation {
                penalty_km: penalty,
                legal: true,
            };
        }
    }

    ClosingEvaluation::illegal()
}

/// The widest gap that can possibly be legal under `rule` for any route no
/// longer than `route_km_upper`.
///
/// Used for branch pruning: a branch whose smallest achievable gap exceeds
/// this can never produce a legal candidate.
#[inline]
pub fn max_legal_gap_km(route_km_upper: f64, rule: &ScoringRule) -> f64 {
    let relative = rule
        .closing_distance_relative
        .map(|fraction| fraction * route_km_upper)
        .unwrap_or(0.0);
    rule.free_closing_threshold_km().max(relative)
}

/// Checks triangle leg legality for a complete candidate.
///
/// For FAI triangles each leg must reach the configured fraction of the
/// perimeter. Flat triangles, out-and-return and open shapes have no leg
/// requirement. A degenerate perimeter is legal (and scores zero).
pub fn shape_legality(leg_distances_km: &[f64], rule: &ScoringRule, tolerance_km: f64) -> bool {
    match rule.shape {
        ShapeClass::FaiTriangle { min_leg_fraction } => {
            let total: f64 = leg_distances_km.iter().sum();
            if approx_zero(total, tolerance_km) {
                return true;
            }
            leg_distances_km
                .iter()
                .all(|leg| leq_within(min_leg_fraction * total, *leg, tolerance_km))
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xcopt_rules::{ScoringRule, ShapeClass};

    const TOL: f64 = 1e-9;

    fn fixed_rule() -> ScoringRule {
        ScoringRule::closed(
            "tri",
            "Triangle",
            1.2,
            ShapeClass::FlatTriangle,
            Some(3.0),
            None,
            None,
        )
    }

    fn relative_rule() -> ScoringRule {
        ScoringRule::closed(
            "tri",
            "Triangle",
            1.2,
            ShapeClass::FlatTriangle,
            None,
            Some(1.0),
            Some(0.05),
        )
    }

    #[test]
    fn test_gap_within_fixed_is_free() {
        let eval = evaluate_closing(2.5, 100.0, &fixed_rule(), TOL);
        assert!(eval.legal);
        assert_eq!(eval.penalty_km, 0.0);
    }

    #[test]
    fn test_gap_beyond_fixed_without_relative_is_illegal() {
        let eval = evaluate_closing(3.5, 100.0, &fixed_rule(), TOL);
        assert!(!eval.legal);
    }

    #[test]
    fn test_gap_within_free_is_free() {
        let eval = evaluate_closing(0.8, 100.0, &relative_rule(), TOL);
        assert!(eval.legal);
        assert_eq!(eval.penalty_km, 0.0);
    }

    #[test]
    fn test_gap_in_relative_window_is_penalized_by_excess() {
        // 100 km route, 5% window = 5 km, free threshold 1 km.
        let eval = evaluate_closing(4.0, 100.0, &relative_rule(), TOL);
        assert!(eval.legal);
        assert!((eval.penalty_km - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_gap_beyond_relative_window_is_illegal() {
        let eval = evaluate_closing(6.0, 100.0, &relative_rule(), TOL);
        assert!(!eval.legal);
    }

    #[test]
    fn test_open_distance_ignores_gap() {
        let rule = ScoringRule::open_distance("od", "Open distance", 1.0, 3);
        let eval = evaluate_closing(500.0, 10.0, &rule, TOL);
        assert!(eval.legal);
        assert_eq!(eval.penalty_km, 0.0);
    }

    #[test]
    fn test_max_legal_gap() {
        assert_eq!(max_legal_gap_km(100.0, &fixed_rule()), 3.0);
        assert_eq!(max_legal_gap_km(100.0, &relative_rule()), 5.0);
        // Short route: the free threshold dominates the relative window.
        assert_eq!(max_legal_gap_km(10.0, &relative_rule()), 1.0);
    }

    #[test]
    fn test_fai_leg_legality() {
        let rule = ScoringRule::closed(
            "fai",
            "FAI triangle",
            1.4,
            ShapeClass::FaiTriangle {
                min_leg_fraction: 0.28,
            },
            Some(3.0),
            None,
            None,
        );
        assert!(shape_legality(&[10.0, 10.0, 10.0], &rule, TOL));
        // 1 km leg of a 21 km perimeter is under 28%.
        assert!(!shape_legality(&[10.0, 10.0, 1.0], &rule, TOL));
        // Degenerate triangle is legal (zero score).
        assert!(shape_legality(&[0.0, 0.0, 0.0], &rule, TOL));
    }

    #[test]
    fn test_flat_triangle_has_no_leg_requirement() {
        assert!(shape_legality(&[10.0, 10.0, 1.0], &fixed_rule(), TOL));
    }
}
