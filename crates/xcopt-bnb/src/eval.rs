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

//! Route evaluation: bounds and realized scores
//!
//! `RouteEvaluator` prices branches for the search. Two operations:
//!
//! - `price`: a fast, provably non-underestimating bound on the score of
//!   any completion of a branch, from the bounding boxes of its role
//!   ranges. May also prove a branch infeasible (no completion can close or
//!   satisfy the FAI leg ratio).
//! - `realize`: the exact score and full `ScoreInfo` of one concrete
//!   assignment, including the closing-pair search and legality checks.
//!   Returns `None` for assignments that are illegal under the rule.
//!
//! Soundness of the whole search rests on `price` never under-estimating;
//! every bound here is derived from `GeoBox` distance bounds and penalty
//! monotonicity.

use crate::branch::{RoleRange, MAX_ROLES};
use smallvec::SmallVec;
use xcopt_core::num::tolerance::non_negative;
use xcopt_geo::{
    closing_gap, distance, evaluate_closing, max_legal_gap_km, shape_legality, GeoBox,
    TrackBounds,
};
use xcopt_model::{ClosingPoints, EndPoints, FilteredTrack, FixIndex, Leg, Point, ScoreInfo};
use xcopt_rules::{ScoringRule, ShapeClass};

/// The outcome of pricing one branch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BranchPricing {
    /// Upper bound on the score of any completion.
    pub optimistic: f64,
    /// `false` when no completion can be legal.
    pub feasible: bool,
}

impl BranchPricing {
    #[inline]
    fn infeasible() -> Self {
        Self {
            optimistic: 0.0,
            feasible: false,
        }
    }
}

/// Prices branches and realizes candidate routes for one invocation.
pub(crate) struct RouteEvaluator<'a> {
    track: &'a FilteredTrack,
    rule: &'a ScoringRule,
    bounds: TrackBounds,
    tolerance_km: f64,
}

impl<'a> RouteEvaluator<'a> {
    pub fn new(track: &'a FilteredTrack, rule: &'a ScoringRule, tolerance_km: f64) -> Self {
        Self {
            track,
            rule,
            bounds: TrackBounds::new(track),
            tolerance_km,
        }
    }

    #[inline]
    fn launch(&self) -> usize {
        self.track.launch().get()
    }

    #[inline]
    fn landing(&self) -> usize {
        self.track.landing().get()
    }

    /// Computes the optimistic bound of a branch with the given role ranges.
    pub fn price(&self, roles: &[RoleRange]) -> BranchPricing {
        let boxes: SmallVec<[GeoBox; MAX_ROLES]> = roles
            .iter()
            .map(|range| {
                self.bounds
                    .range_box(self.track, range.lo as usize, range.hi as usize)
            })
            .collect();

        let distance_upper: f64 = match self.rule.shape {
            ShapeClass::OpenDistance { .. } => boxes
                .windows(2)
                .map(|pair| pair[0].max_distance_km_to(&pair[1]))
                .sum(),
            ShapeClass::FlatTriangle | ShapeClass::FaiTriangle { .. } => {
                boxes[0].max_distance_km_to(&boxes[1])
                    + boxes[1].max_distance_km_to(&boxes[2])
                    + boxes[2].max_distance_km_to(&boxes[0])
            }
            ShapeClass::OutAndReturn => 2.0 * boxes[0].max_distance_km_to(&boxes[1]),
        };

        if let ShapeClass::FaiTriangle { min_leg_fraction } = self.rule.shape {
            let legs_upper = [
                boxes[0].max_distance_km_to(&boxes[1]),
                boxes[1].max_distance_km_to(&boxes[2]),
                boxes[2].max_distance_km_to(&boxes[0]),
            ];
            let total_lower = boxes[0].min_distance_km_to(&boxes[1])
                + boxes[1].min_distance_km_to(&boxes[2])
                + boxes[2].min_distance_km_to(&boxes[0]);
            let shortest_allowed = min_leg_fraction * total_lower - self.tolerance_km;
            if legs_upper.iter().any(|leg| *leg < shortest_allowed) {
                return BranchPricing::infeasible();
            }
        }

        let mut penalty_lower = 0.0;
        if self.rule.shape.is_closed() {
            let first = &roles[0];
            let last = &roles[roles.len() - 1];
            let prefix = self
                .bounds
                .range_box(self.track, self.launch(), first.hi as usize);
            let suffix = self
                .bounds
                .range_box(self.track, last.lo as usize, self.landing());
            let gap_lower = prefix.min_distance_km_to(&suffix);

            if gap_lower > max_legal_gap_km(distance_upper, self.rule) + self.tolerance_km {
                return BranchPricing::infeasible();
            }
            // The tolerance keeps this a true lower bound for completions
            // accepted right at the free threshold.
            penalty_lower = non_negative(
                gap_lower - self.rule.free_closing_threshold_km() - self.tolerance_km,
            );
        }

        BranchPricing {
            optimistic: non_negative(distance_upper * self.rule.multiplier - penalty_lower),
            feasible: true,
        }
    }

    /// Scores one concrete assignment exactly.
    ///
    /// Returns `None` when the assignment is illegal under the rule (FAI
    /// leg ratio violated, or the closing gap beyond every ladder rung).
    pub fn realize(&self, assignment: &[u32]) -> Option<(f64, ScoreInfo)> {
        let points: SmallVec<[Point; MAX_ROLES]> = assignment
            .iter()
            .map(|index| Point::from_fix(self.track.fix(FixIndex::new(*index as usize))))
            .collect();

        match self.rule.shape {
            ShapeClass::OpenDistance { .. } => Some(self.realize_open(&points)),
            ShapeClass::FlatTriangle | ShapeClass::FaiTriangle { .. } => {
                self.realize_closed_loop(assignment, &points)
            }
            ShapeClass::OutAndReturn => self.realize_out_and_return(assignment, &points),
        }
    }

    fn realize_open(&self, points: &[Point]) -> (f64, ScoreInfo) {
        let role_names: Vec<String> = (0..points.len())
            .map(|role| {
                if role == 0 {
                    "start".to_string()
                } else if role == points.len() - 1 {
                    "finish".to_string()
                } else {
                    format!("TP{}", role)
                }
            })
            .collect();

        let mut legs = Vec::with_capacity(points.len() - 1);
        let mut total = 0.0;
        for pair in 0..points.len() - 1 {
            let d = distance(&points[pair], &points[pair + 1]);
            total += d;
            legs.push(Leg::new(
                format!("{} : {}", role_names[pair], role_names[pair + 1]),
                d,
                points[pair],
                points[pair + 1],
            ));
        }

        let score = non_negative(total * self.rule.multiplier);
        let info = ScoreInfo {
            legs,
            closing_points: None,
            end_points: Some(EndPoints {
                start: points[0],
                finish: points[points.len() - 1],
            }),
            turnpoints: points[1..points.len() - 1].to_vec(),
            distance_km: total,
            penalty: 0.0,
            score,
        };
        (score, info)
    }

    fn realize_closed_loop(
        &self,
        assignment: &[u32],
        points: &[Point],
    ) -> Option<(f64, ScoreInfo)> {
        let leg_distances = [
            distance(&points[0], &points[1]),
            distance(&points[1], &points[2]),
            distance(&points[2], &points[0]),
        ];
        let total: f64 = leg_distances.iter().sum();

        if !shape_legality(&leg_distances, self.rule, self.tolerance_km) {
            return None;
        }

        let (closing, penalty) = self.close_loop(assignment[0], assignment[2], total)?;

        let legs = vec![
            Leg::new("TP1 : TP2", leg_distances[0], points[0], points[1]),
            Leg::new("TP2 : TP3", leg_distances[1], points[1], points[2]),
            Leg::new("TP3 : TP1", leg_distances[2], points[2], points[0]),
        ];
        let score = non_negative(total * self.rule.multiplier - penalty);
        let info = ScoreInfo {
            legs,
            closing_points: Some(closing),
            end_points: None,
            turnpoints: points.to_vec(),
            distance_km: total,
            penalty,
            score,
        };
        Some((score, info))
    }

    fn realize_out_and_return(
        &self,
        assignment: &[u32],
        points: &[Point],
    ) -> Option<(f64, ScoreInfo)> {
        let out = distance(&points[0], &points[1]);
        let total = 2.0 * out;

        let (closing, penalty) = self.close_loop(assignment[0], assignment[1], total)?;

        let legs = vec![
            Leg::new("TP1 : TP2", out, points[0], points[1]),
            Leg::new("TP2 : TP1", out, points[1], points[0]),
        ];
        let score = non_negative(total * self.rule.multiplier - penalty);
        let info = ScoreInfo {
            legs,
            closing_points: Some(closing),
            end_points: None,
            turnpoints: points.to_vec(),
            distance_km: total,
            penalty,
            score,
        };
        Some((score, info))
    }

    /// Finds the closing pair around `[first_turnpoint, last_turnpoint]`
    /// and evaluates the ladder. `None` when the loop cannot legally close.
    fn close_loop(
        &self,
        first_turnpoint: u32,
        last_turnpoint: u32,
        total_km: f64,
    ) -> Option<(ClosingPoints, f64)> {
        let (in_index, out_index, gap) = self.bounds.closest_pair(
            self.track,
            self.launch(),
            first_turnpoint as usize,
            last_turnpoint as usize,
            self.landing(),
        );

        let evaluation = evaluate_closing(gap, total_km, self.rule, self.tolerance_km);
        if !evaluation.legal {
            return None;
        }

        let in_point = Point::from_fix(self.track.fix(in_index));
        let out_point = Point::from_fix(self.track.fix(out_index));
        debug_assert!((closing_gap(&in_point, &out_point) - gap).abs() <= f64::EPSILON * 1e3);

        Some((
            ClosingPoints {
                distance_km: gap,
                in_point,
                out_point,
            },
            evaluation.penalty_km,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::Branch;
    use xcopt_model::TrackBuilder;
    use xcopt_rules::ScoringRule;

    const TOL: f64 = 1e-6;

    // Roughly one kilometre of latitude in degrees on the FAI sphere.
    const KM_LAT: f64 = 1.0 / 111.194926644;

    fn line_track(step_km: f64, fixes: usize) -> FilteredTrack {
        let mut builder = TrackBuilder::new();
        for i in 0..fixes {
            builder.push_fix(6.0, 45.0 + step_km * KM_LAT * i as f64, i as i64 * 1_000);
        }
        builder.build()
    }

    #[test]
    fn test_price_never_underestimates_open_distance() {
        let track = line_track(1.0, 30);
        let rule = ScoringRule::open_distance("od", "Open distance", 1.0, 1);
        let evaluator = RouteEvaluator::new(&track, &rule, TOL);

        let root = Branch::root(0, 29, rule.shape.num_roles());
        let pricing = evaluator.price(&root.roles);
        assert!(pricing.feasible);

        // Brute force every completion; the bound must dominate all.
        let mut best = 0.0f64;
        for a in 0..30u32 {
            for b in a + 1..30 {
                for c in b + 1..30 {
                    let (score, _) = evaluator.realize(&[a, b, c]).unwrap();
                    best = best.max(score);
                }
            }
        }
        assert!(
            pricing.optimistic >= best - TOL,
            "bound {} under-estimates best completion {}",
            pricing.optimistic,
            best
        );
    }

    #[test]
    fn test_realize_open_distance_scores_path() {
        let track = line_track(1.0, 5);
        let rule = ScoringRule::open_distance("od", "Open distance", 1.0, 1);
        let evaluator = RouteEvaluator::new(&track, &rule, TOL);

        let (score, info) = evaluator.realize(&[0, 2, 4]).unwrap();
        assert!((info.distance_km - 4.0).abs() < 0.01);
        assert_eq!(score, info.score);
        assert_eq!(info.legs.len(), 2);
        assert_eq!(info.legs[0].label, "start : TP1");
        assert_eq!(info.legs[1].label, "TP1 : finish");
        assert_eq!(info.turnpoints.len(), 1);
        assert!(info.end_points.is_some());
        assert!(info.closing_points.is_none());
        assert!(info.identity_holds(rule.multiplier, TOL));
    }

    #[test]
    fn test_realize_rejects_unclosable_triangle() {
        // A straight line cannot close: the first and last turnpoint are
        // the nearest prefix/suffix fixes and still kilometres apart.
        let track = line_track(5.0, 3);
        let rule = ScoringRule::closed(
            "tri",
            "Flat triangle",
            1.2,
            xcopt_rules::ShapeClass::FlatTriangle,
            Some(3.0),
            None,
            None,
        );
        let evaluator = RouteEvaluator::new(&track, &rule, TOL);
        assert!(evaluator.realize(&[0, 1, 2]).is_none());
    }

    #[test]
    fn test_realize_out_and_return_doubles_the_leg() {
        let mut builder = TrackBuilder::new();
        builder
            .push_fix(6.0, 45.0, 0)
            .push_fix(6.0, 45.0 + 10.0 * KM_LAT, 1_000)
            .push_fix(6.0, 45.0 + 0.5 * KM_LAT, 2_000);
        let track = builder.build();
        let rule = ScoringRule::closed(
            "oar",
            "Out and return",
            1.2,
            xcopt_rules::ShapeClass::OutAndReturn,
            Some(3.0),
            None,
            None,
        );
        let evaluator = RouteEvaluator::new(&track, &rule, TOL);

        // Turnpoints 0 and 1; the loop closes between fix 0 and fix 2
        // (0.5 km apart, inside the fixed 3 km rung).
        let (score, info) = evaluator.realize(&[0, 1]).unwrap();
        assert!((info.distance_km - 20.0).abs() < 0.05);
        assert_eq!(info.penalty, 0.0);
        assert!((score - info.distance_km * 1.2).abs() < 1e-9);
        let closing = info.closing_points.unwrap();
        assert!((closing.distance_km - 0.5).abs() < 0.01);
    }
}
