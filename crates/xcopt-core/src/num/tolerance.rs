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

//! # Float Tolerance Helpers
//!
//! Comparison helpers for kilometre-scale floating point values. All score
//! and distance comparisons in the workspace go through these functions with
//! an explicit tolerance so that pruning decisions, closing-distance ladder
//! rungs and score-identity checks agree on what "equal" means.
//!
//! The functions are generic over `num_traits::Float` so the same semantics
//! apply to `f32` and `f64`.

use num_traits::Float;

/// Returns `true` if `a` and `b` differ by at most `tolerance`.
#[inline(always)]
pub fn approx_eq<T: Float>(a: T, b: T, tolerance: T) -> bool {
    (a - b).abs() <= tolerance
}

/// Returns `true` if `value` is within `tolerance` of zero.
#[inline(always)]
pub fn approx_zero<T: Float>(value: T, tolerance: T) -> bool {
    value.abs() <= tolerance
}

/// Returns `true` if `a` exceeds `b` by more than `tolerance`.
///
/// This is the comparison used for "does this candidate beat the
/// incumbent": an improvement inside the tolerance band is not an
/// improvement at all.
#[inline(always)]
pub fn definitely_greater<T: Float>(a: T, b: T, tolerance: T) -> bool {
    a > b + tolerance
}

/// Returns `true` if `a` is at most `b` plus `tolerance`.
///
/// Used for bound-dominance pruning: a branch whose optimistic score is not
/// definitely above the incumbent can be discarded.
#[inline(always)]
pub fn leq_within<T: Float>(a: T, b: T, tolerance: T) -> bool {
    a <= b + tolerance
}

/// Clamps a value to be non-negative, flushing tiny negative noise to zero.
#[inline(always)]
pub fn non_negative<T: Float>(value: T) -> T {
    if value < T::zero() { T::zero() } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + 1e-7, TOL));
        assert!(!approx_eq(1.0, 1.0 + 1e-5, TOL));
        assert!(approx_eq(-2.5, -2.5, TOL));
    }

    #[test]
    fn test_approx_zero() {
        assert!(approx_zero(1e-9, TOL));
        assert!(approx_zero(-1e-9, TOL));
        assert!(!approx_zero(1e-3, TOL));
    }

    #[test]
    fn test_definitely_greater() {
        assert!(definitely_greater(2.0, 1.0, TOL));
        assert!(!definitely_greater(1.0 + 1e-8, 1.0, TOL));
        assert!(!definitely_greater(0.5, 1.0, TOL));
    }

    #[test]
    fn test_leq_within() {
        assert!(leq_within(1.0, 1.0, TOL));
        assert!(leq_within(1.0 + 1e-8, 1.0, TOL));
        assert!(!leq_within(2.0, 1.0, TOL));
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(-1e-12), 0.0);
        assert_eq!(non_negative(3.5), 3.5);
        assert_eq!(non_negative(0.0), 0.0);
    }
}
