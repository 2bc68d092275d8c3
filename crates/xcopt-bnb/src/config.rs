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

use crate::error::SolveError;

/// Tuning configuration for one solver invocation.
///
/// A fixed, explicitly enumerated structure with documented defaults; every
/// field can be left at its default and overridden individually with the
/// `with_*` setters.
#[derive(Clone, Debug, PartialEq)]
pub struct TuningOptions {
    /// Bound on the number of refinement passes along any search path.
    /// When a branch reaches this depth without completing it is dropped
    /// and the sequence ends best-effort instead of proving optimality.
    pub max_refinement_depth: u32,
    /// Number of processed nodes between two progress yields when neither
    /// the incumbent nor the termination state changes.
    pub yield_interval: u64,
    /// Early-stop hint for the caller: stop pulling values once this many
    /// nodes were processed. Not enforced internally.
    pub node_budget_hint: Option<u64>,
    /// Tolerance in kilometres for distance and score comparisons.
    pub numeric_tolerance_km: f64,
}

impl Default for TuningOptions {
    fn default() -> Self {
        Self {
            max_refinement_depth: 128,
            yield_interval: 1024,
            node_budget_hint: None,
            numeric_tolerance_km: 1e-6,
        }
    }
}

impl TuningOptions {
    /// Creates the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the refinement depth bound.
    #[inline]
    pub fn with_max_refinement_depth(mut self, depth: u32) -> Self {
        self.max_refinement_depth = depth;
        self
    }

    /// Overrides the progress yield interval.
    #[inline]
    pub fn with_yield_interval(mut self, interval: u64) -> Self {
        self.yield_interval = interval;
        self
    }

    /// Sets the caller-side node budget hint.
    #[inline]
    pub fn with_node_budget_hint(mut self, budget: u64) -> Self {
        self.node_budget_hint = Some(budget);
        self
    }

    /// Overrides the numeric tolerance.
    #[inline]
    pub fn with_numeric_tolerance_km(mut self, tolerance: f64) -> Self {
        self.numeric_tolerance_km = tolerance;
        self
    }

    /// Validates every option against its numeric range.
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.max_refinement_depth == 0 {
            return Err(SolveError::InvalidConfiguration(
                "max_refinement_depth must be positive".to_string(),
            ));
        }
        if self.yield_interval == 0 {
            return Err(SolveError::InvalidConfiguration(
                "yield_interval must be positive".to_string(),
            ));
        }
        if self.node_budget_hint == Some(0) {
            return Err(SolveError::InvalidConfiguration(
                "node_budget_hint must be positive when set".to_string(),
            ));
        }
        if !self.numeric_tolerance_km.is_finite() || self.numeric_tolerance_km < 0.0 {
            return Err(SolveError::InvalidConfiguration(
                "numeric_tolerance_km must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(TuningOptions::default().validate().is_ok());
    }

    #[test]
    fn test_setters() {
        let options = TuningOptions::new()
            .with_max_refinement_depth(16)
            .with_yield_interval(10)
            .with_node_budget_hint(50_000)
            .with_numeric_tolerance_km(1e-4);
        assert_eq!(options.max_refinement_depth, 16);
        assert_eq!(options.yield_interval, 10);
        assert_eq!(options.node_budget_hint, Some(50_000));
        assert_eq!(options.numeric_tolerance_km, 1e-4);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_depth() {
        let options = TuningOptions::new().with_max_refinement_depth(0);
        assert!(matches!(
            options.validate(),
            Err(SolveError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_zero_yield_interval() {
        let options = TuningOptions::new().with_yield_interval(0);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let options = TuningOptions::new().with_numeric_tolerance_km(-1.0);
        assert!(options.validate().is_err());
        let options = TuningOptions::new().with_numeric_tolerance_km(f64::NAN);
        assert!(options.validate().is_err());
    }
}
