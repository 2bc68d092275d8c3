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

use thiserror::Error;

/// Errors surfaced synchronously, before the solution sequence produces its
/// first value. Once the sequence has started it cannot fail: running out
/// of refinement budget simply ends it with a best-effort result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The track has too few fixes for the rule's shape class.
    #[error("track has {actual} fixes between launch and landing, but the shape needs at least {required}")]
    InvalidTrack { required: usize, actual: usize },

    /// The requested rule code is absent from the league table.
    #[error("unknown rule `{code}` in league `{league}`")]
    UnknownRule { league: String, code: String },

    /// A tuning option is outside its valid range.
    #[error("invalid tuning configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SolveError::InvalidTrack {
            required: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "track has 2 fixes between launch and landing, but the shape needs at least 3"
        );

        let err = SolveError::UnknownRule {
            league: "FFVL".to_string(),
            code: "zigzag".to_string(),
        };
        assert_eq!(err.to_string(), "unknown rule `zigzag` in league `FFVL`");

        let err = SolveError::InvalidConfiguration("max_refinement_depth must be positive".into());
        assert!(err.to_string().contains("max_refinement_depth"));
    }
}
