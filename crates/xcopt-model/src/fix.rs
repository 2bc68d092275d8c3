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

use xcopt_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for fix indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct FixIndexTag;

impl TypedIndexTag for FixIndexTag {
    const NAME: &'static str = "FixIndex";
}

/// A typed index into the filtered fix sequence.
pub type FixIndex = TypedIndex<FixIndexTag>;

/// One GPS sample from the flight recorder, chronologically ordered within
/// its track.
///
/// `index` is the position of this fix in the filtered sequence handed to
/// the solver and is immutable once created; every result `Point` refers
/// back to a fix through it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fix {
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Unix timestamp of the sample in milliseconds.
    pub timestamp_ms: i64,
    /// Whether the recorder flagged this sample as a valid 3D fix.
    pub valid: bool,
    /// Position in the filtered sequence.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub index: FixIndex,
}

impl Fix {
    /// Creates a new fix.
    #[inline]
    pub fn new(longitude: f64, latitude: f64, timestamp_ms: i64, valid: bool, index: FixIndex) -> Self {
        Self {
            longitude,
            latitude,
            timestamp_ms,
            valid,
            index,
        }
    }
}

impl std::fmt::Display for Fix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fix({}: lon {:.6}, lat {:.6}, t {})",
            self.index, self.longitude, self.latitude, self.timestamp_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_fields() {
        let fix = Fix::new(6.5, 45.2, 1_000, true, FixIndex::new(3));
        assert_eq!(fix.longitude, 6.5);
        assert_eq!(fix.latitude, 45.2);
        assert_eq!(fix.timestamp_ms, 1_000);
        assert!(fix.valid);
        assert_eq!(fix.index.get(), 3);
    }

    #[test]
    fn test_display() {
        let fix = Fix::new(6.0, 45.0, 42, true, FixIndex::new(0));
        let text = format!("{}", fix);
        assert!(text.contains("FixIndex(0)"));
        assert!(text.contains("t 42"));
    }
}
