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

//! League rule tables
//!
//! The static, ordered mapping from league to scoring variants. Entries are
//! `'static` constants; lookups return references into the tables.
//!
//! FFVL closes shapes over a fixed 3 km gap and rejects anything wider.
//! XContest closes over a window relative to the route distance (5 %) and
//! penalizes the gap inside it.

use crate::rule::{ScoringRule, ShapeClass};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// A supported competition league.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum League {
    /// Fédération Française de Vol Libre.
    Ffvl,
    /// XContest world league.
    XContest,
}

impl League {
    /// The league's table code.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            League::Ffvl => "FFVL",
            League::XContest => "XContest",
        }
    }
}

impl std::str::FromStr for League {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FFVL" => Ok(League::Ffvl),
            "XContest" => Ok(League::XContest),
            other => Err(format!("unknown league code: {}", other)),
        }
    }
}

impl std::fmt::Display for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

const FAI_MIN_LEG_FRACTION: f64 = 0.28;

static FFVL_RULES: [ScoringRule; 4] = [
    ScoringRule::open_distance("od", "Distance libre", 1.0, 3),
    ScoringRule::closed(
        "tri",
        "Triangle plat",
        1.2,
        ShapeClass::FlatTriangle,
        Some(3.0),
        None,
        None,
    ),
    ScoringRule::closed(
        "fai",
        "Triangle FAI",
        1.4,
        ShapeClass::FaiTriangle {
            min_leg_fraction: FAI_MIN_LEG_FRACTION,
        },
        Some(3.0),
        None,
        None,
    ),
    ScoringRule::closed(
        "oar",
        "Aller-retour",
        1.2,
        ShapeClass::OutAndReturn,
        Some(3.0),
        None,
        None,
    ),
];

static XCONTEST_RULES: [ScoringRule; 3] = [
    ScoringRule::open_distance("od", "Free flight", 1.0, 3),
    ScoringRule::closed(
        "tri",
        "Free triangle",
        1.2,
        ShapeClass::FlatTriangle,
        None,
        None,
        Some(0.05),
    ),
    ScoringRule::closed(
        "fai",
        "FAI triangle",
        1.4,
        ShapeClass::FaiTriangle {
            min_leg_fraction: FAI_MIN_LEG_FRACTION,
        },
        None,
        None,
        Some(0.05),
    ),
];

static TABLES: Lazy<FxHashMap<League, &'static [ScoringRule]>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    map.insert(League::Ffvl, &FFVL_RULES[..]);
    map.insert(League::XContest, &XCONTEST_RULES[..]);
    map
});

/// Returns the ordered scoring variants of a league.
#[inline]
pub fn league_rules(league: League) -> &'static [ScoringRule] {
    TABLES
        .get(&league)
        .expect("every League variant has a table entry")
}

/// Finds one rule of a league by code.
#[inline]
pub fn find_rule(league: League, code: &str) -> Option<&'static ScoringRule> {
    league_rules(league).iter().find(|rule| rule.code == code)
}

/// String-keyed lookup for callers that carry raw league/rule codes.
#[inline]
pub fn lookup(league_code: &str, rule_code: &str) -> Option<&'static ScoringRule> {
    let league: League = league_code.parse().ok()?;
    find_rule(league, rule_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_tables_are_ordered_and_complete() {
        let ffvl = league_rules(League::Ffvl);
        assert_eq!(ffvl.len(), 4);
        assert_eq!(ffvl[0].code, "od");
        assert_eq!(ffvl[2].code, "fai");
        assert_eq!(ffvl[2].multiplier, 1.4);

        let xcontest = league_rules(League::XContest);
        assert_eq!(xcontest.len(), 3);
        assert_eq!(xcontest[1].closing_distance_relative, Some(0.05));
    }

    #[test]
    fn test_find_rule() {
        let rule = find_rule(League::Ffvl, "tri").unwrap();
        assert_eq!(rule.name, "Triangle plat");
        assert_eq!(rule.closing_distance_fixed_km, Some(3.0));
        assert!(find_rule(League::Ffvl, "nope").is_none());
    }

    #[test]
    fn test_lookup_by_code_strings() {
        assert!(lookup("XContest", "fai").is_some());
        assert!(lookup("XContest", "oar").is_none());
        assert!(lookup("NoSuchLeague", "od").is_none());
    }

    #[test]
    fn test_league_from_str_round_trip() {
        for league in [League::Ffvl, League::XContest] {
            let parsed: League = league.code().parse().unwrap();
            assert_eq!(parsed, league);
        }
        assert!("Unknown".parse::<League>().is_err());
    }

    #[test]
    fn test_fai_triangles_carry_leg_fraction() {
        for league in [League::Ffvl, League::XContest] {
            let rule = find_rule(league, "fai").unwrap();
            match rule.shape {
                ShapeClass::FaiTriangle { min_leg_fraction } => {
                    assert_eq!(min_leg_fraction, 0.28)
                }
                _ => panic!("fai rule must be a FAI triangle"),
            }
        }
    }
}
