// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Named intervals (quality + size).
//!
//! An interval is written `<quality><size>`, e.g. `M3`, `P5`, `dim7`,
//! `aug13`. Sizes above 8 are compound intervals and are validated against
//! their simple equivalent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Interval quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Diminished,
    Minor,
    Major,
    Perfect,
    Augmented,
}

impl Quality {
    /// Quality tokens in prefix-match order (multi-character tokens first)
    const TOKENS: [(&'static str, Quality); 5] = [
        ("dim", Quality::Diminished),
        ("aug", Quality::Augmented),
        ("M", Quality::Major),
        ("m", Quality::Minor),
        ("P", Quality::Perfect),
    ];

    /// Canonical symbol for this quality
    pub fn symbol(self) -> &'static str {
        match self {
            Quality::Diminished => "dim",
            Quality::Minor => "m",
            Quality::Major => "M",
            Quality::Perfect => "P",
            Quality::Augmented => "aug",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Quality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Quality::TOKENS
            .iter()
            .find(|(token, _)| *token == s)
            .map(|&(_, q)| q)
            .ok_or_else(|| Error::invalid(format!("unsupported interval quality '{}'", s)))
    }
}

/// Interval family, determined by the simple size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    /// Unisons, fourths, fifths (and octaves)
    Perfect,
    /// Seconds, thirds, sixths, sevenths
    Major,
}

/// A named musical interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    quality: Quality,
    size: u32,
}

impl Interval {
    /// Largest size that still fits inside the MIDI range (`dim76` spans 127 semitones)
    pub const MAX_SIZE: u32 = 76;

    /// Create an interval, rejecting sizes < 1 and impossible
    /// quality/size combinations such as `P3` or `M5`
    pub fn new(quality: Quality, size: i64) -> Result<Self> {
        if size <= 0 {
            return Err(Error::invalid(format!(
                "interval size must be positive, got {}",
                size
            )));
        }
        if size > i64::from(Self::MAX_SIZE) {
            return Err(Error::invalid(format!(
                "interval size {} is larger than {}",
                size,
                Self::MAX_SIZE
            )));
        }
        let size = size as u32;

        let valid = match (family(simple_size(size)), quality) {
            (Family::Perfect, Quality::Perfect) => true,
            (Family::Major, Quality::Major | Quality::Minor) => true,
            (_, Quality::Diminished | Quality::Augmented) => true,
            _ => false,
        };
        if !valid {
            return Err(Error::invalid(format!(
                "impossible interval '{}{}'",
                quality, size
            )));
        }

        Ok(Self { quality, size })
    }

    /// Build from a pattern table entry; entries are covered by tests
    pub(crate) const fn known(quality: Quality, size: u32) -> Self {
        Self { quality, size }
    }

    /// Interval quality
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Interval size (1 = unison, 8 = octave)
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Simple equivalent size in 1..=7 (octaves reduce to 1)
    pub fn base_size(&self) -> u32 {
        simple_size(self.size)
    }

    /// Whole octaves spanned beyond the simple interval
    pub fn octaves(&self) -> u32 {
        (self.size - 1) / 7
    }

    /// True for intervals larger than an octave
    pub fn is_compound(&self) -> bool {
        self.size > 8
    }

    /// Number of letter steps from the lower to the upper note
    pub(crate) fn letter_steps(&self) -> usize {
        ((self.size - 1) % 7) as usize
    }

    /// Total semitone displacement, octaves included
    pub fn semitones(&self) -> i32 {
        let base = self.base_size();
        let adjustment = match (family(base), self.quality) {
            (Family::Perfect, Quality::Diminished) => -1,
            (Family::Perfect, Quality::Augmented) => 1,
            (Family::Major, Quality::Diminished) => -2,
            (Family::Major, Quality::Minor) => -1,
            (Family::Major, Quality::Augmented) => 1,
            _ => 0,
        };
        self.octaves() as i32 * 12 + natural_semitones(base) + adjustment
    }
}

/// Reduce a size to 1..=7 by removing whole octaves
fn simple_size(size: u32) -> u32 {
    (size - 1) % 7 + 1
}

fn family(base: u32) -> Family {
    match base {
        1 | 4 | 5 => Family::Perfect,
        _ => Family::Major,
    }
}

/// Semitones in the perfect or major interval of the given simple size
fn natural_semitones(base: u32) -> i32 {
    match base {
        1 => 0,
        2 => 2,
        3 => 4,
        4 => 5,
        5 => 7,
        6 => 9,
        _ => 11,
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quality, self.size)
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (quality, rest) = Quality::TOKENS
            .iter()
            .find_map(|&(token, q)| s.strip_prefix(token).map(|rest| (q, rest)))
            .ok_or_else(|| Error::invalid(format!("invalid interval string '{}'", s)))?;

        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid(format!(
                "expected integer interval size in '{}'",
                s
            )));
        }
        let size: i64 = rest
            .parse()
            .map_err(|_| Error::invalid(format!("interval size out of range in '{}'", s)))?;

        Interval::new(quality, size)
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(s: &str) -> Interval {
        s.parse().unwrap()
    }

    #[test]
    fn test_valid_intervals() {
        assert!(Interval::new(Quality::Perfect, 5).is_ok());
        assert!(Interval::new(Quality::Perfect, 1).is_ok());
        assert!(Interval::new(Quality::Perfect, 8).is_ok());
        assert!(Interval::new(Quality::Minor, 3).is_ok());
        assert!(Interval::new(Quality::Diminished, 5).is_ok());
        assert!(Interval::new(Quality::Augmented, 13).is_ok());
    }

    #[test]
    fn test_impossible_intervals() {
        assert!(Interval::new(Quality::Major, 5).is_err());
        assert!(Interval::new(Quality::Perfect, 6).is_err());
        assert!(Interval::new(Quality::Perfect, 3).is_err());
        assert!(Interval::new(Quality::Major, 4).is_err());
        assert!(Interval::new(Quality::Minor, 8).is_err());
        assert!(Interval::new(Quality::Perfect, 10).is_err());
        assert!(Interval::new(Quality::Minor, 15).is_err());
    }

    #[test]
    fn test_non_positive_size() {
        assert!(matches!(
            Interval::new(Quality::Major, 0),
            Err(Error::InvalidValue(_))
        ));
        assert!(Interval::new(Quality::Perfect, -4).is_err());
    }

    #[test]
    fn test_size_limit() {
        let widest = Interval::new(Quality::Diminished, 76).unwrap();
        assert_eq!(widest.semitones(), 127);
        assert!(matches!(
            Interval::new(Quality::Augmented, 77),
            Err(Error::InvalidValue(_))
        ));
        assert!(matches!(
            "P4294967293".parse::<Interval>(),
            Err(Error::InvalidValue(_))
        ));
        assert!("P99999999999999999999".parse::<Interval>().is_err());
    }

    #[test]
    fn test_parse() {
        let i = iv("dim5");
        assert_eq!(i.quality(), Quality::Diminished);
        assert_eq!(i.size(), 5);

        let i = iv("aug13");
        assert_eq!(i.quality(), Quality::Augmented);
        assert_eq!(i.size(), 13);

        assert_eq!(iv("m3").quality(), Quality::Minor);
        assert_eq!(iv("M3").quality(), Quality::Major);
        assert_eq!(iv("P8").quality(), Quality::Perfect);
    }

    #[test]
    fn test_parse_rejects_bad_strings() {
        assert!("X3".parse::<Interval>().is_err());
        assert!("M".parse::<Interval>().is_err());
        assert!("M3.5".parse::<Interval>().is_err());
        assert!("M-3".parse::<Interval>().is_err());
        assert!("P0".parse::<Interval>().is_err());
        assert!("diminished5".parse::<Interval>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for s in ["P1", "m2", "M2", "dim3", "aug4", "P5", "m6", "M7", "P8", "m14", "aug13"] {
            assert_eq!(iv(s).to_string(), s);
        }
    }

    #[test]
    fn test_semitones() {
        assert_eq!(iv("P1").semitones(), 0);
        assert_eq!(iv("m3").semitones(), 3);
        assert_eq!(iv("M3").semitones(), 4);
        assert_eq!(iv("aug4").semitones(), 6);
        assert_eq!(iv("dim5").semitones(), 6);
        assert_eq!(iv("dim7").semitones(), 9);
        assert_eq!(iv("P8").semitones(), 12);
        assert_eq!(iv("dim8").semitones(), 11);
        assert_eq!(iv("M10").semitones(), 16);
        assert_eq!(iv("m14").semitones(), 22);
        assert_eq!(iv("P15").semitones(), 24);
    }

    #[test]
    fn test_compound_sizes() {
        assert_eq!(iv("P8").base_size(), 1);
        assert!(!iv("P8").is_compound());
        assert_eq!(iv("M9").base_size(), 2);
        assert!(iv("M9").is_compound());
        assert_eq!(iv("m14").base_size(), 7);
        assert_eq!(iv("m14").octaves(), 1);
        assert_eq!(iv("P15").octaves(), 2);
    }

    #[test]
    fn test_serde_as_string() {
        let yaml = serde_yaml::to_string(&iv("aug4")).unwrap();
        assert_eq!(yaml.trim(), "aug4");
        let back: Interval = serde_yaml::from_str("m7").unwrap();
        assert_eq!(back, iv("m7"));
    }
}
