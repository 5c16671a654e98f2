// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale construction.
//!
//! A scale pattern lists the interval from the tonic to every degree above
//! it. Building a scale adds each of those intervals to the tonic, so the
//! spelling of every degree follows from the tonic's spelling: D major
//! gets F# and C#, never Gb and Db.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::interval::{Interval, Quality};
use super::note::Note;
use crate::error::{Error, Result};

const fn m(size: u32) -> Interval {
    Interval::known(Quality::Minor, size)
}

const fn maj(size: u32) -> Interval {
    Interval::known(Quality::Major, size)
}

const fn p(size: u32) -> Interval {
    Interval::known(Quality::Perfect, size)
}

const fn dim(size: u32) -> Interval {
    Interval::known(Quality::Diminished, size)
}

const fn aug(size: u32) -> Interval {
    Interval::known(Quality::Augmented, size)
}

const MAJOR: [Interval; 7] = [maj(2), maj(3), p(4), p(5), maj(6), maj(7), p(8)];
const HARMONIC_MINOR: [Interval; 7] = [maj(2), m(3), p(4), p(5), m(6), maj(7), p(8)];
const NATURAL_MINOR: [Interval; 7] = [maj(2), m(3), p(4), p(5), m(6), m(7), p(8)];
const MELODIC_MINOR: [Interval; 7] = [maj(2), m(3), p(4), p(5), maj(6), maj(7), p(8)];
const DORIAN: [Interval; 7] = [maj(2), m(3), p(4), p(5), maj(6), m(7), p(8)];
const PHRYGIAN: [Interval; 7] = [m(2), m(3), p(4), p(5), m(6), m(7), p(8)];
const LYDIAN: [Interval; 7] = [maj(2), maj(3), aug(4), p(5), maj(6), maj(7), p(8)];
const MIXOLYDIAN: [Interval; 7] = [maj(2), maj(3), p(4), p(5), maj(6), m(7), p(8)];
const LOCRIAN: [Interval; 7] = [m(2), m(3), p(4), dim(5), m(6), m(7), p(8)];
const MAJOR_PENTATONIC: [Interval; 5] = [maj(2), maj(3), p(5), maj(6), p(8)];
const MINOR_PENTATONIC: [Interval; 5] = [m(3), p(4), p(5), m(7), p(8)];

/// Scale patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    Major,
    HarmonicMinor,
    NaturalMinor,
    MelodicMinor, // Ascending form
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    MajorPentatonic,
    MinorPentatonic,
}

impl ScaleType {
    /// All scale types
    pub const ALL: [ScaleType; 11] = [
        ScaleType::Major,
        ScaleType::HarmonicMinor,
        ScaleType::NaturalMinor,
        ScaleType::MelodicMinor,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::Locrian,
        ScaleType::MajorPentatonic,
        ScaleType::MinorPentatonic,
    ];

    /// Intervals from the tonic to each degree above it, ending on the octave
    pub fn intervals(self) -> &'static [Interval] {
        match self {
            ScaleType::Major => &MAJOR,
            ScaleType::HarmonicMinor => &HARMONIC_MINOR,
            ScaleType::NaturalMinor => &NATURAL_MINOR,
            ScaleType::MelodicMinor => &MELODIC_MINOR,
            ScaleType::Dorian => &DORIAN,
            ScaleType::Phrygian => &PHRYGIAN,
            ScaleType::Lydian => &LYDIAN,
            ScaleType::Mixolydian => &MIXOLYDIAN,
            ScaleType::Locrian => &LOCRIAN,
            ScaleType::MajorPentatonic => &MAJOR_PENTATONIC,
            ScaleType::MinorPentatonic => &MINOR_PENTATONIC,
        }
    }

    /// Get a human-readable name for this scale type
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::NaturalMinor => "Natural Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
            ScaleType::Dorian => "Dorian",
            ScaleType::Phrygian => "Phrygian",
            ScaleType::Lydian => "Lydian",
            ScaleType::Mixolydian => "Mixolydian",
            ScaleType::Locrian => "Locrian",
            ScaleType::MajorPentatonic => "Major Pentatonic",
            ScaleType::MinorPentatonic => "Minor Pentatonic",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ScaleType {
    type Err = Error;

    /// Parse a scale name; `minor` means harmonic minor
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s
            .to_lowercase()
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        match normalized.as_str() {
            "major" | "maj" | "ionian" => Ok(ScaleType::Major),
            "minor" | "min" | "harmonic minor" => Ok(ScaleType::HarmonicMinor),
            "natural minor" | "nat min" | "aeolian" => Ok(ScaleType::NaturalMinor),
            "melodic minor" => Ok(ScaleType::MelodicMinor),
            "dorian" => Ok(ScaleType::Dorian),
            "phrygian" => Ok(ScaleType::Phrygian),
            "lydian" => Ok(ScaleType::Lydian),
            "mixolydian" => Ok(ScaleType::Mixolydian),
            "locrian" => Ok(ScaleType::Locrian),
            "major pentatonic" => Ok(ScaleType::MajorPentatonic),
            "minor pentatonic" => Ok(ScaleType::MinorPentatonic),
            _ => Err(Error::invalid(format!("unknown scale type '{}'", s))),
        }
    }
}

/// One ascending octave of a scale, tonic to tonic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    scale_type: ScaleType,
    notes: Vec<Note>,
}

impl Scale {
    /// Build a scale from a tonic and pattern
    ///
    /// Fails if a degree cannot be written with at most a double accidental
    /// or falls outside the MIDI range.
    pub fn new(tonic: Note, scale_type: ScaleType) -> Result<Self> {
        let mut notes = Vec::with_capacity(scale_type.intervals().len() + 1);
        notes.push(tonic);
        for interval in scale_type.intervals() {
            notes.push(tonic.add_interval(interval)?);
        }

        debug!(%tonic, %scale_type, notes = notes.len(), "built scale");
        Ok(Self { scale_type, notes })
    }

    /// Build a scale from a tonic and a scale name (e.g. "major", "nat min")
    pub fn build(tonic: Note, name: &str) -> Result<Self> {
        Self::new(tonic, name.parse()?)
    }

    /// Get the tonic
    pub fn tonic(&self) -> Note {
        self.notes[0]
    }

    /// Get the scale type
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// Get the notes, tonic first and the upper tonic last
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }

    /// Get the number of notes, upper tonic included
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if this scale is empty (never true for a built scale)
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Check if a note (exact spelling and octave) is in this scale
    pub fn contains(&self, note: &Note) -> bool {
        self.notes.contains(note)
    }

    /// Get the scale degree (1-based) for a note, if it's in the scale
    pub fn degree_of(&self, note: &Note) -> Option<usize> {
        self.notes.iter().position(|n| n == note).map(|i| i + 1)
    }

    /// Get the note at a given scale degree (1-based)
    pub fn note_at_degree(&self, degree: usize) -> Option<Note> {
        if degree == 0 {
            return None;
        }
        self.notes.get(degree - 1).copied()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic(), self.scale_type)
    }
}

/// Build the notes of a scale from a tonic and a scale name
pub fn build_scale(tonic: Note, name: &str) -> Result<Vec<Note>> {
    Scale::build(tonic, name).map(Scale::into_notes)
}
