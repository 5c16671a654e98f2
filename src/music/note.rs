// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Spelled notes and rests.
//!
//! A [`Note`] is a pitch letter, an octave in scientific pitch notation and
//! an accidental. Notes are written `<letter><octave><accidental>`, e.g.
//! `C4`, `E4b`, `F-1##`. Unlike a MIDI number, a note keeps its spelling:
//! `C5#` and `D5b` sound the same but are different notes.
//!
//! Adding an [`Interval`] to a note picks the target letter from the
//! interval size and then searches for the accidental that produces the
//! right number of semitones, so `C4 + m3` is `E4b` and never `D4#`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{error, trace};

use super::interval::Interval;
use crate::error::{Error, Result};

/// MIDI note number type (0-127)
pub type MidiNote = u8;

/// Lowest valid octave
pub const MIN_OCTAVE: i32 = -1;
/// Highest valid octave
pub const MAX_OCTAVE: i32 = 9;
/// Highest valid MIDI note number
pub const MAX_MIDI: i32 = 127;

/// Pitch letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// All letters in diatonic order starting from C
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Position in the C-D-E-F-G-A-B cycle
    pub fn index(self) -> usize {
        self as usize
    }

    /// Semitones above C for the natural note
    pub fn semitones(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Parse a letter (case-insensitive)
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'C' => Ok(Letter::C),
            'D' => Ok(Letter::D),
            'E' => Ok(Letter::E),
            'F' => Ok(Letter::F),
            'G' => Ok(Letter::G),
            'A' => Ok(Letter::A),
            'B' => Ok(Letter::B),
            _ => Err(Error::invalid(format!("invalid pitch '{}'", c))),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        };
        f.write_str(c)
    }
}

/// Accidentals, from double flat to double sharp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    DoubleSharp,
    Flat,
    DoubleFlat,
}

impl Accidental {
    /// Preference order used when spelling the result of an interval
    pub const SEARCH_ORDER: [Accidental; 5] = [
        Accidental::Natural,
        Accidental::Sharp,
        Accidental::DoubleSharp,
        Accidental::Flat,
        Accidental::DoubleFlat,
    ];

    /// Semitone alteration
    pub fn offset(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
            Accidental::Flat => -1,
            Accidental::DoubleFlat => -2,
        }
    }

    /// Written suffix (empty for natural)
    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
            Accidental::Flat => "b",
            Accidental::DoubleFlat => "bb",
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Accidental {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "" => Ok(Accidental::Natural),
            "#" => Ok(Accidental::Sharp),
            "##" => Ok(Accidental::DoubleSharp),
            "b" => Ok(Accidental::Flat),
            "bb" => Ok(Accidental::DoubleFlat),
            _ => Err(Error::invalid(format!("invalid accidental '{}'", s))),
        }
    }
}

/// A spelled note: letter, octave and accidental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    letter: Letter,
    octave: i8,
    accidental: Accidental,
}

impl Note {
    /// C4, MIDI note 60
    pub const MIDDLE_C: Note = Note {
        letter: Letter::C,
        octave: 4,
        accidental: Accidental::Natural,
    };

    /// Create a note, checking the octave range and that the note has a
    /// MIDI number in 0..=127
    pub fn new(letter: Letter, octave: i32, accidental: Accidental) -> Result<Self> {
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
            return Err(Error::invalid(format!(
                "octave needs to be in the range [{}, {}], got {}",
                MIN_OCTAVE, MAX_OCTAVE, octave
            )));
        }

        let midi = midi_number_of(letter, octave, accidental);
        if !(0..=MAX_MIDI).contains(&midi) {
            return Err(Error::invalid(format!(
                "{}{}{} has MIDI note number {}, outside [0, {}]",
                letter, octave, accidental, midi, MAX_MIDI
            )));
        }

        Ok(Self {
            letter,
            octave: octave as i8,
            accidental,
        })
    }

    /// Create a note with no accidental
    pub fn natural(letter: Letter, octave: i32) -> Result<Self> {
        Self::new(letter, octave, Accidental::Natural)
    }

    /// Create a note from loosely typed parts, e.g. `('b', 4, "B")`
    pub fn from_parts(letter: char, octave: i32, accidental: &str) -> Result<Self> {
        Self::new(Letter::from_char(letter)?, octave, accidental.parse()?)
    }

    /// Create the note for a MIDI number, spelled with naturals and sharps
    pub fn from_midi_number(number: i32) -> Result<Self> {
        if !(0..=MAX_MIDI).contains(&number) {
            return Err(Error::invalid(format!(
                "MIDI note number must be in [0, {}], got {}",
                MAX_MIDI, number
            )));
        }

        let (letter, accidental) = match number % 12 {
            0 => (Letter::C, Accidental::Natural),
            1 => (Letter::C, Accidental::Sharp),
            2 => (Letter::D, Accidental::Natural),
            3 => (Letter::D, Accidental::Sharp),
            4 => (Letter::E, Accidental::Natural),
            5 => (Letter::F, Accidental::Natural),
            6 => (Letter::F, Accidental::Sharp),
            7 => (Letter::G, Accidental::Natural),
            8 => (Letter::G, Accidental::Sharp),
            9 => (Letter::A, Accidental::Natural),
            10 => (Letter::A, Accidental::Sharp),
            _ => (Letter::B, Accidental::Natural),
        };

        Self::new(letter, number / 12 - 1, accidental)
    }

    /// Pitch letter
    pub fn letter(&self) -> Letter {
        self.letter
    }

    /// Octave (scientific pitch notation, middle C is C4)
    pub fn octave(&self) -> i32 {
        i32::from(self.octave)
    }

    /// Accidental
    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    /// MIDI note number (middle C = 60)
    pub fn midi_note_number(&self) -> MidiNote {
        // Range checked on construction
        midi_number_of(self.letter, self.octave(), self.accidental) as MidiNote
    }

    /// True if both notes sound the same pitch
    pub fn is_enharmonic(&self, other: &Note) -> bool {
        self.midi_note_number() == other.midi_note_number()
    }

    /// The same spelling moved by whole octaves
    pub fn shift_octaves(&self, octaves: i32) -> Result<Note> {
        Note::new(self.letter, self.octave() + octaves, self.accidental)
    }

    /// Add an ascending interval, spelling the result correctly
    pub fn add_interval(&self, interval: &Interval) -> Result<Note> {
        let start = self.letter.index();
        let target_index = (start + interval.letter_steps()) % 7;
        let letter = Letter::ALL[target_index];

        // Passing B into C moves into the next octave
        let wrapped = target_index < start;
        let octave = self.octave() + interval.octaves() as i32 + i32::from(wrapped);

        let origin = i32::from(self.midi_note_number());
        let goal = interval.semitones();
        if !(0..=MAX_MIDI).contains(&(origin + goal)) {
            return Err(Error::invalid(format!(
                "{} + {} is outside the MIDI range",
                self, interval
            )));
        }

        for accidental in Accidental::SEARCH_ORDER {
            let Ok(candidate) = Note::new(letter, octave, accidental) else {
                continue;
            };
            let diff = i32::from(candidate.midi_note_number()) - origin;
            trace!(%candidate, diff, goal, "accidental candidate");
            if diff == goal {
                return Ok(candidate);
            }
        }

        error!(note = %self, %interval, goal, "no accidental spells interval");
        Err(Error::Internal(format!(
            "could not complete note + interval operation: {} + {}",
            self, interval
        )))
    }
}

fn midi_number_of(letter: Letter, octave: i32, accidental: Accidental) -> i32 {
    (octave + 1) * 12 + letter.semitones() + accidental.offset()
}

impl Ord for Note {
    /// Sounding pitch first; enharmonic spellings by octave, then letter
    fn cmp(&self, other: &Self) -> Ordering {
        self.midi_note_number()
            .cmp(&other.midi_note_number())
            .then_with(|| self.octave.cmp(&other.octave))
            .then_with(|| self.letter.cmp(&other.letter))
    }
}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.letter, self.octave, self.accidental)
    }
}

/// Split a note string into letter, signed octave digits and accidental
fn tokenize(s: &str) -> Result<(char, &str, &str)> {
    let mut chars = s.chars();
    let letter = chars
        .next()
        .ok_or_else(|| Error::invalid("empty note string"))?;
    let rest = chars.as_str();

    let sign = usize::from(rest.starts_with('-'));
    let digits = rest[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(Error::invalid(format!("missing octave in note '{}'", s)));
    }

    let (octave, accidental) = rest.split_at(sign + digits);
    Ok((letter, octave, accidental))
}

impl FromStr for Note {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (letter, octave, accidental) = tokenize(s)?;
        let octave: i32 = octave
            .parse()
            .map_err(|_| Error::invalid(format!("invalid octave in note '{}'", s)))?;
        Note::from_parts(letter, octave, accidental)
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A note or a rest
///
/// Rests have no pitch, so every comparison involving one fails with
/// [`Error::Incomparable`].
#[derive(Debug, Clone, Copy, Hash)]
pub enum Event {
    Note(Note),
    Rest,
}

impl Event {
    /// Written form of a rest
    pub const REST: &'static str = "r";

    pub fn is_rest(&self) -> bool {
        matches!(self, Event::Rest)
    }

    pub fn as_note(&self) -> Option<&Note> {
        match self {
            Event::Note(note) => Some(note),
            Event::Rest => None,
        }
    }

    /// MIDI note number, or -1 for a rest
    pub fn midi_note_number(&self) -> i32 {
        match self {
            Event::Note(note) => i32::from(note.midi_note_number()),
            Event::Rest => -1,
        }
    }

    fn pitched_pair<'a>(&'a self, other: &'a Event) -> Result<(&'a Note, &'a Note)> {
        match (self, other) {
            (Event::Note(a), Event::Note(b)) => Ok((a, b)),
            _ => Err(Error::Incomparable(format!(
                "cannot compare '{}' with '{}'",
                self, other
            ))),
        }
    }

    /// Exact spelling equality
    pub fn try_eq(&self, other: &Event) -> Result<bool> {
        let (a, b) = self.pitched_pair(other)?;
        Ok(a == b)
    }

    /// Note ordering
    pub fn try_cmp(&self, other: &Event) -> Result<Ordering> {
        let (a, b) = self.pitched_pair(other)?;
        Ok(a.cmp(b))
    }

    /// Same sounding pitch
    pub fn is_enharmonic(&self, other: &Event) -> Result<bool> {
        let (a, b) = self.pitched_pair(other)?;
        Ok(a.is_enharmonic(b))
    }
}

impl From<Note> for Event {
    fn from(note: Note) -> Self {
        Event::Note(note)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Note(note) => write!(f, "{}", note),
            Event::Rest => f.write_str(Event::REST),
        }
    }
}

impl FromStr for Event {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == Event::REST {
            Ok(Event::Rest)
        } else {
            s.parse().map(Event::Note)
        }
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::interval::Quality;

    fn n(s: &str) -> Note {
        s.parse().unwrap()
    }

    fn iv(s: &str) -> Interval {
        s.parse().unwrap()
    }

    fn add(note: &str, interval: &str) -> String {
        n(note).add_interval(&iv(interval)).unwrap().to_string()
    }

    #[test]
    fn test_manual_creation() {
        let note = Note::from_parts('b', 4, "B").unwrap();
        assert_eq!(note.letter(), Letter::B);
        assert_eq!(note.octave(), 4);
        assert_eq!(note.accidental(), Accidental::Flat);

        let note = Note::natural(Letter::C, -1).unwrap();
        assert_eq!(note.accidental(), Accidental::Natural);
        assert_eq!(note.midi_note_number(), 0);
    }

    #[test]
    fn test_creation_errors() {
        assert!(Note::from_parts('X', 4, "bb").is_err());
        assert!(Note::from_parts('A', 10, "##").is_err());
        assert!(Note::from_parts('A', -2, "").is_err());
        assert!(Note::from_parts('A', 4, "*").is_err());
        // A9b would be MIDI 128
        assert!(matches!(
            Note::from_parts('A', 9, "b"),
            Err(Error::InvalidValue(_))
        ));
        // C-1b would be MIDI -1
        assert!(Note::from_parts('C', -1, "b").is_err());
    }

    #[test]
    fn test_parse() {
        let note = n("A4#");
        assert_eq!(note.letter(), Letter::A);
        assert_eq!(note.octave(), 4);
        assert_eq!(note.accidental(), Accidental::Sharp);

        let note = n("b4b");
        assert_eq!(note.letter(), Letter::B);
        assert_eq!(note.accidental(), Accidental::Flat);

        let note = n("C-1");
        assert_eq!(note.octave(), -1);
        assert_eq!(note.accidental(), Accidental::Natural);

        let note = n("F-1##");
        assert_eq!(note.octave(), -1);
        assert_eq!(note.accidental(), Accidental::DoubleSharp);
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "p4b", "A5.5##", "A10##", "A4*", "C#", "C", "C-", "r", "A9b"] {
            assert!(bad.parse::<Note>().is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn test_display_round_trip() {
        for s in ["C4", "E4b", "G5##", "B0bb", "C-1", "D-1#", "G9"] {
            assert_eq!(n(s).to_string(), s);
        }
        assert_eq!(n("g5B").to_string(), "G5b");
    }

    #[test]
    fn test_midi_numbers() {
        assert_eq!(n("C-1").midi_note_number(), 0);
        assert_eq!(n("C-1#").midi_note_number(), 1);
        assert_eq!(n("D-1b").midi_note_number(), 1);
        assert_eq!(n("E-1").midi_note_number(), 4);
        assert_eq!(n("F-1").midi_note_number(), 5);
        assert_eq!(n("B0b").midi_note_number(), 22);
        assert_eq!(n("C4").midi_note_number(), 60);
        assert_eq!(Note::MIDDLE_C, n("C4"));
        assert_eq!(n("G9").midi_note_number(), 127);
    }

    #[test]
    fn test_from_midi_number() {
        assert_eq!(Note::from_midi_number(0).unwrap(), n("C-1"));
        assert_eq!(Note::from_midi_number(1).unwrap(), n("C-1#"));
        assert_eq!(Note::from_midi_number(60).unwrap(), n("C4"));
        assert_eq!(Note::from_midi_number(70).unwrap(), n("A4#"));
        assert_eq!(Note::from_midi_number(127).unwrap(), n("G9"));
        assert!(Note::from_midi_number(-1).is_err());
        assert!(Note::from_midi_number(128).is_err());
    }

    #[test]
    fn test_midi_round_trip_is_enharmonic() {
        for s in ["E4b", "B5#", "C4bb", "F2##", "G-1b"] {
            let note = n(s);
            let back = Note::from_midi_number(i32::from(note.midi_note_number())).unwrap();
            assert!(back.is_enharmonic(&note), "{} vs {}", back, note);
        }
    }

    #[test]
    fn test_enharmonic() {
        assert!(n("G5##").is_enharmonic(&n("G5##")));
        assert!(n("G5#").is_enharmonic(&n("A5b")));
        assert!(n("B5#").is_enharmonic(&n("C6")));
        assert!(n("G5").is_enharmonic(&n("A5bb")));
        assert!(!n("G5").is_enharmonic(&n("G5b")));
    }

    #[test]
    fn test_equality_is_exact_spelling() {
        assert_eq!(n("G5"), n("G5"));
        assert_ne!(n("C5#"), n("D5b"));
        assert_ne!(n("G5"), n("G4"));
    }

    #[test]
    fn test_ordering() {
        assert!(n("C5") < n("D5"));
        assert!(n("B4") < n("C5"));
        assert!(n("D5") > n("C5"));
        // Enharmonic: same octave, lower letter first
        assert!(n("C5#") < n("D5b"));
        assert!(n("D5b") > n("C5#"));
        // Enharmonic across octaves: lower octave first
        assert!(n("B4#") < n("C5"));
        assert!(n("C5") <= n("C5"));
        assert!(n("C5") >= n("C5"));
        assert!(n("C4b") < n("C4"));
    }

    #[test]
    fn test_simple_addition() {
        assert_eq!(add("C4", "M2"), "D4");
        assert_eq!(add("C4", "P5"), "G4");
        assert_eq!(add("C4", "m3"), "E4b");
        assert_eq!(add("C4", "m7"), "B4b");
        assert_eq!(add("C4", "P1"), "C4");
        assert_eq!(add("C4", "P8"), "C5");
        assert_eq!(add("C4", "aug4"), "F4#");
        assert_eq!(add("C4", "dim5"), "G4b");
        assert_eq!(add("C4", "dim7"), "B4bb");
    }

    #[test]
    fn test_letter_wrap_addition() {
        assert_eq!(add("B4", "m2"), "C5");
        assert_eq!(add("D4", "M7"), "C5#");
        assert_eq!(add("G4", "P4"), "C5");
        assert_eq!(add("A4", "m3"), "C5");
        assert_eq!(add("B4#", "M2"), "C5##");
    }

    #[test]
    fn test_compound_addition() {
        assert_eq!(add("C4", "M10"), "E5");
        assert_eq!(add("C4", "m14"), "B5b");
        assert_eq!(add("C4", "aug13"), "A5#");
        assert_eq!(add("C4", "dim14"), "B5bb");
        assert_eq!(add("C4", "dim8"), "C5b");
        assert_eq!(add("C4", "P15"), "C6");
    }

    #[test]
    fn test_compound_addition_with_letter_wrap() {
        assert_eq!(add("A4", "M10"), "C6#");
        assert_eq!(add("G3", "M9"), "A4");
        assert_eq!(add("B3", "m9"), "C5");
    }

    #[test]
    fn test_addition_near_range_limits() {
        assert_eq!(add("F9", "M2"), "G9");
        // A9 is out of range; the double flat is the only spelling
        assert_eq!(add("G9", "dim2"), "A9bb");
        assert!(matches!(
            n("G9").add_interval(&iv("M2")),
            Err(Error::InvalidValue(_))
        ));
        assert!(n("C-1").add_interval(&iv("dim1")).is_err());
    }

    #[test]
    fn test_huge_interval_is_invalid_not_a_panic() {
        let result = Interval::new(Quality::Perfect, 4_294_967_293)
            .and_then(|interval| n("C4").add_interval(&interval));
        assert!(matches!(result, Err(Error::InvalidValue(_))));

        // Widest interval that still fits
        assert_eq!(add("C-1", "dim76"), "A9bb");
        assert!(matches!(
            n("C4").add_interval(&iv("P75")),
            Err(Error::InvalidValue(_))
        ));
    }

    #[test]
    fn test_unspellable_addition_is_internal_error() {
        // Would need E triple flat
        assert!(matches!(
            n("C4bb").add_interval(&iv("dim3")),
            Err(Error::Internal(_))
        ));
    }

    #[test]
    fn test_addition_does_not_mutate() {
        let c = n("C4");
        let _ = c.add_interval(&iv("M3")).unwrap();
        assert_eq!(c, n("C4"));
    }

    #[test]
    fn test_shift_octaves() {
        assert_eq!(n("E4b").shift_octaves(-1).unwrap(), n("E3b"));
        assert!(n("C-1").shift_octaves(-1).is_err());
    }

    #[test]
    fn test_event_rest() {
        let rest: Event = "r".parse().unwrap();
        assert!(rest.is_rest());
        assert_eq!(rest.midi_note_number(), -1);
        assert_eq!(rest.to_string(), "r");
        assert!(rest.as_note().is_none());
    }

    #[test]
    fn test_event_comparisons() {
        let c: Event = "C5#".parse().unwrap();
        let d: Event = "D5b".parse().unwrap();
        assert_eq!(c.try_eq(&d).unwrap(), false);
        assert_eq!(c.try_eq(&c).unwrap(), true);
        assert_eq!(c.is_enharmonic(&d).unwrap(), true);
        assert_eq!(c.try_cmp(&d).unwrap(), Ordering::Less);
        assert_eq!(c.midi_note_number(), 73);
    }

    #[test]
    fn test_event_rest_is_incomparable() {
        let rest = Event::Rest;
        let note = Event::from(n("C4"));
        assert!(matches!(rest.try_eq(&note), Err(Error::Incomparable(_))));
        assert!(matches!(note.try_cmp(&rest), Err(Error::Incomparable(_))));
        assert!(matches!(rest.is_enharmonic(&rest), Err(Error::Incomparable(_))));
    }

    #[test]
    fn test_serde_as_string() {
        let yaml = serde_yaml::to_string(&n("E4b")).unwrap();
        assert_eq!(yaml.trim(), "E4b");
        let note: Note = serde_yaml::from_str("C-1#").unwrap();
        assert_eq!(note, n("C-1#"));
        let event: Event = serde_yaml::from_str("r").unwrap();
        assert!(event.is_rest());
        assert!(serde_yaml::from_str::<Note>("H4").is_err());
    }
}
