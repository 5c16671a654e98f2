// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chords as ascending collections of notes.
//!
//! Chords can be assembled note by note with [`Chord::add_note`] or built
//! from a key, a scale-degree numeral and a quality with [`Chord::build`].
//! Built chords are diatonic triads: the third and fifth are taken from the
//! parent scale of the quality (major, or harmonic minor).

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::note::{MidiNote, Note};
use super::scale::{Scale, ScaleType};
use crate::error::{Error, Result};

/// Scale-degree numerals I to VIII
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degree {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    VIII,
}

impl Degree {
    /// Zero-based position in a built scale
    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Degree {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "I" => Ok(Degree::I),
            "II" => Ok(Degree::II),
            "III" => Ok(Degree::III),
            "IV" => Ok(Degree::IV),
            "V" => Ok(Degree::V),
            "VI" => Ok(Degree::VI),
            "VII" => Ok(Degree::VII),
            "VIII" => Ok(Degree::VIII),
            _ => Err(Error::invalid(format!("unsupported chord number '{}'", s))),
        }
    }
}

/// Chord quality; selects the parent scale of a built chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
}

impl ChordQuality {
    pub fn scale_type(self) -> ScaleType {
        match self {
            ChordQuality::Major => ScaleType::Major,
            ChordQuality::Minor => ScaleType::HarmonicMinor,
        }
    }
}

impl FromStr for ChordQuality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" | "maj" => Ok(ChordQuality::Major),
            "minor" | "min" => Ok(ChordQuality::Minor),
            _ => Err(Error::invalid(format!("unsupported chord type '{}'", s))),
        }
    }
}

/// Notes played together, lowest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    notes: Vec<Note>,
}

impl Chord {
    /// Create a chord holding a single note
    pub fn new(root: Note) -> Self {
        Self { notes: vec![root] }
    }

    /// Build a triad on a degree of the key of `tonic`
    ///
    /// With a `bass` numeral the chord gets that scale degree added in
    /// front; if its letter is already a chord tone it is dropped an octave.
    pub fn build(tonic: Note, numeral: &str, quality: &str, bass: Option<&str>) -> Result<Self> {
        let degree: Degree = numeral.parse()?;
        let quality: ChordQuality = quality.parse()?;
        let bass = bass.map(str::parse::<Degree>).transpose()?;

        let scale = Scale::new(tonic, quality.scale_type())?;
        let root = degree.index();
        let mut chord = Chord::new(scale_tone(&scale, root)?);
        for step in [2, 4] {
            chord.add_note(scale_tone(&scale, root + step)?);
        }

        if let Some(bass) = bass {
            let mut note = scale_tone(&scale, bass.index())?;
            if chord.notes.iter().any(|n| n.letter() == note.letter()) {
                note = note.shift_octaves(-1)?;
            }
            chord.notes.insert(0, note);
        }

        debug!(%tonic, numeral, ?quality, %chord, "built chord");
        Ok(chord)
    }

    /// Get the lowest note
    pub fn root(&self) -> &Note {
        &self.notes[0]
    }

    /// Get the notes, lowest first
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false: a chord holds at least its root
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// MIDI note numbers of the chord tones, lowest first
    pub fn midi_notes(&self) -> Vec<MidiNote> {
        self.notes.iter().map(Note::midi_note_number).collect()
    }

    /// Insert a note, keeping the notes in ascending order
    ///
    /// A note equal to one already present goes after it.
    pub fn add_note(&mut self, note: Note) {
        if note < self.notes[0] {
            self.notes.insert(0, note);
            return;
        }

        for i in 0..self.notes.len() - 1 {
            if note >= self.notes[i] && note < self.notes[i + 1] {
                self.notes.insert(i + 1, note);
                return;
            }
        }

        self.notes.push(note);
    }
}

/// Scale tone by zero-based index, continuing into the next octave past
/// the top of the scale
fn scale_tone(scale: &Scale, index: usize) -> Result<Note> {
    let degrees = scale.len() - 1;
    let note = scale.notes()[index % degrees];
    note.shift_octaves((index / degrees) as i32)
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, note) in self.notes.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{}", note)?;
        }
        Ok(())
    }
}

impl FromStr for Chord {
    type Err = Error;

    /// Parse `<note>+<note>+...`; notes may be given in any order
    fn from_str(s: &str) -> Result<Self> {
        let mut notes = s.split('+').map(str::parse::<Note>);
        let first = notes
            .next()
            .ok_or_else(|| Error::invalid("empty chord string"))??;

        let mut chord = Chord::new(first);
        for note in notes {
            chord.add_note(note?);
        }
        Ok(chord)
    }
}
