// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note and interval arithmetic with correct Western spelling.
//!
//! ```
//! use harmonia::{Chord, Interval, Note};
//!
//! let c: Note = "C4".parse().unwrap();
//! let m3: Interval = "m3".parse().unwrap();
//! assert_eq!(c.add_interval(&m3).unwrap().to_string(), "E4b");
//!
//! let chord = Chord::build(c, "I", "major", None).unwrap();
//! assert_eq!(chord.to_string(), "C4+E4+G4");
//! ```

pub mod config;
pub mod error;
pub mod generators;
pub mod music;

pub use config::{KeyConfig, SettingsFile};
pub use error::{Error, Result};
pub use generators::{random_event, Distribution, RandomNoteConfig, RandomNoteGenerator};
pub use music::{
    build_scale, Accidental, Chord, ChordQuality, Degree, Event, Interval, Letter, MidiNote, Note,
    Quality, Scale, ScaleType,
};
