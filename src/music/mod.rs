// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory types.
//!
//! This module provides spelled notes, named intervals, scales and chords,
//! and the note + interval arithmetic the rest is built on.

pub mod chord;
pub mod interval;
pub mod note;
pub mod scale;

pub use chord::{Chord, ChordQuality, Degree};
pub use interval::{Interval, Quality};
pub use note::{Accidental, Event, Letter, MidiNote, Note};
pub use scale::{build_scale, Scale, ScaleType};
