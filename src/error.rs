// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for note, interval, scale and chord operations.

use thiserror::Error;

/// Errors raised by the music theory types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A value was out of range or not recognized (bad pitch letter,
    /// octave, accidental, interval, scale or chord name, MIDI number)
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Equality, ordering or enharmonic check involving a rest
    #[error("Incomparable operands: {0}")]
    Incomparable(String),

    /// Internal arithmetic error (indicates a bug, never a bad input)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidValue(msg.into())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
