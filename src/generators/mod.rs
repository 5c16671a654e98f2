// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Random note generation.
//!
//! Every function here takes its random source explicitly; there is no
//! shared default generator. [`RandomNoteGenerator`] owns a seeded
//! [`StdRng`] for callers that want a reproducible stream.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution as _, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::music::note::{Event, Note, MAX_MIDI};

/// How MIDI numbers are drawn from the range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    /// Every number in the range equally likely
    #[default]
    Uniform,
    /// Centered on the middle of the range, three deviations to each end
    Normal,
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Uniform => write!(f, "uniform"),
            Distribution::Normal => write!(f, "normal"),
        }
    }
}

impl FromStr for Distribution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Ok(Distribution::Uniform),
            "normal" | "gaussian" => Ok(Distribution::Normal),
            _ => Err(Error::invalid(format!("unknown distribution '{}'", s))),
        }
    }
}

/// Configuration for random note generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomNoteConfig {
    /// Lowest MIDI number (inclusive)
    #[serde(default = "default_low")]
    pub low: i32,
    /// Highest MIDI number (inclusive)
    #[serde(default = "default_high")]
    pub high: i32,
    /// Sampling method
    #[serde(default)]
    pub method: Distribution,
    /// Chance of a rest instead of a note (0.0 - 1.0)
    #[serde(default)]
    pub rest_probability: f64,
    /// Seed for a reproducible stream
    #[serde(default)]
    pub seed: Option<u64>,
}

// Piano range, A0 to C8
fn default_low() -> i32 {
    21
}
fn default_high() -> i32 {
    108
}

impl Default for RandomNoteConfig {
    fn default() -> Self {
        Self {
            low: default_low(),
            high: default_high(),
            method: Distribution::default(),
            rest_probability: 0.0,
            seed: None,
        }
    }
}

impl RandomNoteConfig {
    /// Check ranges without drawing anything
    pub fn validate(&self) -> Result<()> {
        check_range(self.low, self.high, self.rest_probability)
    }

    /// Draw one event using the given random source
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Event> {
        random_event(self.low, self.high, self.method, self.rest_probability, rng)
    }
}

fn check_range(low: i32, high: i32, rest_probability: f64) -> Result<()> {
    if !(0..=MAX_MIDI).contains(&low) || !(0..=MAX_MIDI).contains(&high) {
        return Err(Error::invalid(format!(
            "MIDI range [{}, {}] must lie within [0, {}]",
            low, high, MAX_MIDI
        )));
    }
    if low > high {
        return Err(Error::invalid(format!(
            "low MIDI number {} is above high {}",
            low, high
        )));
    }
    if !(0.0..=1.0).contains(&rest_probability) {
        return Err(Error::invalid(format!(
            "rest probability must be in [0, 1], got {}",
            rest_probability
        )));
    }
    Ok(())
}

/// Draw a random note or rest
///
/// With probability `rest_probability` the result is a rest. Otherwise a
/// MIDI number in `[low, high]` is drawn and spelled with
/// [`Note::from_midi_number`].
pub fn random_event<R: Rng + ?Sized>(
    low: i32,
    high: i32,
    method: Distribution,
    rest_probability: f64,
    rng: &mut R,
) -> Result<Event> {
    check_range(low, high, rest_probability)?;

    if rng.gen::<f64>() < rest_probability {
        return Ok(Event::Rest);
    }

    let number = match method {
        Distribution::Uniform => rng.gen_range(low..=high),
        Distribution::Normal => {
            let mid = f64::from(low + high) / 2.0;
            let std_dev = (mid - f64::from(low)) / 3.0;
            let normal = Normal::new(mid, std_dev)
                .map_err(|e| Error::invalid(format!("normal distribution: {}", e)))?;
            (normal.sample(rng).round() as i32).clamp(low, high)
        }
    };

    Note::from_midi_number(number).map(Event::Note)
}

/// Random note generator with its own random source
pub struct RandomNoteGenerator {
    config: RandomNoteConfig,
    rng: StdRng,
}

impl RandomNoteGenerator {
    /// Create a generator; seeded from the config when a seed is given
    pub fn new(config: RandomNoteConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Get the configuration
    pub fn config(&self) -> &RandomNoteConfig {
        &self.config
    }

    /// Draw the next event
    pub fn next_event(&mut self) -> Result<Event> {
        let event = self.config.sample(&mut self.rng)?;
        debug!(%event, "generated event");
        Ok(event)
    }

    /// Draw `count` events
    pub fn generate(&mut self, count: usize) -> Result<Vec<Event>> {
        (0..count).map(|_| self.next_event()).collect()
    }
}

impl fmt::Debug for RandomNoteGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomNoteGenerator")
            .field("config", &self.config)
            .finish()
    }
}
