// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Settings files.
//!
//! A settings file names a key (tonic and scale) and the parameters for
//! random note generation, stored as YAML:
//!
//! ```yaml
//! key:
//!   tonic: "D4"
//!   scale: "natural minor"
//! random:
//!   low: 48
//!   high: 72
//!   method: normal
//!   rest_probability: 0.1
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::generators::{RandomNoteConfig, RandomNoteGenerator};
use crate::music::{Note, Scale, ScaleType};

/// Root settings document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SettingsFile {
    /// Key used for scale and chord construction
    #[serde(default)]
    pub key: KeyConfig,
    /// Random note generation parameters
    #[serde(default)]
    pub random: RandomNoteConfig,
}

impl SettingsFile {
    /// Load settings from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML settings")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }

    /// Save settings to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write settings file: {:?}", path.as_ref()))
    }

    /// Check that the key resolves and the random ranges are sane
    pub fn validate(&self) -> Result<()> {
        self.key.scale().context("Invalid key")?;
        self.random
            .validate()
            .context("Invalid random note settings")?;
        Ok(())
    }

    /// Create a random note generator from these settings
    pub fn generator(&self) -> Result<RandomNoteGenerator> {
        RandomNoteGenerator::new(self.random.clone()).context("Invalid random note settings")
    }
}

/// Key settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyConfig {
    /// Tonic note (e.g., "C4", "F4#")
    #[serde(default = "default_tonic")]
    pub tonic: Note,
    /// Scale name (e.g., "major", "minor", "dorian")
    #[serde(default = "default_scale")]
    pub scale: String,
}

fn default_tonic() -> Note {
    Note::MIDDLE_C
}
fn default_scale() -> String {
    "major".to_string()
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            tonic: default_tonic(),
            scale: default_scale(),
        }
    }
}

impl KeyConfig {
    /// Resolve the scale type name
    pub fn scale_type(&self) -> Result<ScaleType> {
        self.scale
            .parse::<ScaleType>()
            .with_context(|| format!("Unknown scale '{}'", self.scale))
    }

    /// Build the scale for this key
    pub fn scale(&self) -> Result<Scale> {
        let scale_type = self.scale_type()?;
        Scale::new(self.tonic, scale_type)
            .with_context(|| format!("Cannot build {} {}", self.tonic, scale_type))
    }
}
