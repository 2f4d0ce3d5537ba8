// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene-wide grid configuration

use crate::error::{self, require_positive};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file looked up by [`GridConfig::load`]
pub const CONFIG_FILE: &str = "orthocrop.toml";

/// Grid settings shared by every object in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// World-unit length of one block
    pub block_size: f64,
    /// Ortho scale at which blocks have their full resolution
    pub reference_ortho_scale: f64,
    /// Move the object's origin to the center of its bounds on extraction
    pub set_origin_on_extract: bool,
    /// Recalculate Width/Height even when already present
    pub overwrite_on_extract: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            block_size: 0.1,
            reference_ortho_scale: 6.0,
            set_origin_on_extract: true,
            overwrite_on_extract: true,
        }
    }
}

impl GridConfig {
    pub fn new(block_size: f64, reference_ortho_scale: f64) -> Self {
        Self {
            block_size,
            reference_ortho_scale,
            ..Self::default()
        }
    }

    /// Reject values that would divide by zero further down
    pub fn validate(&self) -> error::Result<()> {
        require_positive("block_size", self.block_size)?;
        require_positive("reference_ortho_scale", self.reference_ortho_scale)?;
        Ok(())
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: GridConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `orthocrop.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate().context("Invalid configuration after environment overrides")?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("ORTHOCROP_BLOCK_SIZE") {
            self.block_size = value
                .parse()
                .with_context(|| format!("ORTHOCROP_BLOCK_SIZE is not a number: {value}"))?;
        }

        if let Ok(value) = std::env::var("ORTHOCROP_REFERENCE_ORTHO_SCALE") {
            self.reference_ortho_scale = value.parse().with_context(|| {
                format!("ORTHOCROP_REFERENCE_ORTHO_SCALE is not a number: {value}")
            })?;
        }

        if let Ok(value) = std::env::var("ORTHOCROP_SET_ORIGIN") {
            self.set_origin_on_extract = value.parse().unwrap_or(self.set_origin_on_extract);
        }

        if let Ok(value) = std::env::var("ORTHOCROP_OVERWRITE") {
            self.overwrite_on_extract = value.parse().unwrap_or(self.overwrite_on_extract);
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
