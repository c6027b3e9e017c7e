// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Router configuration knobs.
//!
//! All values are plain numbers supplied by the host application. On the wire the cache TTL is
//! expressed in milliseconds (`cache_ttl_ms`); missing fields fall back to
//! [`RouterConfig::default`].

use std::path::Path;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Clearance kept between routed lines and shape outlines.
    pub nudge_distance: f64,
    /// Upper bound for ray extensions cast from corners and connection points.
    pub max_extension: f64,
    /// Cost of a single direction change, in diagram units of length.
    pub bend_penalty: f64,
    #[serde(rename = "cache_ttl_ms", with = "duration_ms")]
    #[schemars(with = "u64")]
    pub cache_ttl: Duration,
    pub cache_max_size: usize,
    /// How far a connection point may sit from a shape outline and still count as attached.
    pub connection_tolerance: f64,
    /// Run the clearance nudging pass after simplification.
    pub refine: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            nudge_distance: 20.0,
            max_extension: 1000.0,
            bend_penalty: 50.0,
            cache_ttl: Duration::from_secs(30),
            cache_max_size: 16,
            connection_tolerance: 1.0,
            refine: false,
        }
    }
}

impl RouterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("nudge_distance", self.nudge_distance),
            ("max_extension", self.max_extension),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("bend_penalty", self.bend_penalty),
            ("connection_tolerance", self.connection_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.cache_max_size == 0 {
            return Err(ConfigError::EmptyCache);
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be a finite non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("cache_max_size must be at least 1")]
    EmptyCache,
    #[error("failed to read router config {path:?}: {source}")]
    Io { path: std::path::PathBuf, source: std::io::Error },
    #[error("invalid router config: {0}")]
    Parse(#[from] serde_json::Error),
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
