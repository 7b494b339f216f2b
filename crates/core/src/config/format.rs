// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config file formats.

use super::ConfigError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Supported config document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Hcl,
}

crate::simple_display! {
    Format {
        Toml => "toml",
        Json => "json",
        Hcl => "hcl",
    }
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Format::Toml),
            Some("json") => Ok(Format::Json),
            Some("hcl") => Ok(Format::Hcl),
            Some(other) => Err(ConfigError::UnsupportedFormat(other.to_string())),
            None => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub(crate) fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, ConfigError> {
        Ok(match self {
            Format::Toml => toml::from_str(content)?,
            Format::Json => serde_json::from_str(content)?,
            Format::Hcl => hcl::from_str(content)?,
        })
    }
}
