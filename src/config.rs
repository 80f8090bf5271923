//! TOML configuration for the inspector.
//!
//! Every field has a default, so an empty file (or no file) is a valid configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use crate::compositor::ProgramDesc;
use crate::foundation::core::SizeEnvelope;
use crate::foundation::error::{InspectError, InspectResult};

/// Debug server connection settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the debug server.
    pub url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Number of most-recent log entries requested from `/log/-N`.
    pub log_lines: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080".to_string(),
            timeout_ms: 5000,
            log_lines: 100,
        }
    }
}

impl ServerConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Image view behavior.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Smallest container width in pixels.
    pub min_size: u32,
    /// Largest container width in pixels.
    pub max_size: u32,
    /// Initial opacity slider position, `0..=100`.
    pub default_opacity: u8,
    /// Quiet period before a window resize re-renders, in milliseconds.
    pub resize_debounce_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_size: 128,
            max_size: 512,
            default_opacity: 50,
            resize_debounce_ms: 500,
        }
    }
}

impl ViewConfig {
    /// Container size envelope.
    pub fn envelope(&self) -> InspectResult<SizeEnvelope> {
        SizeEnvelope::new(self.min_size, self.max_size)
    }

    /// Window resize quiet period.
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

/// Complete inspector configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Debug server connection.
    pub server: ServerConfig,
    /// Image views.
    pub view: ViewConfig,
    /// Checker program parameters.
    pub compositor: ProgramDesc,
}

impl InspectConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> InspectResult<Self> {
        let cfg: Self =
            toml::from_str(s).map_err(|e| InspectError::config(format!("invalid toml: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> InspectResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_toml_str(&contents)
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> InspectResult<String> {
        toml::to_string_pretty(self).map_err(|e| InspectError::serde(e.to_string()))
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> InspectResult<()> {
        if self.server.url.trim().is_empty() {
            return Err(InspectError::config("server.url must not be empty"));
        }
        self.view
            .envelope()
            .map_err(|e| InspectError::config(format!("view size envelope: {e}")))?;
        if self.view.default_opacity > 100 {
            return Err(InspectError::config(
                "view.default_opacity must be within 0..=100",
            ));
        }
        crate::compositor::program::CheckerProgram::compile(&self.compositor)
            .map_err(|e| InspectError::config(format!("compositor: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
