//! Configuration system
//!
//! Render options and batcher sizing persisted as TOML or RON. Loading never
//! fails from the batcher's point of view: [`EditorRenderConfig::load_or_default`]
//! falls back to defaults and logs why.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::render::RenderOptions;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file, choosing the format by extension
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::of(path)?;
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match format {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file, choosing the format by extension
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Load configuration, falling back to defaults on any error
    fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load_from_file(path).unwrap_or_else(|error| {
            log::warn!("using default configuration, {} unusable: {error}", path.display());
            Self::default()
        })
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Capacity hints for a vertex array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatcherConfig {
    /// Vertices reserved up front
    pub vertex_capacity: usize,
    /// Indices reserved per rebuild, spread across subset kinds
    pub index_capacity: usize,
    /// Largest vertex count a rebuild may produce. Indices are 32-bit, so
    /// this never exceeds `u32::MAX`.
    pub max_vertices: u32,
}

impl Default for BatcherConfig {
    fn default() -> Self {
        Self {
            vertex_capacity: 4096,
            index_capacity: 16384,
            max_vertices: u32::MAX,
        }
    }
}

/// Top-level configuration of the editor's render layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorRenderConfig {
    /// Initial viewport toggles
    pub render_options: RenderOptions,
    /// Vertex array sizing
    pub batcher: BatcherConfig,
}

impl Config for EditorRenderConfig {}
