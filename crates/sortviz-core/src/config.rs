//! Engine configuration and file loading.
//!
//! Config files may be RON, TOML, or JSON; the format is detected from the
//! file extension. Every field has a default, so an empty file is valid.
//!
//! ```toml
//! array_size = 15
//! step_interval_ms = 300
//! default_algorithm = "quick"
//!
//! [value_range]
//! min = 10
//! max = 589
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::algorithms::{Algorithm, SortOptions};
use crate::error::SortError;
use crate::rng::{SimRng, ValueRange};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file has an extension we don't support.
    #[error("unsupported config format: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The file parsed but describes an invalid engine.
    #[error(transparent)]
    Invalid(#[from] SortError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(ConfigError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// EngineConfig
// ===========================================================================

/// Tunables for the run controller and the algorithms it drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Number of bars in a generated array.
    pub array_size: usize,
    /// Bounds for generated bar heights.
    pub value_range: ValueRange,
    /// Minimum delay between step deliveries, in milliseconds.
    pub step_interval_ms: u64,
    /// Emit `Compare` steps in addition to mutations.
    pub emit_compares: bool,
    /// Drop selection/quick sort swaps of an index with itself.
    pub suppress_self_swaps: bool,
    /// Seed for array generation. Seeded from the clock when absent.
    pub seed: Option<u64>,
    /// Algorithm used when none is chosen explicitly.
    pub default_algorithm: Algorithm,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            array_size: 15,
            value_range: ValueRange::default(),
            step_interval_ms: 300,
            emit_compares: false,
            suppress_self_swaps: false,
            seed: None,
            default_algorithm: Algorithm::Bubble,
        }
    }
}

impl EngineConfig {
    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), SortError> {
        if self.array_size == 0 {
            return Err(SortError::invalid("array size must be at least 1"));
        }
        self.value_range.validate()
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn sort_options(&self) -> SortOptions {
        SortOptions {
            emit_compares: self.emit_compares,
            suppress_self_swaps: self.suppress_self_swaps,
        }
    }

    /// Build the generator this config describes.
    pub fn rng(&self) -> SimRng {
        match self.seed {
            Some(seed) => SimRng::new(seed),
            None => SimRng::from_time(),
        }
    }

    /// Parse config text in the given format and validate it.
    pub fn parse(content: &str, format: Format, origin: &Path) -> Result<Self, ConfigError> {
        let parse_err = |detail: String| ConfigError::Parse {
            file: origin.to_path_buf(),
            detail,
        };
        let config: EngineConfig = match format {
            Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Read, parse, and validate a config file.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let config = EngineConfig::parse(&content, format, path)?;
    tracing::debug!(path = %path.display(), ?format, "loaded engine config");
    Ok(config)
}
