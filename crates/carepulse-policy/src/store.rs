//! TOML-backed threshold policy store.
//!
//! `ThresholdStore` reads the operator's `ThresholdPolicy` from a TOML file
//! and implements the `ThresholdSource` trait from carepulse-core.
//!
//! Load rules:
//!
//! 1. No file → `ThresholdPolicy::default()` (not an error).
//! 2. File present → parse; any key missing from the file keeps its default.
//! 3. File present but malformed → `CarePulseError::ConfigError`. The read
//!    path (`ViewAssembler`) turns that into the default policy plus a warning.
//!
//! Updates are read-merge-write: only the keys set in a `ThresholdUpdate` change.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use carepulse_contracts::{
    error::{CarePulseError, CarePulseResult},
    policy::{ThresholdPolicy, ThresholdUpdate},
};
use carepulse_core::traits::ThresholdSource;

/// A `ThresholdSource` that reads a TOML file on every load.
///
/// ```rust,ignore
/// use carepulse_policy::ThresholdStore;
///
/// let store = ThresholdStore::new("data/thresholds.toml");
/// let policy = store.update(&ThresholdUpdate { page_size: Some(25), ..Default::default() })?;
/// ```
#[derive(Debug, Clone)]
pub struct ThresholdStore {
    path: PathBuf,
}

impl ThresholdStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse `s` as a TOML threshold policy.
    ///
    /// Returns `CarePulseError::ConfigError` if the TOML is malformed or a
    /// key has the wrong type.
    pub fn from_toml_str(s: &str) -> CarePulseResult<ThresholdPolicy> {
        toml::from_str(s).map_err(|e| CarePulseError::ConfigError {
            reason: format!("failed to parse threshold TOML: {}", e),
        })
    }

    /// Read the current policy, or the default if the file does not exist.
    pub fn read(&self) -> CarePulseResult<ThresholdPolicy> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no threshold file; using defaults");
            return Ok(ThresholdPolicy::default());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| CarePulseError::ConfigError {
            reason: format!("failed to read threshold file '{}': {}", self.path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Merge `update` into the stored policy, persist it, and return the result.
    ///
    /// Inverted thresholds are saved as given; a warning is logged.
    pub fn update(&self, update: &ThresholdUpdate) -> CarePulseResult<ThresholdPolicy> {
        let current = self.read()?;
        let merged = current.merged(update);

        if !merged.is_ordered() {
            warn!(
                high_threshold = merged.high_threshold,
                medium_threshold = merged.medium_threshold,
                "high threshold is not above medium threshold; Medium will be unreachable"
            );
        }

        self.write(&merged)?;
        info!(
            path = %self.path.display(),
            high_threshold = merged.high_threshold,
            medium_threshold = merged.medium_threshold,
            page_size = merged.page_size,
            "threshold policy saved"
        );
        Ok(merged)
    }

    fn write(&self, policy: &ThresholdPolicy) -> CarePulseResult<()> {
        let contents = toml::to_string_pretty(policy).map_err(|e| CarePulseError::ConfigError {
            reason: format!("failed to serialize threshold policy: {}", e),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CarePulseError::ConfigError {
                reason: format!("failed to create '{}': {}", parent.display(), e),
            })?;
        }

        std::fs::write(&self.path, contents).map_err(|e| CarePulseError::ConfigError {
            reason: format!("failed to write threshold file '{}': {}", self.path.display(), e),
        })
    }
}

impl ThresholdSource for ThresholdStore {
    /// Re-read the file. Nothing is cached between calls.
    fn load(&self) -> CarePulseResult<ThresholdPolicy> {
        self.read()
    }
}
