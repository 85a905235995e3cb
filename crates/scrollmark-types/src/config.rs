//! Tracker configuration.
//!
//! Configuration is static: it is read once, validated into [`Milestones`],
//! and never mutated while a tracker runs. Files use a `[tracker]` table:
//!
//! ```toml
//! [tracker]
//! milestones = [25, 50, 75, 100]
//! debounce_ms = 2000
//! track_zero = false
//! dwell = "latch"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollmarkError};

/// Default debounce interval in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u32 = 2000;

/// Default milestone thresholds.
pub const DEFAULT_MILESTONES: [u8; 4] = [25, 50, 75, 100];

/// What happens when a debounce timer expires after the user scrolled back
/// above the pending milestone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DwellPolicy {
    /// Confirm anyway. Only a deeper crossing cancels a pending timer.
    #[default]
    Latch,
    /// Withhold the confirmation until a later sample is back at or past
    /// the milestone, then wait a fresh interval.
    Presence,
}

/// Raw tracker settings as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Percent-viewed thresholds, strictly increasing, each 0..=100.
    pub milestones: Vec<u8>,
    /// How long a milestone must stay the deepest one before it is confirmed.
    pub debounce_ms: u32,
    /// Track 0% depth. Requires `0` as the first milestone.
    pub track_zero: bool,
    pub dwell: DwellPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            milestones: DEFAULT_MILESTONES.to_vec(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            track_zero: false,
            dwell: DwellPolicy::Latch,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    tracker: TrackerConfig,
}

impl TrackerConfig {
    /// Parse a config document. `origin` names it in error messages.
    /// A missing `[tracker]` table means defaults.
    pub fn parse(source: &str, origin: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(source)
            .map_err(|e| ScrollmarkError::Config(format!("{origin}: {e}")))?;
        Ok(file.tracker)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Self::parse(source, "tracker config")
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::parse(&source, &path.display().to_string())?;
        log::debug!("Loaded tracker config from {}", path.display());
        Ok(config)
    }

    /// Check the milestone list and normalise it for the track-zero flag.
    pub fn validate(&self) -> Result<Milestones> {
        Milestones::new(&self.milestones, self.track_zero)
    }
}

/// A validated, immutable milestone list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestones {
    values: Vec<u8>,
    track_zero: bool,
}

impl Milestones {
    /// Validate `values` against the track-zero flag.
    ///
    /// With `track_zero` unset, a leading `0` is dropped: zero depth can
    /// never fire in that mode.
    pub fn new(values: &[u8], track_zero: bool) -> Result<Self> {
        if values.is_empty() {
            return Err(ScrollmarkError::Config("milestone list is empty".into()));
        }
        if let Some(&bad) = values.iter().find(|&&v| v > 100) {
            return Err(ScrollmarkError::Config(format!(
                "milestone {bad} is above 100"
            )));
        }
        if let Some(pair) = values.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ScrollmarkError::Config(format!(
                "milestones must be strictly increasing ({} then {})",
                pair[0], pair[1]
            )));
        }
        if track_zero && values[0] != 0 {
            return Err(ScrollmarkError::Config(format!(
                "track_zero requires 0 as the first milestone, found {}",
                values[0]
            )));
        }

        let mut values = values.to_vec();
        if !track_zero && values[0] == 0 {
            log::warn!("Dropping milestone 0: track_zero is off");
            values.remove(0);
            if values.is_empty() {
                return Err(ScrollmarkError::Config(
                    "milestone list is empty once 0 is dropped".into(),
                ));
            }
        }

        Ok(Self { values, track_zero })
    }

    /// Thresholds in ascending order.
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn track_zero(&self) -> bool {
        self.track_zero
    }

    /// Initial value for the deepest/last-confirmed counters.
    ///
    /// `-1` when tracking zero so that a depth of 0 still compares greater.
    pub fn lower_bound(&self) -> i32 {
        if self.track_zero { -1 } else { 0 }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, milestone: u8) -> bool {
        self.values.binary_search(&milestone).is_ok()
    }
}
