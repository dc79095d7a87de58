//! Traversal parameters shared by every edge walked in one search.

use serde::{Deserialize, Serialize};

/// Errors from loading or validating walk options.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The options document was not valid JSON for `WalkOptions`
    #[error("failed to parse walk options: {0}")]
    Parse(#[from] serde_json::Error),

    /// Walking speed must be a positive, finite number of metres per second
    #[error("walking speed must be positive and finite, got {0}")]
    InvalidWalkingSpeed(f64),

    /// Walking reluctance must be a non-negative, finite multiplier
    #[error("walking reluctance must be non-negative and finite, got {0}")]
    InvalidWalkingReluctance(f64),
}

/// Parameters passed to every `walk`/`walk_back` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// Extra weight charged each time a vehicle is boarded.
    pub transfer_penalty: i64,

    /// Walking speed in metres per second.
    /// Street edges divide their length by this to get a duration.
    pub walking_speed: f64,

    /// Multiplier applied to walking time when charging weight.
    pub walking_reluctance: f64,
}

impl WalkOptions {
    /// Create options with the given parameters, rejecting walking values
    /// that [`validate`](Self::validate) refuses.
    pub fn new(
        transfer_penalty: i64,
        walking_speed: f64,
        walking_reluctance: f64,
    ) -> Result<Self, ConfigError> {
        let options = Self {
            transfer_penalty,
            walking_speed,
            walking_reluctance,
        };
        options.validate()?;
        Ok(options)
    }

    /// Parse options from JSON. Missing fields take their default values.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_edges::WalkOptions;
    ///
    /// let options = WalkOptions::from_json(r#"{"transfer_penalty": 300}"#).unwrap();
    /// assert_eq!(options.transfer_penalty, 300);
    /// assert_eq!(options.walking_speed, 0.85);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that the walking parameters can produce sane durations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.walking_speed.is_finite() && self.walking_speed > 0.0) {
            return Err(ConfigError::InvalidWalkingSpeed(self.walking_speed));
        }
        if !(self.walking_reluctance.is_finite() && self.walking_reluctance >= 0.0) {
            return Err(ConfigError::InvalidWalkingReluctance(
                self.walking_reluctance,
            ));
        }
        Ok(())
    }

    /// Returns the same options with a different transfer penalty.
    pub fn with_transfer_penalty(mut self, transfer_penalty: i64) -> Self {
        self.transfer_penalty = transfer_penalty;
        self
    }
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            transfer_penalty: 0,
            walking_speed: 0.85, // m/s
            walking_reluctance: 1.0,
        }
    }
}
