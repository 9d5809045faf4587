//! Per-clipper feature switches and limits.

use std::error::Error;
use std::fmt;

use nanoserde::{DeRon, SerRon};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config io: {}", e),
            ConfigError::Parse(m) => write!(f, "config parse: {}", m),
            ConfigError::Invalid(m) => write!(f, "invalid config: {}", m),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Handed to [`crate::Clipper::new`]. Nothing here is global, two clippers
/// may run with different settings.
#[derive(Debug, Clone, Copy, PartialEq, SerRon, DeRon)]
pub struct ClipperConfig {
    /// When off every range is visible and adds are ignored
    pub angular_clipping: bool,
    /// When off frustum seeding leaves the clipper untouched
    pub frustum_clipping: bool,
    /// Hard cap on live clip ranges. Past it new ranges are left open.
    pub max_ranges: usize,
    /// Pool slots reserved up front
    pub initial_capacity: usize,
}

impl Default for ClipperConfig {
    fn default() -> Self {
        Self {
            angular_clipping: true,
            frustum_clipping: true,
            max_ranges: 4096,
            initial_capacity: 64,
        }
    }
}

impl ClipperConfig {
    pub fn from_ron(data: &str) -> Result<Self, ConfigError> {
        let config = ClipperConfig::deserialize_ron(data)
            .map_err(|e| ConfigError::Parse(format!("{:?}", e)))?;
        config.validate()
    }

    pub fn to_ron(&self) -> String {
        self.serialize_ron()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_ranges == 0 {
            return Err(ConfigError::Invalid("max_ranges must be at least 1".to_owned()));
        }
        if self.max_ranges > u32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "max_ranges {} does not fit a node index",
                self.max_ranges
            )));
        }
        if self.initial_capacity > self.max_ranges {
            return Err(ConfigError::Invalid(format!(
                "initial_capacity {} exceeds max_ranges {}",
                self.initial_capacity, self.max_ranges
            )));
        }
        Ok(self)
    }
}
