use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LimitError};
use crate::field::image::FetchOptions;
use crate::types::{Dimension, Limit};

/// Bounds applied by text fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLimits {
    pub max_length: Limit<usize>,
}

/// Bounds applied by image fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageLimits {
    pub max_width: Limit<Dimension>,
    pub max_height: Limit<Dimension>,
}

impl ImageLimits {
    pub fn new(max_width: Limit<Dimension>, max_height: Limit<Dimension>) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Builds limits from signed sizes where any negative value means unbounded.
    pub fn from_sentinels(max_width: i64, max_height: i64) -> Result<Self, LimitError> {
        Ok(Self {
            max_width: Limit::from_sentinel(max_width)?,
            max_height: Limit::from_sentinel(max_height)?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_width.is_unbounded() && self.max_height.is_unbounded()
    }
}

/// Field settings as read from a TOML document.
///
/// ```toml
/// [text]
/// max_length = 32
///
/// [image]
/// max_width = 640
/// max_height = -1
///
/// [fetch]
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub text: TextLimits,
    pub image: ImageLimits,
    pub fetch: FetchOptions,
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}
