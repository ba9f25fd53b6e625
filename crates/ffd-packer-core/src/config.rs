use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output formats understood by the reporting layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable listing: total bin count, then one line per bin.
    #[default]
    Text,
    /// `{ capacity, lowerBound, binCount, bins: [...] }` via serde_json.
    Json,
    /// User-supplied Handlebars template (rendered by the CLI).
    Template,
}

impl FromStr for ReportFormat {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "template" | "hbs" => Ok(Self::Template),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackerConfig {
    /// Fixed capacity shared by every bin.
    pub capacity: u32,
    /// Open `ceil(sum / capacity)` empty bins before placement starts.
    /// When false every bin is opened on demand; the resulting assignment is the same.
    #[serde(default = "default_seed_lower_bound")]
    pub seed_lower_bound: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            seed_lower_bound: default_seed_lower_bound(),
        }
    }
}

impl PackerConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if the capacity is zero.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::PackError;

        if self.capacity == 0 {
            return Err(PackError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Checks every item against `0 < item <= capacity`.
    ///
    /// Reports the first offending item by its position in `items`.
    pub fn validate_items(&self, items: &[u32]) -> crate::error::Result<()> {
        use crate::error::PackError;

        for (index, &size) in items.iter().enumerate() {
            if size == 0 {
                return Err(PackError::ZeroSizedItem { index });
            }
            if size > self.capacity {
                return Err(PackError::OversizedItem {
                    index,
                    size,
                    capacity: self.capacity,
                });
            }
        }
        Ok(())
    }

    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}

fn default_seed_lower_bound() -> bool {
    true
}

/// Builder for `PackerConfig`.
#[derive(Debug, Clone, Default)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn capacity(mut self, v: u32) -> Self {
        self.cfg.capacity = v;
        self
    }
    pub fn seed_lower_bound(mut self, v: bool) -> Self {
        self.cfg.seed_lower_bound = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}
