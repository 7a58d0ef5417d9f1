//! Configuration for kvconf
//!
//! Centralized configuration with sensible defaults.

/// Default growth increment for the line reader buffer (bytes)
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Configuration for a [`Store`](crate::Store)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Reader Configuration
    // -------------------------------------------------------------------------
    /// Size of the first line buffer, and of every later growth step
    pub chunk_size: usize,

    // -------------------------------------------------------------------------
    // Formatting Configuration
    // -------------------------------------------------------------------------
    /// Fraction digits written by `set_float`.
    /// `None` writes the shortest text that reads back to the same value.
    pub float_precision: Option<usize>,

    // -------------------------------------------------------------------------
    // Limits
    // -------------------------------------------------------------------------
    /// Maximum key length in bytes (`None` = unbounded)
    pub max_key_len: Option<usize>,

    /// Maximum value length in bytes (`None` = unbounded)
    pub max_value_len: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            float_precision: None,
            max_key_len: None,
            max_value_len: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the line reader chunk size (in bytes)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Write floats with a fixed number of fraction digits
    pub fn float_precision(mut self, digits: usize) -> Self {
        self.config.float_precision = Some(digits);
        self
    }

    /// Reject keys longer than `len` bytes
    pub fn max_key_len(mut self, len: usize) -> Self {
        self.config.max_key_len = Some(len);
        self
    }

    /// Reject values longer than `len` bytes
    pub fn max_value_len(mut self, len: usize) -> Self {
        self.config.max_value_len = Some(len);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
