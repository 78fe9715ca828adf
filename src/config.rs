//! Configuration for redwire
//!
//! Reply decoding limits and stream timeouts, with sensible defaults.

/// Main configuration for the codec and stream dispatcher
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Decoding Limits
    // -------------------------------------------------------------------------
    /// Largest bulk string accepted in a reply (in bytes)
    pub max_bulk_len: usize,

    /// Largest number of elements accepted in a single array reply
    pub max_array_len: usize,

    /// Deepest nesting of arrays accepted in a reply
    pub max_depth: usize,

    // -------------------------------------------------------------------------
    // Stream Configuration
    // -------------------------------------------------------------------------
    /// Read timeout applied to TCP streams (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Write timeout applied to TCP streams (milliseconds, 0 = none)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bulk_len: 512 * 1024 * 1024, // 512 MB, the server's own limit
            max_array_len: 1024 * 1024,
            max_depth: 32,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
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
    /// Set the largest accepted bulk string (in bytes)
    pub fn max_bulk_len(mut self, len: usize) -> Self {
        self.config.max_bulk_len = len;
        self
    }

    /// Set the largest accepted array length
    pub fn max_array_len(mut self, len: usize) -> Self {
        self.config.max_array_len = len;
        self
    }

    /// Set the deepest accepted array nesting
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Finish building and return the Config
    pub fn build(self) -> Config {
        self.config
    }
}
