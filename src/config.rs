//! Configuration for respio
//!
//! Limits and buffer sizes shared by [`RespReader`](crate::RespReader) and
//! [`RespWriter`](crate::RespWriter).

/// Codec configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Decoder Limits
    // -------------------------------------------------------------------------
    /// Deepest array nesting the reader accepts.
    /// The top-level array sits at depth 1.
    pub max_nesting_depth: usize,

    /// Largest declared bulk length the reader will allocate for (in bytes)
    pub max_bulk_len: usize,

    // -------------------------------------------------------------------------
    // Buffering
    // -------------------------------------------------------------------------
    /// Capacity of the reader's internal buffer (in bytes)
    pub read_buffer_size: usize,

    /// Capacity of the writer's internal buffer (in bytes)
    pub write_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_nesting_depth: 512,
            max_bulk_len: 512 * 1024 * 1024, // 512 MB
            read_buffer_size: 8 * 1024,
            write_buffer_size: 8 * 1024,
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
    /// Set the maximum array nesting depth
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.config.max_nesting_depth = depth;
        self
    }

    /// Set the maximum bulk length (in bytes)
    pub fn max_bulk_len(mut self, len: usize) -> Self {
        self.config.max_bulk_len = len;
        self
    }

    /// Set the reader buffer capacity (in bytes)
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Set the writer buffer capacity (in bytes)
    pub fn write_buffer_size(mut self, size: usize) -> Self {
        self.config.write_buffer_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
