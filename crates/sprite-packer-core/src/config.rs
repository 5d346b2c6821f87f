use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// The canvas always starts from the first (largest) rectangle's bounding box;
/// `min_width`/`min_height` raise that starting size. Zero means "no minimum".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackerConfig {
    /// Minimum initial canvas width in pixels.
    #[serde(default)]
    pub min_width: u32,
    /// Minimum initial canvas height in pixels.
    #[serde(default)]
    pub min_height: u32,
}

impl PackerConfig {
    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }

    /// Initial root size for a run whose first rectangle is `w x h`.
    pub fn initial_canvas(&self, w: u32, h: u32) -> (u32, u32) {
        (w.max(self.min_width), h.max(self.min_height))
    }
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn with_min_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.min_width = w;
        self.cfg.min_height = h;
        self
    }
    pub fn min_width(mut self, v: u32) -> Self {
        self.cfg.min_width = v;
        self
    }
    pub fn min_height(mut self, v: u32) -> Self {
        self.cfg.min_height = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}
