//! Edge map output configuration types

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

impl TiffCompression {
    pub(crate) fn to_tiff(self) -> tiff::encoder::Compression {
        use tiff::encoder::Compression;
        use tiff::encoder::compression::DeflateLevel;

        match self {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        }
    }
}

/// Configuration for writing edge maps
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Compression applied to every page
    pub compression: TiffCompression,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
        }
    }
}

impl SinkConfig {
    pub fn builder() -> SinkConfigBuilder {
        SinkConfigBuilder::default()
    }
}

/// Builder for SinkConfig
#[derive(Default)]
pub struct SinkConfigBuilder {
    compression: Option<TiffCompression>,
}

impl SinkConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn build(self) -> SinkConfig {
        let default = SinkConfig::default();
        SinkConfig {
            compression: self.compression.unwrap_or(default.compression),
        }
    }
}
