//! # Channelizer Configuration
//!
//! A channelizer is fully described by five immutable parameters plus the
//! choice of spectral transform backend:
//!
//! - `num_channels` (M): number of channels / transform size
//! - `filter_delay` (m): prototype half-length in symbols
//! - `excess_bandwidth` (β): Kaiser shape (Nyquist) or roll-off (root-Nyquist)
//! - `filter_kind`: `nyquist` or `root-nyquist`
//! - `mode`: `analyzer` or `synthesizer`
//!
//! ## Example Configuration
//!
//! ```yaml
//! num_channels: 8
//! filter_delay: 4
//! excess_bandwidth: 0.3
//! filter_kind: root-nyquist
//! mode: analyzer
//! transform: fft
//! ```

use crate::types::{DspError, DspResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Prototype filter family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Kaiser-windowed sinc with cutoff 1/M
    Nyquist,
    /// Root-raised-cosine; a TX/RX pair forms a full Nyquist pulse
    RootNyquist,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Nyquist => write!(f, "nyquist"),
            FilterKind::RootNyquist => write!(f, "root-nyquist"),
        }
    }
}

impl FromStr for FilterKind {
    type Err = DspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nyquist" | "kaiser" => Ok(FilterKind::Nyquist),
            "root-nyquist" | "root_nyquist" | "rootnyquist" | "rrc" => Ok(FilterKind::RootNyquist),
            other => Err(DspError::UnsupportedFilterKind(other.to_string())),
        }
    }
}

/// Direction of the filterbank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelizerMode {
    /// One wideband stream in, M channel streams out
    Analyzer,
    /// M channel streams in, one wideband stream out
    Synthesizer,
}

impl ChannelizerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelizerMode::Analyzer => "analyzer",
            ChannelizerMode::Synthesizer => "synthesizer",
        }
    }
}

impl fmt::Display for ChannelizerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelizerMode {
    type Err = DspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analyzer" | "analysis" | "rx" => Ok(ChannelizerMode::Analyzer),
            "synthesizer" | "synthesis" | "tx" => Ok(ChannelizerMode::Synthesizer),
            other => Err(DspError::UnsupportedMode(other.to_string())),
        }
    }
}

/// Spectral transform implementation used by the channelizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformBackend {
    /// Planned FFT (rustfft)
    #[default]
    Fft,
    /// Direct O(M²) DFT with precomputed twiddles
    Dft,
}

impl fmt::Display for TransformBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformBackend::Fft => write!(f, "fft"),
            TransformBackend::Dft => write!(f, "dft"),
        }
    }
}

impl FromStr for TransformBackend {
    type Err = DspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fft" | "rustfft" => Ok(TransformBackend::Fft),
            "dft" | "direct" => Ok(TransformBackend::Dft),
            other => Err(DspError::UnsupportedTransform(other.to_string())),
        }
    }
}

/// Channelizer configuration. Immutable once a channelizer is built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelizerConfig {
    /// Number of channels (M)
    pub num_channels: usize,
    /// Filter delay in symbols (m); prototype spans 2·m·M samples
    pub filter_delay: usize,
    /// Excess bandwidth / window shape (β)
    pub excess_bandwidth: f64,
    /// Prototype filter family
    pub filter_kind: FilterKind,
    /// Analyzer or synthesizer
    pub mode: ChannelizerMode,
    /// Spectral transform backend
    #[serde(default)]
    pub transform: TransformBackend,
}

impl Default for ChannelizerConfig {
    fn default() -> Self {
        Self {
            num_channels: 4,
            filter_delay: 2,
            excess_bandwidth: 0.3,
            filter_kind: FilterKind::Nyquist,
            mode: ChannelizerMode::Synthesizer,
            transform: TransformBackend::Fft,
        }
    }
}

impl ChannelizerConfig {
    pub fn new(
        num_channels: usize,
        filter_delay: usize,
        excess_bandwidth: f64,
        filter_kind: FilterKind,
        mode: ChannelizerMode,
    ) -> Self {
        Self {
            num_channels,
            filter_delay,
            excess_bandwidth,
            filter_kind,
            mode,
            transform: TransformBackend::default(),
        }
    }

    /// Select the spectral transform backend.
    pub fn with_transform(mut self, transform: TransformBackend) -> Self {
        self.transform = transform;
        self
    }

    /// Same parameters, analyzer direction.
    pub fn analyzer(&self) -> Self {
        Self {
            mode: ChannelizerMode::Analyzer,
            ..self.clone()
        }
    }

    /// Same parameters, synthesizer direction.
    pub fn synthesizer(&self) -> Self {
        Self {
            mode: ChannelizerMode::Synthesizer,
            ..self.clone()
        }
    }

    /// Nominal prototype length L = 2·m·M.
    ///
    /// Returns `None` on arithmetic overflow.
    pub fn filter_len(&self) -> Option<usize> {
        self.filter_delay
            .checked_mul(self.num_channels)
            .and_then(|n| n.checked_mul(2))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> DspResult<()> {
        if self.num_channels == 0 {
            return Err(DspError::InvalidChannelCount(self.num_channels));
        }

        if self.filter_delay < 1 {
            return Err(DspError::InvalidFilterDelay(self.filter_delay));
        }

        let beta = self.excess_bandwidth;
        if !beta.is_finite() || beta < 0.0 {
            return Err(DspError::InvalidExcessBandwidth(beta));
        }
        if self.filter_kind == FilterKind::RootNyquist && beta > 1.0 {
            return Err(DspError::InvalidExcessBandwidth(beta));
        }

        if self.filter_len().and_then(|n| n.checked_add(1)).is_none() {
            return Err(DspError::ResourceExhausted {
                what: "prototype filter",
                len: usize::MAX,
            });
        }

        Ok(())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> DspResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            tracing::warn!("Cannot read channelizer config {}: {}", path.display(), e);
            DspError::ConfigRead(format!("{}: {}", path.display(), e))
        })?;

        Self::parse(&content)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(yaml: &str) -> DspResult<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| DspError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> DspResult<String> {
        serde_yaml::to_string(self).map_err(|e| DspError::ConfigParse(e.to_string()))
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> DspResult<()> {
        let content = self.to_yaml()?;
        std::fs::write(path, content)
            .map_err(|e| DspError::ConfigRead(format!("{}: {}", path.display(), e)))
    }
}
