//! Core types for multicarrier signal processing
//!
//! All channelizer paths operate on complex baseband samples in double
//! precision. Filter taps are real-valued.
//!
//! ```text
//!   synthesizer:  M channel symbols ──► [PFB] ──► M wideband samples
//!   analyzer:     M wideband samples ──► [PFB] ──► M channel samples
//! ```

use num_complex::Complex64;

/// A single I/Q sample point
pub type IQSample = Complex64;

/// Result type for DSP operations
pub type DspResult<T> = Result<T, DspError>;

/// Errors that can occur while building or driving a channelizer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DspError {
    #[error("Invalid channel count: {0}. Must be at least 1")]
    InvalidChannelCount(usize),

    #[error("Invalid filter delay: {0}. Must be at least 1 symbol")]
    InvalidFilterDelay(usize),

    #[error("Invalid excess bandwidth: {0}")]
    InvalidExcessBandwidth(f64),

    #[error("Unsupported filter kind: {0}")]
    UnsupportedFilterKind(String),

    #[error("Unsupported channelizer mode: {0}")]
    UnsupportedMode(String),

    #[error("Unsupported transform backend: {0}")]
    UnsupportedTransform(String),

    #[error("Cannot allocate {what} ({len} elements)")]
    ResourceExhausted { what: &'static str, len: usize },

    #[error("Buffer length mismatch: expected {expected}, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    #[error("Operation requires {expected} mode, channelizer is a {actual}")]
    ModeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Failed to read config: {0}")]
    ConfigRead(String),

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),
}

/// Allocate a vector of `len` copies of `value`, reporting allocation
/// failure instead of aborting.
pub(crate) fn try_filled<T: Clone>(what: &'static str, len: usize, value: T) -> DspResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| DspError::ResourceExhausted { what, len })?;
    v.resize(len, value);
    Ok(v)
}

/// Helper functions for working with complex samples
pub mod complex_ops {
    use super::IQSample;

    /// Total energy of a sample buffer.
    pub fn energy(samples: &[IQSample]) -> f64 {
        samples.iter().map(|s| s.norm_sqr()).sum()
    }

    /// Largest absolute difference between two buffers.
    pub fn max_abs_diff(a: &[IQSample], b: &[IQSample]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).norm())
            .fold(0.0, f64::max)
    }
}
