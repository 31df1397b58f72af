//! # Multicarrier DSP Library
//!
//! Polyphase filterbank channelizer for software-defined radio: combine M
//! narrowband symbol streams into one wideband signal, or split a wideband
//! signal back into M critically sampled baseband channels.
//!
//! ## Components
//!
//! - **Prototype design**: Kaiser-windowed sinc or root raised cosine
//! - **Polyphase decomposition**: mode-dependent branch indexing
//! - **Sub-channel filter bank**: M independent stateful FIR branches
//! - **Spectral transform**: M-point inverse FFT (rustfft) or direct DFT
//! - **Channelizer**: block-at-a-time synthesizer / analyzer
//!
//! ## Signal Flow
//!
//! ```text
//! TX: M symbols → IDFT → polyphase branches → ÷M → M wideband samples
//! RX: M wideband samples → reversed polyphase branches → IDFT → M channel samples
//! ```
//!
//! ## Example
//!
//! ```rust
//! use r4w_multicarrier::prelude::*;
//!
//! let config = ChannelizerConfig::new(8, 4, 0.3, FilterKind::RootNyquist, ChannelizerMode::Synthesizer);
//! let mut tx = Channelizer::new(config.clone()).unwrap();
//! let mut rx = Channelizer::new(config.analyzer()).unwrap();
//!
//! // Eight channel streams of 32 symbols each
//! let streams: Vec<Vec<IQSample>> = (0..8)
//!     .map(|k| vec![IQSample::new(k as f64, 0.0); 32])
//!     .collect();
//!
//! let wideband = tx.synthesize_stream(&streams).unwrap();
//! let channels = rx.analyze_stream(&wideband).unwrap();
//! assert_eq!(channels.len(), 8);
//! assert_eq!(channels[0].len(), 32);
//! ```

pub mod config;
pub mod filter_bank;
pub mod filters;
pub mod observe;
pub mod pfb_channelizer;
pub mod transform;
pub mod types;

pub use config::{ChannelizerConfig, ChannelizerMode, FilterKind, TransformBackend};
pub use pfb_channelizer::{Channelizer, ChannelizerState};
pub use types::{DspError, DspResult, IQSample};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ChannelizerConfig, ChannelizerMode, FilterKind, TransformBackend};
    pub use crate::pfb_channelizer::{Channelizer, ChannelizerState};
    pub use crate::types::{DspError, DspResult, IQSample};
}
