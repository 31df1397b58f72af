//! Polyphase Filterbank (PFB) Channelizer
//!
//! Multiplexes M complex symbol streams into one wideband signal
//! (synthesizer) or splits one wideband signal into M baseband channels
//! (analyzer). Both directions use a polyphase-decomposed prototype filter
//! and one M-point inverse transform per block, so each block costs one
//! transform plus M short FIR evaluations.
//!
//! ```text
//! Synthesizer:
//!   X[0..M] ──► IDFT ──► x[i] ──► branch[i] ──► ÷M ──► y[i]      (i = 0..M)
//!
//! Analyzer:
//!   x[i] ──► branch[M-1-i] ──► X[i]   (i = 0..M) ──► IDFT ──► y[0..M]
//! ```
//!
//! The analyzer commutates its branches in reverse and uses the
//! offset-by-one branch taps from [`crate::filters::polyphase`]. Together
//! these give it the timing of a heterodyne channelizer.
//!
//! ## Channel mapping
//!
//! Both directions use the same unnormalized inverse transform, so the
//! analyzer is mirrored with respect to the synthesizer: analyzer channel
//! `k` carries synthesizer channel `(M - k) mod M`, and a tone at `+k/M`
//! cycles/sample lands in analyzer channel `(M - k) mod M`.
//!
//! ## Example
//!
//! ```rust
//! use r4w_multicarrier::config::{ChannelizerConfig, ChannelizerMode, FilterKind};
//! use r4w_multicarrier::pfb_channelizer::Channelizer;
//! use num_complex::Complex64;
//!
//! let config = ChannelizerConfig::new(4, 2, 0.3, FilterKind::RootNyquist, ChannelizerMode::Synthesizer);
//! let mut synth = Channelizer::new(config.clone()).unwrap();
//! let mut analyzer = Channelizer::new(config.analyzer()).unwrap();
//!
//! let symbols = vec![Complex64::new(1.0, 0.0); 4];
//! let mut wideband = vec![Complex64::new(0.0, 0.0); 4];
//! let mut channels = vec![Complex64::new(0.0, 0.0); 4];
//!
//! synth.execute(&symbols, &mut wideband);
//! analyzer.execute(&wideband, &mut channels);
//! ```

use std::fmt;

use crate::config::{ChannelizerConfig, ChannelizerMode};
use crate::filter_bank::SubchannelFilterBank;
use crate::filters::{decompose, design_prototype};
use crate::transform::{make_transform, SpectralTransform};
use crate::types::{try_filled, DspError, DspResult, IQSample};

/// Operating state of a channelizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelizerState {
    /// Freshly built or reset; all delay lines are zero
    Ready,
    /// At least one block has been executed since the last reset
    Running,
}

/// Critically sampled polyphase filterbank, one direction per instance.
///
/// Not safe for concurrent use of one instance; `execute` takes `&mut self`.
/// Separate instances share nothing and may run on separate threads.
pub struct Channelizer {
    config: ChannelizerConfig,
    /// Designed prototype, `2·m·M + 1` taps
    prototype: Vec<f64>,
    bank: SubchannelFilterBank,
    freq_buf: Vec<IQSample>,
    time_buf: Vec<IQSample>,
    transform: Box<dyn SpectralTransform>,
    state: ChannelizerState,
}

impl fmt::Debug for Channelizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channelizer")
            .field("num_channels", &self.config.num_channels)
            .field("filter_delay", &self.config.filter_delay)
            .field("filter_kind", &self.config.filter_kind)
            .field("mode", &self.config.mode)
            .field("transform", &self.transform)
            .field("state", &self.state)
            .finish()
    }
}

impl Channelizer {
    /// Build a channelizer.
    ///
    /// Fails on an invalid configuration or if any internal buffer cannot be
    /// allocated. Nothing partially built is returned.
    pub fn new(config: ChannelizerConfig) -> DspResult<Self> {
        config.validate()?;
        let m = config.num_channels;

        // FFT planning cannot report allocation failure, so it runs first
        let transform = make_transform(config.transform, m)?;

        let prototype = design_prototype(
            m,
            config.filter_delay,
            config.excess_bandwidth,
            config.filter_kind,
        )?;
        let bank = SubchannelFilterBank::new(decompose(&prototype, m, config.mode)?)?;
        let freq_buf = try_filled("frequency buffer", m, IQSample::new(0.0, 0.0))?;
        let time_buf = try_filled("time buffer", m, IQSample::new(0.0, 0.0))?;

        tracing::debug!(
            num_channels = m,
            filter_delay = config.filter_delay,
            excess_bandwidth = config.excess_bandwidth,
            filter_kind = %config.filter_kind,
            mode = %config.mode,
            transform = %config.transform,
            branch_len = bank.branch_len(),
            "Channelizer created"
        );

        Ok(Self {
            config,
            prototype,
            bank,
            freq_buf,
            time_buf,
            transform,
            state: ChannelizerState::Ready,
        })
    }

    /// Process one block of M samples in the configured direction.
    ///
    /// Synthesizer: `input` holds one symbol per channel, `output` receives M
    /// wideband samples. Analyzer: `input` holds M consecutive wideband
    /// samples, `output` receives one sample per channel.
    ///
    /// Both slices must be exactly M long. This is not checked in release
    /// builds.
    pub fn execute(&mut self, input: &[IQSample], output: &mut [IQSample]) {
        debug_assert_eq!(input.len(), self.config.num_channels);
        debug_assert_eq!(output.len(), self.config.num_channels);

        self.state = ChannelizerState::Running;

        if self.config.num_channels == 1 {
            output.copy_from_slice(input);
            return;
        }

        match self.config.mode {
            ChannelizerMode::Synthesizer => self.synthesize(input, output),
            ChannelizerMode::Analyzer => self.analyze(input, output),
        }
    }

    fn synthesize(&mut self, input: &[IQSample], output: &mut [IQSample]) {
        let m = self.config.num_channels;

        self.freq_buf.copy_from_slice(input);
        self.transform.execute(&self.freq_buf, &mut self.time_buf);

        let scale = m as f64;
        for i in 0..m {
            self.bank.push(i, self.time_buf[i]);
            output[i] = self.bank.execute(i) / scale;
        }
    }

    fn analyze(&mut self, input: &[IQSample], output: &mut [IQSample]) {
        let m = self.config.num_channels;

        // Reverse commutator
        for (i, &x) in input.iter().enumerate() {
            let b = m - 1 - i;
            self.bank.push(b, x);
            self.freq_buf[i] = self.bank.execute(b);
        }

        self.transform.execute(&self.freq_buf, &mut self.time_buf);
        output.copy_from_slice(&self.time_buf);
    }

    /// Run `synthesize` over whole channel streams.
    ///
    /// `channels` must hold M streams of equal length N; the result is the
    /// N·M-sample wideband signal. Filter state carries over between calls.
    pub fn synthesize_stream(&mut self, channels: &[Vec<IQSample>]) -> DspResult<Vec<IQSample>> {
        self.require_mode(ChannelizerMode::Synthesizer)?;
        let m = self.config.num_channels;
        if channels.len() != m {
            return Err(DspError::BufferLength {
                expected: m,
                actual: channels.len(),
            });
        }

        let blocks = channels[0].len();
        if let Some(bad) = channels.iter().find(|c| c.len() != blocks) {
            return Err(DspError::BufferLength {
                expected: blocks,
                actual: bad.len(),
            });
        }

        let mut output = vec![IQSample::new(0.0, 0.0); blocks * m];
        let mut block = vec![IQSample::new(0.0, 0.0); m];
        for (b, out) in output.chunks_exact_mut(m).enumerate() {
            for (k, slot) in block.iter_mut().enumerate() {
                *slot = channels[k][b];
            }
            self.execute(&block, out);
        }

        Ok(output)
    }

    /// Run `analyze` over a wideband stream.
    ///
    /// `input.len()` must be a multiple of M. Returns M channel streams of
    /// `input.len() / M` samples each.
    pub fn analyze_stream(&mut self, input: &[IQSample]) -> DspResult<Vec<Vec<IQSample>>> {
        self.require_mode(ChannelizerMode::Analyzer)?;
        let m = self.config.num_channels;
        if input.len() % m != 0 {
            return Err(DspError::BufferLength {
                expected: input.len().div_ceil(m) * m,
                actual: input.len(),
            });
        }

        let blocks = input.len() / m;
        let mut channels = vec![vec![IQSample::new(0.0, 0.0); blocks]; m];
        let mut out = vec![IQSample::new(0.0, 0.0); m];
        for (b, chunk) in input.chunks_exact(m).enumerate() {
            self.execute(chunk, &mut out);
            for (k, &y) in out.iter().enumerate() {
                channels[k][b] = y;
            }
        }

        Ok(channels)
    }

    fn require_mode(&self, expected: ChannelizerMode) -> DspResult<()> {
        if self.config.mode != expected {
            return Err(DspError::ModeMismatch {
                expected: expected.as_str(),
                actual: self.config.mode.as_str(),
            });
        }
        Ok(())
    }

    /// Clear every branch delay line and return to [`ChannelizerState::Ready`].
    pub fn reset(&mut self) {
        self.bank.clear();
        self.state = ChannelizerState::Ready;
        tracing::trace!(mode = %self.config.mode, "Channelizer reset");
    }

    pub fn state(&self) -> ChannelizerState {
        self.state
    }

    pub fn config(&self) -> &ChannelizerConfig {
        &self.config
    }

    pub fn mode(&self) -> ChannelizerMode {
        self.config.mode
    }

    /// Number of channels (M).
    pub fn num_channels(&self) -> usize {
        self.config.num_channels
    }

    /// Filter delay in symbols (m).
    pub fn filter_delay(&self) -> usize {
        self.config.filter_delay
    }

    /// Delay through this filterbank, in blocks.
    ///
    /// A synthesizer followed by a matched analyzer delays each channel by
    /// the sum of both, `2·m` blocks.
    pub fn group_delay(&self) -> usize {
        self.config.filter_delay
    }

    /// The designed prototype filter.
    pub fn prototype(&self) -> &[f64] {
        &self.prototype
    }

    /// Taps of polyphase branch `index`.
    ///
    /// # Panics
    /// Panics if `index >= num_channels()`.
    pub fn branch_taps(&self, index: usize) -> &[f64] {
        self.bank.branch_taps(index)
    }

    /// Taps per branch: `2m` for a synthesizer, `2m + 1` for an analyzer.
    pub fn branch_len(&self) -> usize {
        self.bank.branch_len()
    }
}

impl Drop for Channelizer {
    fn drop(&mut self) {
        tracing::trace!(
            num_channels = self.config.num_channels,
            mode = %self.config.mode,
            "Channelizer destroyed"
        );
    }
}
