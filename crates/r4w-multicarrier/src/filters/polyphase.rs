//! Polyphase decomposition of the filterbank prototype
//!
//! Splits the prototype into M sub-filters, one per commutator branch.
//!
//! ```text
//! synthesizer:  branch[i] = [ h[i], h[i+M], h[i+2M], ... ]          (L/M taps)
//! analyzer:     branch[i] = [ 0, h[i+1], h[i+1+M], h[i+1+2M], ... ]  (L/M + 1 taps)
//! ```
//!
//! The leading zero and the one-sample offset on the analyzer side align
//! its output with a conventional heterodyne channelizer. They must stay
//! exactly as written: the analyzer also commutates its branches in reverse
//! order, and the three together fix the output timing.

use crate::config::ChannelizerMode;
use crate::types::{try_filled, DspError, DspResult};

/// Taps per branch for a given mode.
pub fn branch_len(filter_len: usize, num_channels: usize, mode: ChannelizerMode) -> usize {
    let base = filter_len / num_channels;
    match mode {
        ChannelizerMode::Synthesizer => base,
        ChannelizerMode::Analyzer => base + 1,
    }
}

/// Decompose `taps` into `num_channels` polyphase branches.
///
/// `taps` must hold at least `L + 1` samples where `L = 2·m·M` is a
/// multiple of `num_channels`; [`super::prototype::design_prototype`]
/// produces exactly that.
pub fn decompose(
    taps: &[f64],
    num_channels: usize,
    mode: ChannelizerMode,
) -> DspResult<Vec<Vec<f64>>> {
    if num_channels == 0 {
        return Err(DspError::InvalidChannelCount(num_channels));
    }

    let filter_len = taps.len().saturating_sub(1) / num_channels * num_channels;
    if filter_len == 0 {
        return Err(DspError::BufferLength {
            expected: num_channels + 1,
            actual: taps.len(),
        });
    }
    let sub_len = filter_len / num_channels;

    let mut branches = Vec::new();
    branches
        .try_reserve_exact(num_channels)
        .map_err(|_| DspError::ResourceExhausted {
            what: "polyphase branches",
            len: num_channels,
        })?;

    for i in 0..num_channels {
        let mut branch = try_filled("polyphase branch", branch_len(filter_len, num_channels, mode), 0.0)?;
        match mode {
            ChannelizerMode::Synthesizer => {
                for n in 0..sub_len {
                    branch[n] = taps[i + n * num_channels];
                }
            }
            ChannelizerMode::Analyzer => {
                branch[0] = 0.0;
                for n in 0..sub_len {
                    branch[n + 1] = taps[i + 1 + n * num_channels];
                }
            }
        }
        branches.push(branch);
    }

    Ok(branches)
}
