//! Prototype filter design for the polyphase filterbank.
//!
//! Both families produce `2·m·M + 1` taps, symmetric about tap `m·M`.
//! The first `L = 2·m·M` taps feed the synthesizer branches; the analyzer
//! branches are offset by one and reach tap `L`.

use super::pulse_shaping::{kaiser_sinc_into, root_raised_cosine_into};
use crate::config::FilterKind;
use crate::types::{try_filled, DspError, DspResult};

/// Design the prototype response for an M-channel filterbank.
///
/// Pure function of its inputs. Fails only on `m < 1`, `M = 0` or a
/// length that does not fit in memory.
pub fn design_prototype(
    num_channels: usize,
    filter_delay: usize,
    beta: f64,
    kind: FilterKind,
) -> DspResult<Vec<f64>> {
    if num_channels == 0 {
        return Err(DspError::InvalidChannelCount(num_channels));
    }
    if filter_delay < 1 {
        return Err(DspError::InvalidFilterDelay(filter_delay));
    }

    let len = prototype_len(num_channels, filter_delay)?;
    // The only allocation; the generators fill it in place
    let mut taps = try_filled("prototype filter", len, 0.0)?;

    match kind {
        FilterKind::Nyquist => kaiser_sinc_into(&mut taps, 1.0 / num_channels as f64, beta),
        FilterKind::RootNyquist => {
            root_raised_cosine_into(&mut taps, num_channels, filter_delay, beta, 0.0)
        }
    }

    Ok(taps)
}

/// Number of taps produced by [`design_prototype`]: `2·m·M + 1`.
pub fn prototype_len(num_channels: usize, filter_delay: usize) -> DspResult<usize> {
    num_channels
        .checked_mul(filter_delay)
        .and_then(|n| n.checked_mul(2))
        .and_then(|n| n.checked_add(1))
        .ok_or(DspError::ResourceExhausted {
            what: "prototype filter",
            len: usize::MAX,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prototype_length() {
        for kind in [FilterKind::Nyquist, FilterKind::RootNyquist] {
            for (m_ch, delay) in [(1, 1), (4, 2), (8, 3), (16, 4)] {
                let h = design_prototype(m_ch, delay, 0.3, kind).unwrap();
                assert_eq!(h.len(), 2 * m_ch * delay + 1, "{:?} M={} m={}", kind, m_ch, delay);
            }
        }
    }

    #[test]
    fn test_prototype_deterministic() {
        let a = design_prototype(8, 3, 0.4, FilterKind::RootNyquist).unwrap();
        let b = design_prototype(8, 3, 0.4, FilterKind::RootNyquist).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nyquist_prototype_zero_crossings() {
        let (m_ch, delay) = (4, 2);
        let h = design_prototype(m_ch, delay, 0.3, FilterKind::Nyquist).unwrap();
        let centre = m_ch * delay;
        assert!((h[centre] - 1.0).abs() < 1e-12);
        for k in 1..=delay {
            assert!(h[centre + k * m_ch].abs() < 1e-12);
            assert!(h[centre - k * m_ch].abs() < 1e-12);
        }
    }

    #[test]
    fn test_prototype_symmetric() {
        for kind in [FilterKind::Nyquist, FilterKind::RootNyquist] {
            let h = design_prototype(8, 4, 0.3, kind).unwrap();
            let n = h.len();
            for i in 0..n / 2 {
                assert!((h[i] - h[n - 1 - i]).abs() < 1e-12, "{:?} tap {}", kind, i);
            }
        }
    }

    #[test]
    fn test_prototype_energy_near_channel_count() {
        // Both families carry roughly M energy so a matched pair has unity gain
        for kind in [FilterKind::Nyquist, FilterKind::RootNyquist] {
            let h = design_prototype(8, 4, 0.3, kind).unwrap();
            let energy: f64 = h.iter().map(|x| x * x).sum();
            assert!(
                (energy / 8.0 - 1.0).abs() < 0.1,
                "{:?} energy/M = {}",
                kind,
                energy / 8.0
            );
        }
    }

    #[test]
    fn test_design_rejects_zero_delay() {
        assert_eq!(
            design_prototype(4, 0, 0.3, FilterKind::Nyquist),
            Err(DspError::InvalidFilterDelay(0))
        );
        assert_eq!(
            design_prototype(0, 2, 0.3, FilterKind::RootNyquist),
            Err(DspError::InvalidChannelCount(0))
        );
    }

    #[test]
    fn test_oversized_design_reports_exhaustion() {
        // Length fits in usize but not in memory
        for kind in [FilterKind::Nyquist, FilterKind::RootNyquist] {
            let result = design_prototype(usize::MAX / 8, 1, 0.3, kind);
            assert!(
                matches!(
                    result,
                    Err(DspError::ResourceExhausted {
                        what: "prototype filter",
                        ..
                    })
                ),
                "{:?}: {:?}",
                kind,
                result.map(|h| h.len())
            );
        }
    }

    #[test]
    fn test_prototype_len_overflow() {
        assert!(prototype_len(usize::MAX, 2).is_err());
        assert_eq!(prototype_len(4, 2), Ok(17));
    }
}
