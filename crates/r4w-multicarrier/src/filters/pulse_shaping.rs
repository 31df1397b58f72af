//! Pulse Shaping Filters
//!
//! Tap generators for the two prototype families used by the filterbank.
//!
//! ## Root Raised Cosine (RRC)
//!
//! When RRC is used at both TX and RX, the combined response is a raised
//! cosine, i.e. a Nyquist pulse with zero ISI at symbol-spaced samples.
//!
//! ```text
//! TX: Symbols → Synthesizer (RRC) ─► channel ─► Analyzer (RRC) → Symbols
//!                         ↓
//!               Combined: RC (zero ISI at sample points)
//! ```
//!
//! ## Windowed Sinc
//!
//! A sinc with cutoff `fc` has zero crossings every `1/fc` samples, so with
//! `fc = 1/M` it is itself a Nyquist pulse at M samples per symbol.

use super::windows::kaiser;
use std::f64::consts::{PI, SQRT_2};

/// Normalized sinc: sin(πx)/(πx).
pub fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Kaiser-windowed sinc lowpass, written into `out`.
///
/// `h[n] = sinc(fc·(n − (len−1)/2)) · kaiser(n, len, β)` with `len = out.len()`
///
/// The response is not normalized: the centre tap is exactly 1.
pub fn kaiser_sinc_into(out: &mut [f64], fc: f64, beta: f64) {
    let len = out.len();
    let centre = len.saturating_sub(1) as f64 / 2.0;
    for (n, tap) in out.iter_mut().enumerate() {
        *tap = sinc(fc * (n as f64 - centre)) * kaiser(n, len, beta);
    }
}

/// Root raised cosine taps, written into `out`.
///
/// `out` holds `2·k·m + 1` taps sampled at `k` samples per symbol, spanning
/// `m` symbols either side of the centre, with optional fractional sample
/// offset `dt`. Not normalized; the energy is close to `k`.
///
/// # Arguments
/// - `k`: samples per symbol
/// - `m`: filter delay in symbols
/// - `rolloff`: excess bandwidth β (0 to 1)
/// - `dt`: fractional sample offset
pub fn root_raised_cosine_into(out: &mut [f64], k: usize, m: usize, rolloff: f64, dt: f64) {
    debug_assert_eq!(out.len(), 2 * k * m + 1);
    for (n, tap) in out.iter_mut().enumerate() {
        let z = (n as f64 + dt) / k as f64 - m as f64;
        *tap = rrc_sample(z, rolloff);
    }
}

/// Continuous RRC impulse response at `z` symbol periods from the centre.
fn rrc_sample(z: f64, rolloff: f64) -> f64 {
    if z.abs() < 1e-9 {
        return 1.0 - rolloff + 4.0 * rolloff / PI;
    }

    let four_alpha_z = 4.0 * rolloff * z;
    if rolloff > 0.0 && (four_alpha_z.abs() - 1.0).abs() < 1e-9 {
        // z = ±1/(4β)
        let term1 = (1.0 + 2.0 / PI) * (PI / (4.0 * rolloff)).sin();
        let term2 = (1.0 - 2.0 / PI) * (PI / (4.0 * rolloff)).cos();
        return rolloff / SQRT_2 * (term1 + term2);
    }

    let pi_z = PI * z;
    let num = (pi_z * (1.0 - rolloff)).sin() + four_alpha_z * (pi_z * (1.0 + rolloff)).cos();
    let denom = pi_z * (1.0 - four_alpha_z * four_alpha_z);
    num / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kaiser_sinc(len: usize, fc: f64, beta: f64) -> Vec<f64> {
        let mut h = vec![0.0; len];
        kaiser_sinc_into(&mut h, fc, beta);
        h
    }

    fn root_raised_cosine(k: usize, m: usize, rolloff: f64, dt: f64) -> Vec<f64> {
        let mut h = vec![0.0; 2 * k * m + 1];
        root_raised_cosine_into(&mut h, k, m, rolloff, dt);
        h
    }

    #[test]
    fn test_sinc() {
        assert_eq!(sinc(0.0), 1.0);
        assert!(sinc(1.0).abs() < 1e-15);
        assert!(sinc(-3.0).abs() < 1e-15);
        assert!((sinc(0.5) - 2.0 / PI).abs() < 1e-12);
    }

    #[test]
    fn test_kaiser_sinc_nyquist_zeros() {
        // fc = 1/4: zero crossings every 4 samples away from the centre
        let h = kaiser_sinc(17, 0.25, 0.3);
        assert_eq!(h.len(), 17);
        assert!((h[8] - 1.0).abs() < 1e-12);
        for n in [0usize, 4, 12, 16] {
            assert!(h[n].abs() < 1e-12, "tap {} should be zero: {}", n, h[n]);
        }
        assert!(h[7].abs() > 0.5);
    }

    #[test]
    fn test_kaiser_sinc_symmetric() {
        let h = kaiser_sinc(33, 0.125, 5.0);
        for i in 0..16 {
            assert!((h[i] - h[32 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rrc_length_and_peak() {
        let rolloff = 0.3;
        let h = root_raised_cosine(4, 3, rolloff, 0.0);
        assert_eq!(h.len(), 25);
        let peak = 1.0 - rolloff + 4.0 * rolloff / PI;
        assert!((h[12] - peak).abs() < 1e-12);
        for i in 0..h.len() {
            assert!(h[i].abs() <= peak + 1e-12);
        }
    }

    #[test]
    fn test_rrc_symmetric() {
        let h = root_raised_cosine(8, 4, 0.25, 0.0);
        let n = h.len();
        for i in 0..n / 2 {
            assert!(
                (h[i] - h[n - 1 - i]).abs() < 1e-12,
                "RRC should be symmetric at {}",
                i
            );
        }
    }

    #[test]
    fn test_rrc_singular_point_is_finite() {
        // β = 0.25 puts z = ±1 exactly on the 1/(4β) singularity
        let h = root_raised_cosine(4, 2, 0.25, 0.0);
        assert!(h.iter().all(|t| t.is_finite()));
        let expected = 0.25 / SQRT_2
            * ((1.0 + 2.0 / PI) * (PI / 1.0).sin() + (1.0 - 2.0 / PI) * (PI / 1.0).cos());
        assert!((h[4] - expected).abs() < 1e-12);
        assert!((h[12] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_rrc_energy_near_samples_per_symbol() {
        let k = 8;
        let h = root_raised_cosine(k, 6, 0.3, 0.0);
        let energy: f64 = h.iter().map(|x| x * x).sum();
        assert!(
            (energy - k as f64).abs() < 0.05 * k as f64,
            "RRC energy should be close to k: {}",
            energy
        );
    }

    #[test]
    fn test_rrc_zero_rolloff_is_sinc() {
        let h = root_raised_cosine(4, 2, 0.0, 0.0);
        for (n, tap) in h.iter().enumerate() {
            let z = n as f64 / 4.0 - 2.0;
            assert!((tap - sinc(z)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_generators_overwrite_buffer() {
        // Every slot is written; stale contents never leak through
        let mut h = vec![f64::NAN; 17];
        kaiser_sinc_into(&mut h, 0.25, 0.3);
        assert!(h.iter().all(|t| t.is_finite()));
        assert_eq!(h, kaiser_sinc(17, 0.25, 0.3));

        let mut h = vec![f64::NAN; 25];
        root_raised_cosine_into(&mut h, 4, 3, 0.3, 0.0);
        assert!(h.iter().all(|t| t.is_finite()));
        assert_eq!(h, root_raised_cosine(4, 3, 0.3, 0.0));
    }
}
