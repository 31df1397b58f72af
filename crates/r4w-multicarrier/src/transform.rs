//! Fixed-size spectral transform used by the filterbank
//!
//! Both channelizer directions use the same M-point **inverse** transform,
//! unnormalized:
//!
//! ```text
//! x[i] = Σ_k X[k] · e^{+j2πik/M}
//! ```
//!
//! The channelizer only sees [`SpectralTransform`]; the backend is picked
//! from [`TransformBackend`] when the channelizer is built.

use rustfft::{Fft, FftPlanner};
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use crate::config::TransformBackend;
use crate::types::{try_filled, DspError, DspResult, IQSample};

/// M-point inverse transform from a frequency buffer into a time buffer.
pub trait SpectralTransform: Send + fmt::Debug {
    /// Transform size M.
    fn size(&self) -> usize;

    /// Inverse-transform `freq` into `time`.
    ///
    /// Both slices must be exactly [`size`](Self::size) long. `freq` is left
    /// untouched.
    fn execute(&mut self, freq: &[IQSample], time: &mut [IQSample]);
}

/// Build the transform for `backend`.
pub fn make_transform(
    backend: TransformBackend,
    size: usize,
) -> DspResult<Box<dyn SpectralTransform>> {
    if size == 0 {
        return Err(DspError::InvalidChannelCount(size));
    }
    Ok(match backend {
        TransformBackend::Fft => Box::new(FftTransform::new(size)?),
        TransformBackend::Dft => Box::new(DftTransform::new(size)?),
    })
}

/// Planned inverse FFT (rustfft).
pub struct FftTransform {
    size: usize,
    fft_inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<IQSample>,
}

impl fmt::Debug for FftTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftTransform")
            .field("size", &self.size)
            .finish()
    }
}

impl FftTransform {
    pub fn new(size: usize) -> DspResult<Self> {
        let mut planner = FftPlanner::new();
        let fft_inverse = planner.plan_fft_inverse(size);
        let scratch = try_filled(
            "FFT scratch",
            fft_inverse.get_inplace_scratch_len(),
            IQSample::new(0.0, 0.0),
        )?;

        Ok(Self {
            size,
            fft_inverse,
            scratch,
        })
    }
}

impl SpectralTransform for FftTransform {
    fn size(&self) -> usize {
        self.size
    }

    fn execute(&mut self, freq: &[IQSample], time: &mut [IQSample]) {
        debug_assert_eq!(freq.len(), self.size);
        debug_assert_eq!(time.len(), self.size);
        time.copy_from_slice(freq);
        self.fft_inverse.process_with_scratch(time, &mut self.scratch);
    }
}

/// Direct inverse DFT with a precomputed twiddle table.
///
/// O(M²) per call; useful as a reference and for very small or prime M.
#[derive(Debug, Clone)]
pub struct DftTransform {
    size: usize,
    /// twiddles[j] = e^{+j2πj/M}
    twiddles: Vec<IQSample>,
}

impl DftTransform {
    pub fn new(size: usize) -> DspResult<Self> {
        let mut twiddles = try_filled("DFT twiddles", size, IQSample::new(0.0, 0.0))?;
        for (j, w) in twiddles.iter_mut().enumerate() {
            let angle = 2.0 * PI * j as f64 / size as f64;
            *w = IQSample::new(angle.cos(), angle.sin());
        }
        Ok(Self { size, twiddles })
    }
}

impl SpectralTransform for DftTransform {
    fn size(&self) -> usize {
        self.size
    }

    fn execute(&mut self, freq: &[IQSample], time: &mut [IQSample]) {
        debug_assert_eq!(freq.len(), self.size);
        debug_assert_eq!(time.len(), self.size);
        let m = self.size;
        for (i, out) in time.iter_mut().enumerate() {
            let mut sum = IQSample::new(0.0, 0.0);
            for (k, &x) in freq.iter().enumerate() {
                sum += x * self.twiddles[(i * k) % m];
            }
            *out = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::complex_ops::max_abs_diff;
    use rand::{Rng, SeedableRng};

    fn c(re: f64, im: f64) -> IQSample {
        IQSample::new(re, im)
    }

    fn random_block(rng: &mut rand::rngs::StdRng, n: usize) -> Vec<IQSample> {
        (0..n)
            .map(|_| c(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect()
    }

    #[test]
    fn test_inverse_of_dc_bin() {
        // Unnormalized: [1, 0, 0, 0] -> [1, 1, 1, 1]
        for backend in [TransformBackend::Fft, TransformBackend::Dft] {
            let mut t = make_transform(backend, 4).unwrap();
            let freq = vec![c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)];
            let mut time = vec![c(0.0, 0.0); 4];
            t.execute(&freq, &mut time);
            for s in &time {
                assert!((s - c(1.0, 0.0)).norm() < 1e-12, "{:?}: {}", backend, s);
            }
        }
    }

    #[test]
    fn test_positive_exponent() {
        // X[1] = 1 gives e^{+j2πi/M}
        let m = 8;
        for backend in [TransformBackend::Fft, TransformBackend::Dft] {
            let mut t = make_transform(backend, m).unwrap();
            let mut freq = vec![c(0.0, 0.0); m];
            freq[1] = c(1.0, 0.0);
            let mut time = vec![c(0.0, 0.0); m];
            t.execute(&freq, &mut time);
            for (i, s) in time.iter().enumerate() {
                let angle = 2.0 * PI * i as f64 / m as f64;
                assert!((s - c(angle.cos(), angle.sin())).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_backends_agree() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for m in [1, 2, 3, 4, 7, 8, 12, 16, 64] {
            let mut fft = make_transform(TransformBackend::Fft, m).unwrap();
            let mut dft = make_transform(TransformBackend::Dft, m).unwrap();
            let freq = random_block(&mut rng, m);
            let mut a = vec![c(0.0, 0.0); m];
            let mut b = vec![c(0.0, 0.0); m];
            fft.execute(&freq, &mut a);
            dft.execute(&freq, &mut b);
            assert!(max_abs_diff(&a, &b) < 1e-9 * m as f64, "M={}", m);
            assert_eq!(fft.size(), m);
            assert_eq!(dft.size(), m);
        }
    }

    #[test]
    fn test_freq_buffer_untouched() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let freq = random_block(&mut rng, 16);
        let copy = freq.clone();
        let mut time = vec![c(0.0, 0.0); 16];
        let mut t = make_transform(TransformBackend::Fft, 16).unwrap();
        t.execute(&freq, &mut time);
        assert_eq!(freq, copy);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(
            make_transform(TransformBackend::Fft, 0).unwrap_err(),
            DspError::InvalidChannelCount(0)
        );
    }
}
