//! FIR filter primitive with split push/execute
//!
//! The filterbank drives each branch as `push(x)` followed by `execute()`,
//! so the two steps are exposed separately.

use crate::types::{try_filled, DspError, DspResult, IQSample};

/// FIR filter using direct convolution over a circular delay line.
#[derive(Debug, Clone)]
pub struct FirFilter {
    /// Filter coefficients (impulse response)
    coeffs: Vec<f64>,
    /// Delay line, one slot per tap
    delay_line: Vec<IQSample>,
    /// Position of the newest sample in the delay line
    delay_idx: usize,
}

impl FirFilter {
    /// Create a FIR filter, reporting empty taps or allocation failure.
    pub fn try_new(coeffs: Vec<f64>) -> DspResult<Self> {
        if coeffs.is_empty() {
            return Err(DspError::BufferLength {
                expected: 1,
                actual: 0,
            });
        }
        let delay_line = try_filled("FIR delay line", coeffs.len(), IQSample::new(0.0, 0.0))?;
        Ok(Self {
            coeffs,
            delay_line,
            delay_idx: 0,
        })
    }

    /// Push one sample into the delay line, discarding the oldest.
    #[inline]
    pub fn push(&mut self, sample: IQSample) {
        self.delay_idx = (self.delay_idx + 1) % self.delay_line.len();
        self.delay_line[self.delay_idx] = sample;
    }

    /// Dot product of the delay line with the taps (newest sample × tap 0).
    #[inline]
    pub fn execute(&self) -> IQSample {
        let len = self.delay_line.len();
        let mut acc = IQSample::new(0.0, 0.0);
        for (i, &h) in self.coeffs.iter().enumerate() {
            let pos = (self.delay_idx + len - i) % len;
            acc += self.delay_line[pos] * h;
        }
        acc
    }

    /// Zero the delay line.
    pub fn clear(&mut self) {
        self.delay_line.fill(IQSample::new(0.0, 0.0));
        self.delay_idx = 0;
    }

    /// Get the filter coefficients.
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Get the number of taps.
    pub fn num_taps(&self) -> usize {
        self.coeffs.len()
    }
}
