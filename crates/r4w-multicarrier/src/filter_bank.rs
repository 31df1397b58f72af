//! Sub-channel filter bank
//!
//! One [`FirFilter`] per polyphase branch, addressed by branch index. Each
//! branch keeps its own delay line; pushing into one never touches another.

use crate::filters::FirFilter;
use crate::types::{DspError, DspResult, IQSample};

/// Array of M independent FIR branches.
#[derive(Debug, Clone)]
pub struct SubchannelFilterBank {
    branches: Vec<FirFilter>,
}

impl SubchannelFilterBank {
    /// Build a bank from per-branch taps. All branches must be the same length.
    pub fn new(branch_taps: Vec<Vec<f64>>) -> DspResult<Self> {
        if branch_taps.is_empty() {
            return Err(DspError::InvalidChannelCount(0));
        }
        let expected = branch_taps[0].len();

        let mut branches = Vec::new();
        branches
            .try_reserve_exact(branch_taps.len())
            .map_err(|_| DspError::ResourceExhausted {
                what: "filter bank",
                len: branch_taps.len(),
            })?;

        for taps in branch_taps {
            if taps.len() != expected {
                return Err(DspError::BufferLength {
                    expected,
                    actual: taps.len(),
                });
            }
            branches.push(FirFilter::try_new(taps)?);
        }

        Ok(Self { branches })
    }

    /// Number of branches (M).
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Taps per branch.
    pub fn branch_len(&self) -> usize {
        self.branches[0].num_taps()
    }

    pub fn branch_taps(&self, index: usize) -> &[f64] {
        self.branches[index].coefficients()
    }

    #[inline]
    pub fn push(&mut self, index: usize, sample: IQSample) {
        self.branches[index].push(sample);
    }

    #[inline]
    pub fn execute(&self, index: usize) -> IQSample {
        self.branches[index].execute()
    }

    /// Zero every branch's delay line.
    pub fn clear(&mut self) {
        for branch in &mut self.branches {
            branch.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> IQSample {
        IQSample::new(re, im)
    }

    #[test]
    fn test_branches_independent() {
        let mut bank =
            SubchannelFilterBank::new(vec![vec![1.0, 1.0], vec![2.0, 0.0], vec![0.0, 3.0]])
                .unwrap();
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.branch_len(), 2);

        bank.push(1, c(1.0, 0.0));
        assert_eq!(bank.execute(0), c(0.0, 0.0));
        assert_eq!(bank.execute(1), c(2.0, 0.0));
        assert_eq!(bank.execute(2), c(0.0, 0.0));

        bank.push(2, c(0.0, 1.0));
        bank.push(2, c(0.0, 0.0));
        assert_eq!(bank.execute(2), c(0.0, 3.0));
        assert_eq!(bank.execute(1), c(2.0, 0.0));
    }

    #[test]
    fn test_clear_all() {
        let mut bank = SubchannelFilterBank::new(vec![vec![1.0]; 4]).unwrap();
        for i in 0..4 {
            bank.push(i, c(i as f64 + 1.0, 0.0));
        }
        bank.clear();
        for i in 0..4 {
            assert_eq!(bank.execute(i), c(0.0, 0.0));
        }
    }

    #[test]
    fn test_rejects_ragged_or_empty() {
        assert!(SubchannelFilterBank::new(vec![]).is_err());
        assert_eq!(
            SubchannelFilterBank::new(vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err(),
            DspError::BufferLength {
                expected: 2,
                actual: 1
            }
        );
        assert!(SubchannelFilterBank::new(vec![vec![]]).is_err());
    }

    #[test]
    fn test_branch_taps() {
        let bank = SubchannelFilterBank::new(vec![vec![0.5, 0.25], vec![0.1, 0.2]]).unwrap();
        assert_eq!(bank.branch_taps(1), &[0.1, 0.2]);
    }
}
