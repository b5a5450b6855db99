use super::{Real, error::HitFindingError};

/// Constant-memory streaming quantile tracker.
///
/// The estimate moves in unit steps, gated by a signed run-length
/// accumulator: each sample above the estimate increments the accumulator,
/// each sample below decrements it, and the estimate steps by one (resetting
/// the accumulator) once the count passes `ncontig` in either direction.
/// Smaller `ncontig` adapts faster but is noisier.
#[derive(Debug, Clone)]
pub(crate) struct FrugalEstimator {
    estimate: Real,
    running_diff: i64,
    ncontig: u32,
}

impl FrugalEstimator {
    pub(crate) fn new(initial: Real, ncontig: u32) -> Self {
        Self {
            estimate: initial,
            running_diff: 0,
            ncontig,
        }
    }

    /// Feeds one sample and returns the updated estimate.
    pub(crate) fn update(&mut self, sample: Real) -> Real {
        if sample > self.estimate {
            self.running_diff += 1;
        }
        if sample < self.estimate {
            self.running_diff -= 1;
        }
        if self.running_diff > i64::from(self.ncontig) {
            self.estimate += 1.0;
            self.running_diff = 0;
        }
        if self.running_diff < -i64::from(self.ncontig) {
            self.estimate -= 1.0;
            self.running_diff = 0;
        }
        self.estimate
    }

    pub(crate) fn estimate(&self) -> Real {
        self.estimate
    }

    #[cfg(test)]
    pub(crate) fn running_diff(&self) -> i64 {
        self.running_diff
    }
}

/// Running median ("pedestal") of a waveform, one value per tick.
///
/// The estimate is seeded with the first sample, which is then fed through
/// the estimator like every other sample. Causal: the value at tick `i`
/// depends only on ticks `0..=i`.
pub(crate) fn frugal_pedestal(
    waveform: &[Real],
    ncontig: u32,
) -> Result<Vec<Real>, HitFindingError> {
    let first = waveform
        .first()
        .copied()
        .ok_or(HitFindingError::EmptyWaveform)?;
    let mut estimator = FrugalEstimator::new(first, ncontig);
    Ok(waveform.iter().map(|&s| estimator.update(s)).collect())
}
