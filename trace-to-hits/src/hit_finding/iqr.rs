use super::{Real, error::HitFindingError, frugal::FrugalEstimator};

/// Per-tick adaptive spread of a waveform around its pedestal.
///
/// Two independent frugal estimators track a lower and an upper quantile
/// band, seeded one ADC count either side of `pedestal[0]`. At each tick the
/// sample feeds the lower estimator if it is below the pedestal, the upper
/// estimator if above, and neither on equality; an estimator retains its
/// previous value on ticks where it is not fed. The returned value at tick
/// `i` is `upper - lower` after that tick's conditional update.
pub(crate) fn iqr_sequence(
    waveform: &[Real],
    pedestal: &[Real],
    ncontig: u32,
) -> Result<Vec<Real>, HitFindingError> {
    if waveform.len() != pedestal.len() {
        return Err(HitFindingError::LengthMismatch {
            waveform: waveform.len(),
            pedestal: pedestal.len(),
        });
    }
    let first = pedestal
        .first()
        .copied()
        .ok_or(HitFindingError::EmptyWaveform)?;
    let mut lower = FrugalEstimator::new(first - 1.0, ncontig);
    let mut upper = FrugalEstimator::new(first + 1.0, ncontig);
    Ok(waveform
        .iter()
        .zip(pedestal)
        .map(|(&sample, &pedestal)| {
            if sample < pedestal {
                lower.update(sample);
            }
            if sample > pedestal {
                upper.update(sample);
            }
            upper.estimate() - lower.estimate()
        })
        .collect())
}
