use super::{Real, error::HitFindingError};

/// Causal FIR convolution of the pedestal-subtracted signal.
///
/// `filtered[i] = sum_j source[i - j] * taps[j]`, with indices below zero
/// clamped to zero. The clamp replicates the first sample rather than
/// zero-padding, so the filter warms up against the signal's own edge.
/// Tap weights are applied as given; callers pre-normalize if unit gain is
/// wanted.
pub(crate) fn fir_filter(source: &[Real], taps: &[Real]) -> Result<Vec<Real>, HitFindingError> {
    if taps.is_empty() {
        return Err(HitFindingError::NoFilterTaps);
    }
    Ok((0..source.len())
        .map(|i| {
            taps.iter()
                .enumerate()
                .map(|(j, &tap)| source[i.saturating_sub(j)] * tap)
                .sum()
        })
        .collect())
}
