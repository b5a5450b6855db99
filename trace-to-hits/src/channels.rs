//! Runs the fixed processing chain over a single channel's waveform:
//! downsample, pedestal subtraction, FIR smoothing, threshold derivation,
//! hit extraction.
use crate::{
    hit_finding::{
        Real,
        detector::{HitDetector, SETTLING_GUARD_TICKS},
        error::HitFindingError,
        fir::fir_filter,
        frugal::frugal_pedestal,
        iqr::iqr_sequence,
    },
    parameters::{AdaptiveThresholdParameters, DetectorSettings, FixedThresholdParameters, Mode},
};
use std::borrow::Cow;
use tpg_common::{Channel, Hit};

#[tracing::instrument(skip_all, fields(channel = channel, num_hits))]
pub(crate) fn find_channel_hits(
    channel: Channel,
    waveform: &[Real],
    settings: &DetectorSettings,
) -> Result<Vec<Hit>, HitFindingError> {
    let hits = match settings.mode {
        Mode::FixedThreshold(parameters) => {
            find_fixed_threshold_hits(channel, waveform, settings, parameters)
        }
        Mode::AdaptiveThreshold(parameters) => {
            find_adaptive_threshold_hits(channel, waveform, settings, parameters)
        }
    }?;
    tracing::Span::current().record("num_hits", hits.len());
    Ok(hits)
}

/// Stride-`factor` decimation. Unit stride borrows the waveform unchanged.
fn downsample(waveform: &[Real], factor: usize) -> Cow<'_, [Real]> {
    if factor == 1 {
        Cow::Borrowed(waveform)
    } else {
        Cow::Owned(waveform.iter().copied().step_by(factor).collect())
    }
}

/// The shared front of the chain: downsample, subtract the adaptive
/// pedestal, then smooth (or pass through when filtering is disabled).
fn filtered_waveform(
    waveform: &[Real],
    settings: &DetectorSettings,
) -> Result<Vec<Real>, HitFindingError> {
    let waveform = downsample(waveform, settings.downsample_factor);
    let pedestal = frugal_pedestal(&waveform, settings.frugal_ncontig)?;
    let pedsub: Vec<Real> = waveform
        .iter()
        .zip(&pedestal)
        .map(|(&sample, &pedestal)| sample - pedestal)
        .collect();
    match settings.filter_taps {
        Some(taps) => fir_filter(&pedsub, taps),
        None => Ok(pedsub),
    }
}

#[tracing::instrument(skip_all, level = "trace")]
fn find_fixed_threshold_hits(
    channel: Channel,
    waveform: &[Real],
    settings: &DetectorSettings,
    parameters: &FixedThresholdParameters,
) -> Result<Vec<Hit>, HitFindingError> {
    let filtered = filtered_waveform(waveform, settings)?;
    let mut detector = HitDetector::new(
        channel,
        settings.detector_unit_id,
        settings.hit_type,
        settings.downsample_factor,
        SETTLING_GUARD_TICKS,
    );
    Ok(filtered
        .iter()
        .enumerate()
        .filter_map(|(tick, &adc)| detector.signal(tick, adc, parameters.threshold))
        .collect())
}

#[tracing::instrument(skip_all, level = "trace")]
fn find_adaptive_threshold_hits(
    channel: Channel,
    waveform: &[Real],
    settings: &DetectorSettings,
    parameters: &AdaptiveThresholdParameters,
) -> Result<Vec<Hit>, HitFindingError> {
    let filtered = filtered_waveform(waveform, settings)?;
    // The threshold band tracks the filtered signal's own pedestal, not the
    // raw waveform's.
    let pedestal = frugal_pedestal(&filtered, settings.frugal_ncontig)?;
    let iqr = iqr_sequence(&filtered, &pedestal, settings.frugal_ncontig)?;
    let mut detector = HitDetector::new(
        channel,
        settings.detector_unit_id,
        settings.hit_type,
        settings.downsample_factor,
        0,
    );
    Ok(filtered
        .iter()
        .zip(&iqr)
        .enumerate()
        .filter_map(|(tick, (&adc, &spread))| {
            detector.signal(tick, adc, parameters.iqr_multiplier * spread)
        })
        .collect())
}
