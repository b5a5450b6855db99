//! Defines the parameters used by the hit-finding pipeline.
use crate::hit_finding::{Real, error::ConfigError};
use clap::{Parser, Subcommand};
use tpg_common::{DetectorUnitId, HitType};

/// Settings shared by every channel of a pipeline run.
#[derive(Debug)]
pub(crate) struct DetectorSettings<'a> {
    /// How the detection threshold is derived.
    pub(crate) mode: &'a Mode,
    /// Stride by which waveforms are decimated before processing.
    pub(crate) downsample_factor: usize,
    /// Run-length gate of the frugal estimators.
    pub(crate) frugal_ncontig: u32,
    /// FIR taps, or `None` when filtering is disabled.
    pub(crate) filter_taps: Option<&'a [Real]>,
    /// Detector unit identifier stamped onto every hit.
    pub(crate) detector_unit_id: DetectorUnitId,
    /// Hit type stamped onto every hit.
    pub(crate) hit_type: HitType,
}

impl DetectorSettings<'_> {
    /// Rejects inconsistent configurations before any channel is processed.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.downsample_factor == 0 {
            return Err(ConfigError::ZeroDownsampleFactor);
        }
        if matches!(self.filter_taps, Some([])) {
            return Err(ConfigError::EmptyFilterTaps);
        }
        Ok(())
    }
}

/// Encapsulates the parameters specific to the fixed-threshold mode.
#[derive(Default, Debug, Clone, Parser)]
pub(crate) struct FixedThresholdParameters {
    /// A hit opens when the filtered signal exceeds this ADC value.
    #[clap(long)]
    pub(crate) threshold: Real,
}

/// Encapsulates the parameters specific to the adaptive-threshold mode.
#[derive(Debug, Clone, Parser)]
pub(crate) struct AdaptiveThresholdParameters {
    /// The per-tick threshold is this multiple of the tracked interquartile spread.
    #[clap(long, default_value = "3")]
    pub(crate) iqr_multiplier: Real,
}

/// Specifies how the detection threshold is derived.
#[derive(Subcommand, Debug)]
pub(crate) enum Mode {
    /// Fixed scalar ADC threshold. Skips the first 500 ticks of each
    /// waveform while the pedestal estimate settles.
    FixedThreshold(FixedThresholdParameters),
    /// Per-tick threshold derived from the filtered signal's own
    /// interquartile spread. Detection starts at tick 0.
    AdaptiveThreshold(AdaptiveThresholdParameters),
}
