use thiserror::Error;

/// Malformed input encountered while processing a single channel.
///
/// A failure aborts that channel's result only; other channels are
/// unaffected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum HitFindingError {
    #[error("waveform is empty")]
    EmptyWaveform,

    #[error("pedestal length {pedestal} does not match waveform length {waveform}")]
    LengthMismatch { waveform: usize, pedestal: usize },

    #[error("FIR filtering requires at least one tap")]
    NoFilterTaps,
}

/// Inconsistent configuration, rejected before any channel is processed.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ConfigError {
    #[error("downsample factor must be a positive integer")]
    ZeroDownsampleFactor,

    #[error("filtering is enabled but the filter tap sequence is empty")]
    EmptyFilterTaps,
}
