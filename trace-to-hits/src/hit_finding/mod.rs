//! Converts a single channel's digitized waveform into trigger primitives.
//!
//! The chain is fixed: an adaptive ("frugal") pedestal tracks the baseline
//! and is subtracted, the residual is optionally smoothed by a causal FIR
//! filter, a detection threshold is derived (a fixed scalar, or per tick
//! from a tracked interquartile spread), and contiguous above-threshold
//! excursions are reported as timestamped, charge-integrated hits.

pub(crate) mod detector;
pub(crate) mod error;
pub(crate) mod fir;
pub(crate) mod frugal;
pub(crate) mod iqr;
pub(crate) mod save_to_file;

pub(crate) type Real = f64;
