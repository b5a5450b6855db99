//! Loads waveforms from plain text: one waveform per line of
//! whitespace-separated ADC samples, with the line index as the channel
//! identifier.
use crate::hit_finding::Real;
use anyhow::{Context, Result};
use std::{fs, path::Path};
use tpg_common::Channel;

pub(crate) fn load_waveform_file(path: &Path) -> Result<Vec<(Channel, Vec<Real>)>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("cannot read waveform file {}", path.display()))?;
    parse_waveforms(&contents)
}

fn parse_waveforms(contents: &str) -> Result<Vec<(Channel, Vec<Real>)>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let samples = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<Real>().with_context(|| {
                        format!("malformed sample {token:?} on line {}", index + 1)
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok((index as Channel, samples))
        })
        .collect()
}
