//! Fans the per-channel pipeline out over every channel of a run.
use crate::{
    channels::find_channel_hits,
    hit_finding::{Real, error::HitFindingError},
    parameters::DetectorSettings,
};
use rayon::prelude::*;
use tpg_common::{Channel, Hit};
use tracing::warn;

/// The outcome of one channel's pipeline run.
#[derive(Debug)]
pub(crate) struct ChannelHits {
    pub(crate) channel: Channel,
    pub(crate) result: Result<Vec<Hit>, HitFindingError>,
}

/// Runs the full chain over every `(channel, waveform)` pair.
///
/// Channels share no state, so they are processed in parallel; the returned
/// outcomes keep the input order. A failed channel is reported with its
/// identifier and reason and does not affect the other channels' results.
pub(crate) fn process(
    traces: &[(Channel, Vec<Real>)],
    settings: &DetectorSettings,
) -> Vec<ChannelHits> {
    let outcomes: Vec<ChannelHits> = traces
        .par_iter()
        .map(|(channel, waveform)| ChannelHits {
            channel: *channel,
            result: find_channel_hits(*channel, waveform, settings),
        })
        .collect();

    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            warn!("channel {} failed: {e}", outcome.channel);
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{FixedThresholdParameters, Mode};
    use tpg_common::HitType;

    #[test]
    fn failed_channel_does_not_block_the_others() {
        let plateau = |at: usize| {
            let mut waveform = vec![0.0; 520];
            waveform[at] = 10.0;
            waveform
        };
        let traces = vec![
            (4, plateau(505)),
            (5, Vec::new()),
            (6, plateau(510)),
        ];
        let mode = Mode::FixedThreshold(FixedThresholdParameters { threshold: 5.0 });
        let settings = DetectorSettings {
            mode: &mode,
            downsample_factor: 1,
            frugal_ncontig: 100,
            filter_taps: None,
            detector_unit_id: 0,
            hit_type: HitType::Unknown,
        };

        let outcomes = process(&traces, &settings);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].channel, 4);
        assert_eq!(outcomes[0].result.as_ref().unwrap().len(), 1);
        assert_eq!(
            outcomes[1].result.as_ref().unwrap_err(),
            &HitFindingError::EmptyWaveform
        );
        assert_eq!(outcomes[2].channel, 6);
        assert_eq!(outcomes[2].result.as_ref().unwrap()[0].start_time, 510);
        assert_eq!(outcomes[2].result.as_ref().unwrap()[0].channel, 6);
    }
}
