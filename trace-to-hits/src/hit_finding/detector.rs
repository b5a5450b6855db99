use super::Real;
use tpg_common::{Channel, DetectorUnitId, Hit, HitType, Time};

/// Ticks ignored at the start of a waveform in fixed-threshold mode, while
/// the pedestal estimate settles. Adaptive-threshold mode starts at tick 0.
pub(crate) const SETTLING_GUARD_TICKS: usize = 500;

/// Bookkeeping for a run that is currently above threshold.
#[derive(Debug, Clone)]
struct OpenHit {
    start_time: Time,
    time_over_threshold: Time,
    sum_charge: Real,
    charge_history: Vec<(Time, Real)>,
}

/// Two-state run-length detector emitting one [`Hit`] per contiguous
/// above-threshold excursion.
///
/// Times are reported in downsample-scaled ticks: a hit opening at tick `i`
/// of the decimated waveform starts at `i * downsample_factor`, and each
/// tick above threshold contributes `downsample_factor` to the time over
/// threshold. The opening sample contributes its raw charge to the sum;
/// every later sample of the run contributes `charge * downsample_factor`.
#[derive(Debug, Clone)]
pub(crate) struct HitDetector {
    channel: Channel,
    detector_unit_id: DetectorUnitId,
    hit_type: HitType,
    downsample_factor: usize,
    skip_ticks: usize,
    open: Option<OpenHit>,
}

impl HitDetector {
    pub(crate) fn new(
        channel: Channel,
        detector_unit_id: DetectorUnitId,
        hit_type: HitType,
        downsample_factor: usize,
        skip_ticks: usize,
    ) -> Self {
        Self {
            channel,
            detector_unit_id,
            hit_type,
            downsample_factor,
            skip_ticks,
            open: None,
        }
    }

    /// Feeds one filtered sample against its threshold, returning a
    /// finalized hit when a run closes.
    ///
    /// A run still open when the input ends is discarded: the caller stops
    /// feeding samples and drops the detector, and no hit is emitted for the
    /// truncated excursion.
    pub(crate) fn signal(&mut self, tick: usize, adc: Real, threshold: Real) -> Option<Hit> {
        if tick < self.skip_ticks {
            return None;
        }
        let sample_time = (tick * self.downsample_factor) as Time;
        if adc > threshold {
            if let Some(open) = self.open.as_mut() {
                open.charge_history.push((sample_time, adc));
                open.sum_charge += adc * self.downsample_factor as Real;
                open.time_over_threshold += self.downsample_factor as Time;
            } else {
                self.open = Some(OpenHit {
                    start_time: sample_time,
                    time_over_threshold: self.downsample_factor as Time,
                    sum_charge: adc,
                    charge_history: vec![(sample_time, adc)],
                });
            }
            None
        } else {
            self.open.take().map(|open| self.finalize(open))
        }
    }

    fn finalize(&self, open: OpenHit) -> Hit {
        // Strict comparison keeps the first occurrence on ties.
        let mut peak_time = open.start_time;
        let mut peak_charge = Real::NEG_INFINITY;
        for &(time, charge) in &open.charge_history {
            if charge > peak_charge {
                peak_time = time;
                peak_charge = charge;
            }
        }
        Hit {
            channel: self.channel,
            start_time: open.start_time,
            time_over_threshold: open.time_over_threshold,
            peak_time,
            peak_charge,
            sum_charge: open.sum_charge,
            detector_unit_id: self.detector_unit_id,
            hit_type: self.hit_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_detector(
        detector: &mut HitDetector,
        waveform: &[Real],
        threshold: Real,
    ) -> Vec<Hit> {
        waveform
            .iter()
            .enumerate()
            .filter_map(|(tick, &adc)| detector.signal(tick, adc, threshold))
            .collect()
    }

    #[test]
    fn single_plateau() {
        let waveform = [0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 0.0, 0.0];
        let mut detector = HitDetector::new(7, 2, HitType::Pds, 1, 0);
        let hits = run_detector(&mut detector, &waveform, 5.0);

        assert_eq!(
            hits,
            vec![Hit {
                channel: 7,
                start_time: 3,
                time_over_threshold: 3,
                peak_time: 3,
                peak_charge: 10.0,
                sum_charge: 30.0,
                detector_unit_id: 2,
                hit_type: HitType::Pds,
            }]
        );
    }

    #[test]
    fn trailing_run_is_discarded() {
        let waveform = [0.0, 9.0, 0.0, 9.0, 9.0];
        let mut detector = HitDetector::new(0, 0, HitType::Unknown, 1, 0);
        let hits = run_detector(&mut detector, &waveform, 5.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].start_time, 1);
    }

    #[test]
    fn run_closing_on_the_final_tick_is_emitted() {
        let waveform = [0.0, 10.0, 0.0];
        let mut detector = HitDetector::new(0, 0, HitType::Unknown, 1, 0);
        assert_eq!(run_detector(&mut detector, &waveform, 5.0).len(), 1);
    }

    #[test]
    fn sample_equal_to_threshold_closes_the_run() {
        let waveform = [0.0, 10.0, 5.0, 10.0, 10.0];
        let mut detector = HitDetector::new(0, 0, HitType::Unknown, 1, 0);
        let hits = run_detector(&mut detector, &waveform, 5.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].time_over_threshold, 1);
    }

    #[test]
    fn downsample_factor_scales_times_and_charges() {
        // Waveform as seen after stride-2 decimation.
        let waveform = [0.0, 8.0, 8.0, 0.0];
        let mut detector = HitDetector::new(1, 0, HitType::Tpc, 2, 0);
        let hits = run_detector(&mut detector, &waveform, 5.0);

        assert_eq!(
            hits,
            vec![Hit {
                channel: 1,
                start_time: 2,
                time_over_threshold: 4,
                peak_time: 2,
                // The opening sample is unscaled, later samples carry the factor.
                sum_charge: 8.0 + 8.0 * 2.0,
                peak_charge: 8.0,
                detector_unit_id: 0,
                hit_type: HitType::Tpc,
            }]
        );
    }

    #[test]
    fn peak_tie_break_takes_the_first_occurrence() {
        let waveform = [0.0, 7.0, 9.0, 9.0, 7.0, 0.0];
        let mut detector = HitDetector::new(0, 0, HitType::Unknown, 1, 0);
        let hits = run_detector(&mut detector, &waveform, 5.0);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].peak_time, 2);
        assert_eq!(hits[0].peak_charge, 9.0);
        assert_eq!(hits[0].start_time, 1);
        assert_eq!(hits[0].time_over_threshold, 4);
        assert_eq!(hits[0].sum_charge, 32.0);
    }

    #[test]
    fn settling_guard_suppresses_early_ticks() {
        let mut waveform = vec![0.0; 600];
        waveform[100] = 10.0;
        waveform[505] = 10.0;
        let mut detector = HitDetector::new(0, 0, HitType::Unknown, 1, SETTLING_GUARD_TICKS);
        let hits = run_detector(&mut detector, &waveform, 5.0);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].start_time, 505);
    }

    #[test]
    fn peak_time_lies_within_the_run() {
        let waveform = [0.0, 6.0, 8.0, 7.0, 9.0, 6.0, 0.0];
        let mut detector = HitDetector::new(0, 0, HitType::Unknown, 1, 0);
        let hits = run_detector(&mut detector, &waveform, 5.0);

        assert_eq!(hits.len(), 1);
        let hit = &hits[0];
        assert!(hit.peak_time >= hit.start_time);
        assert!(hit.peak_time < hit.start_time + hit.time_over_threshold);
        assert_eq!(hit.peak_time, 4);
    }
}
