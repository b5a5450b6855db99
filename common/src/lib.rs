use clap::ValueEnum;
use std::fmt::{self, Display, Formatter};

/// Sample time in downsample-scaled ticks.
pub type Time = u32;
pub type Channel = u32;
pub type DetectorUnitId = u32;

/// ADC charge after pedestal subtraction and filtering.
pub type Charge = f64;

/// The detector subsystem a hit originates from.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HitType {
    #[default]
    Unknown,
    Tpc,
    Pds,
}

impl Display for HitType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "0",
            Self::Tpc => "1",
            Self::Pds => "2",
        })
    }
}

/// A trigger primitive: one contiguous above-threshold excursion of a
/// filtered waveform, with its timing and charge summary.
///
/// `peak_time` always lies in `[start_time, start_time + time_over_threshold)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub channel: Channel,
    pub start_time: Time,
    pub time_over_threshold: Time,
    pub peak_time: Time,
    pub peak_charge: Charge,
    pub sum_charge: Charge,
    pub detector_unit_id: DetectorUnitId,
    pub hit_type: HitType,
}

impl Display for Hit {
    /// One hit per line: `start_time time_over_threshold peak_time channel
    /// sum_charge peak_charge detector_unit_id type`, charges truncated to
    /// integers.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {}",
            self.start_time,
            self.time_over_threshold,
            self.peak_time,
            self.channel,
            self.sum_charge as i64,
            self.peak_charge as i64,
            self.detector_unit_id,
            self.hit_type,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_line_format() {
        let hit = Hit {
            channel: 7,
            start_time: 3,
            time_over_threshold: 3,
            peak_time: 4,
            peak_charge: 10.9,
            sum_charge: 30.2,
            detector_unit_id: 2,
            hit_type: HitType::Pds,
        };
        assert_eq!(hit.to_string(), "3 3 4 7 30 10 2 2");
    }

    #[test]
    fn hit_type_codes() {
        assert_eq!(HitType::Unknown.to_string(), "0");
        assert_eq!(HitType::Tpc.to_string(), "1");
        assert_eq!(HitType::Pds.to_string(), "2");
    }
}
