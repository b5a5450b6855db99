mod channels;
mod hit_finding;
mod loader;
mod parameters;
mod processing;

use anyhow::Result;
use clap::Parser;
use hit_finding::{Real, save_to_file::SaveToFileFilter};
use parameters::{DetectorSettings, Mode};
use std::path::PathBuf;
use tpg_common::{DetectorUnitId, HitType};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Waveform file: one channel per line, whitespace-separated ADC samples.
    #[clap(long)]
    input: PathBuf,

    /// Where to write the discovered hits, one per line. Defaults to stdout.
    #[clap(long)]
    output: Option<PathBuf>,

    /// Stride by which waveforms are decimated before processing.
    #[clap(long, default_value = "1")]
    downsample_factor: usize,

    /// Number of contiguous one-sided samples before the pedestal estimate steps.
    #[clap(long, default_value = "15")]
    frugal_ncontig: u32,

    /// Whether the pedestal-subtracted signal is FIR-smoothed.
    #[clap(long, default_value_t = true, action = clap::ArgAction::Set)]
    do_filtering: bool,

    /// FIR filter taps, applied unnormalized.
    #[clap(long, value_delimiter = ',', default_value = "1,3,6,9,6,3,1")]
    filter_taps: Vec<Real>,

    /// Detector unit identifier stamped onto every hit.
    #[clap(long, default_value = "0")]
    detector_unit_id: DetectorUnitId,

    /// Hit type stamped onto every hit.
    #[clap(long, value_enum, default_value = "unknown")]
    hit_type: HitType,

    #[command(subcommand)]
    mode: Mode,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let settings = DetectorSettings {
        mode: &cli.mode,
        downsample_factor: cli.downsample_factor,
        frugal_ncontig: cli.frugal_ncontig,
        filter_taps: cli.do_filtering.then_some(cli.filter_taps.as_slice()),
        detector_unit_id: cli.detector_unit_id,
        hit_type: cli.hit_type,
    };
    settings.validate()?;

    let traces = loader::load_waveform_file(&cli.input)?;
    info!(
        "loaded {} channels from {}",
        traces.len(),
        cli.input.display()
    );

    let outcomes = processing::process(&traces, &settings);
    let num_hits: usize = outcomes
        .iter()
        .filter_map(|outcome| outcome.result.as_ref().ok())
        .map(Vec::len)
        .sum();
    info!("hit finding complete, {num_hits} hits found");

    let hits = outcomes
        .iter()
        .filter_map(|outcome| outcome.result.as_ref().ok())
        .flatten();
    match &cli.output {
        Some(path) => hits.save_to_file(path)?,
        None => {
            for hit in hits {
                println!("{hit}");
            }
        }
    }
    Ok(())
}
