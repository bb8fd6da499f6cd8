use std::io::{self, Write};
use std::path::{Path, PathBuf};

use mmcal_lib::{
    coupling_calibration, range_profile, reference_window, waveform_calibration,
    write_context, write_coupling, write_frequency, write_phase_amplitude, CalibrationConfig,
    CalibrationError, ConfigError, CouplingContext, FormatError, FrameDims, PersistenceError,
    RawFrame, WaveformContext, WaveformDataFiles, COUPLING_CONTEXT_FILE, COUPLING_DATA_FILE,
    FREQUENCY_DATA_FILE, PHASE_AMP_DATA_FILE, WAVEFORM_CONTEXT_FILE,
};
use thiserror::Error;

use crate::cli::{CouplingArgs, WaveformArgs};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("failed to prepare output directory {path}: {source}")]
    OutputDir { path: PathBuf, source: io::Error },
}

const COUPLING_WARNING: &str = "\
Make sure that the input frame provided was recorded
when no target was in reach of the radar sensor.";

const WAVEFORM_WARNING: &str = "\
Make sure that the input frame provided was recorded
with a target (reflector) placed at the reference distance given.";

pub fn run_coupling(args: CouplingArgs) -> Result<(), RunError> {
    if !confirm(COUPLING_WARNING, args.yes) {
        log::info!("No calibration data generated");
        return Ok(());
    }

    let dims = FrameDims {
        ntx: args.num_tx,
        nrx: args.num_rx,
        nchirp: args.num_chirp_loops,
        nsample: args.num_samples,
    };
    let frame = RawFrame::from_file(&args.input, dims)?;
    let coupling = coupling_calibration(&frame);

    let out_dir = prepare_output_dir(args.output, &args.input)?;
    write_coupling(&out_dir.join(COUPLING_DATA_FILE), &coupling)?;
    write_context(
        &out_dir.join(COUPLING_CONTEXT_FILE),
        &CouplingContext {
            ntx: dims.ntx,
            nrx: dims.nrx,
            data: COUPLING_DATA_FILE.into(),
        },
    )?;

    log::info!(
        "Coupling calibration file generated in {}",
        out_dir.display()
    );
    Ok(())
}

pub fn run_waveform(args: WaveformArgs) -> Result<(), RunError> {
    if !confirm(WAVEFORM_WARNING, args.yes) {
        log::info!("No calibration data generated");
        return Ok(());
    }

    let config = CalibrationConfig::from_file(&args.config)?;
    let window = reference_window(
        config.frequency_slope(),
        config.sampling_frequency(),
        config.num_adc_samples,
        args.reference,
    )?;

    let frame = RawFrame::from_file(&args.input, config.dims())?;
    let profile = range_profile(&frame);
    let calibration = waveform_calibration(
        &profile,
        &window,
        args.reference,
        config.sampling_frequency(),
        config.frequency_slope(),
    )?;

    let out_dir = prepare_output_dir(args.output, &args.input)?;
    write_frequency(&out_dir.join(FREQUENCY_DATA_FILE), &calibration.frequency)?;
    write_phase_amplitude(
        &out_dir.join(PHASE_AMP_DATA_FILE),
        &calibration.phase_amplitude,
    )?;
    write_context(
        &out_dir.join(WAVEFORM_CONTEXT_FILE),
        &WaveformContext {
            ntx: config.ntx,
            nrx: config.nrx,
            data: WaveformDataFiles {
                frequency: FREQUENCY_DATA_FILE.into(),
                phase: PHASE_AMP_DATA_FILE.into(),
            },
        },
    )?;

    log::info!(
        "Frequency and phase calibration files generated in {}",
        out_dir.display()
    );
    Ok(())
}

/// Print the operator warning and ask for confirmation, unless `--yes`.
fn confirm(warning: &str, skip: bool) -> bool {
    if skip {
        return true;
    }

    println!("\n{}\n", warning);
    print!("Do you want to continue, Y/N? ");
    io::stdout().flush().expect("Failed to flush stdout");

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim().eq_ignore_ascii_case("y")
}

/// Resolve the output directory and make sure it exists.
///
/// Defaults to a `calibration` directory next to the input frame.
fn prepare_output_dir(output: Option<PathBuf>, input: &Path) -> Result<PathBuf, RunError> {
    let dir = output.unwrap_or_else(|| {
        input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("calibration")
    });
    std::fs::create_dir_all(&dir).map_err(|source| RunError::OutputDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
