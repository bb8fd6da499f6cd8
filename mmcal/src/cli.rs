use clap::{Parser, Subcommand};
use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Log level for output (error, warn, info, debug, trace)
    #[arg(global = true, long, default_value = "info")]
    pub loglevel: LevelFilter,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the coupling calibration matrix from a no-target frame
    Coupling(CouplingArgs),

    /// Generate phase/amplitude and frequency calibration matrices from a
    /// frame with a reflector at a known reference distance
    Waveform(WaveformArgs),
}

#[derive(Parser)]
pub struct CouplingArgs {
    /// Path to the raw frame file to use for the calibration
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory to store the calibration files (default: a `calibration`
    /// directory next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of TX antennas
    #[arg(long, default_value = "12")]
    pub num_tx: usize,

    /// Number of RX antennas
    #[arg(long, default_value = "16")]
    pub num_rx: usize,

    /// Number of chirp loops per frame
    #[arg(long, default_value = "16")]
    pub num_chirp_loops: usize,

    /// Number of ADC samples per chirp
    #[arg(long, default_value = "256")]
    pub num_samples: usize,

    /// Skip the interactive confirmation prompt
    #[arg(short, long, default_value = "false")]
    pub yes: bool,
}

#[derive(Parser)]
pub struct WaveformArgs {
    /// Path to the raw frame file to use for the calibration
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory to store the calibration files (default: a `calibration`
    /// directory next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Calibration configuration file (JSON)
    #[arg(short = 'f', long)]
    pub config: PathBuf,

    /// Distance of the reference target in meters
    #[arg(short, long)]
    pub reference: f64,

    /// Skip the interactive confirmation prompt
    #[arg(short, long, default_value = "false")]
    pub yes: bool,
}
