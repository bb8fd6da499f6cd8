mod cli;
mod run;

use clap::Parser;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    TermLogger::init(
        cli.loglevel,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("Failed to initialize logger");

    let result = match cli.command {
        Commands::Coupling(args) => run::run_coupling(args),
        Commands::Waveform(args) => run::run_waveform(args),
    };

    if let Err(error) = result {
        log::error!("{}", error);
        std::process::exit(1);
    }
}
