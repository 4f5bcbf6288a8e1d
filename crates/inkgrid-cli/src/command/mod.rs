use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;

use crate::logger;

use self::{play::PlayArg, reset::ResetArg, stats::StatsArg};

mod play;
mod reset;
mod stats;
mod themes;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Directory holding saved games, records and the log file
    #[arg(long, global = true, default_value = "./data/inkgrid/")]
    data_dir: PathBuf,
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Print lifetime statistics and achievements
    Stats(#[clap(flatten)] StatsArg),
    /// List the available colour themes
    Themes,
    /// Delete the saved game, or every record with `--all`
    Reset(#[clap(flatten)] ResetArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logger::init(&args.data_dir, args.verbose.log_level_filter())?;
    log::debug!("data directory: {}", args.data_dir.display());

    let result = match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg, &args.data_dir),
        Mode::Stats(arg) => stats::run(&arg, &args.data_dir),
        Mode::Themes => {
            themes::run();
            Ok(())
        }
        Mode::Reset(arg) => {
            reset::run(&arg, &args.data_dir);
            Ok(())
        }
    };
    logger::flush();
    result
}
