//! csvconv CLI - Normalize CSV files with a JSON profile
//!
//! ```bash
//! csvconv -p profile.json -i input.csv -o output.csv   # one file
//! csvconv -p profile.json --input-dir in --output-dir out   # every *.csv in a directory
//! csvconv -p profile.json -s                            # paths from the profile, no progress
//! ```
//!
//! An input given on the command line (`-i` or `--input-dir`) decides the mode;
//! the profile's paths are used only when the command line names no input.

use clap::Parser;
use csvconv::{batch, ConsoleSink, ConvertError, ConvertResult, LogEntry, LogSink, Profile, ProfilePaths, RunMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "csvconv")]
#[command(about = "Transform CSV files into a fixed schema using a JSON profile", long_about = None)]
struct Cli {
    /// JSON profile file
    #[arg(short, long)]
    profile: PathBuf,

    /// CSV input file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// CSV output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory with CSV input files
    #[arg(long = "input-dir", visible_alias = "input_dir")]
    input_dir: Option<PathBuf>,

    /// Directory for CSV output files
    #[arg(long = "output-dir", visible_alias = "output_dir")]
    output_dir: Option<PathBuf>,

    /// Silent mode
    #[arg(short, long)]
    silent: bool,
}

impl Cli {
    fn paths(&self) -> ProfilePaths {
        ProfilePaths {
            input_file: self.input.clone(),
            output_file: self.output.clone(),
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let sink = ConsoleSink::new(cli.silent);

    if let Err(e) = run(&cli, &sink) {
        eprintln!("{}", error_line(&e));
        std::process::exit(1);
    }
}

fn error_line(err: &ConvertError) -> String {
    LogEntry::error(format!("Error: {}", err)).render()
}

fn run(cli: &Cli, sink: &ConsoleSink) -> ConvertResult<()> {
    sink.info(format!("Reading {}...", cli.profile.display()), 0);
    let profile = Profile::load(&cli.profile)?;

    let mode = RunMode::resolve_layered(&profile.paths, &cli.paths())?;

    batch::run(&profile, &mode, sink)?;
    Ok(())
}
