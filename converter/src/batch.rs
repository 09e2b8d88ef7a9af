//! Batch driver.
//!
//! Decides between single-file and directory mode and runs the pipeline once
//! per input. Files are processed one after another in lexicographic path
//! order; the first failure stops the batch and is returned to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult, ConvertResult, PathError, PathResult};
use crate::logs::LogSink;
use crate::profile::{Profile, ProfilePaths};
use crate::transform::pipeline::{convert_file, FileReport};

/// Extension matched in directory mode (case-sensitive, like `*.csv`).
pub const INPUT_EXTENSION: &str = "csv";

/// What a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// One input file to one output file
    Single { input: PathBuf, output: PathBuf },
    /// Every `*.csv` in `input_dir` to a file of the same name in `output_dir`
    Directory { input_dir: PathBuf, output_dir: PathBuf },
}

impl RunMode {
    /// Pick the mode from resolved paths. A configured input directory takes
    /// precedence over an input file.
    pub fn resolve(paths: &ProfilePaths) -> ConfigResult<Self> {
        match (&paths.input_dir, &paths.input_file) {
            (Some(input_dir), _) => {
                let output_dir = paths
                    .output_dir
                    .clone()
                    .ok_or(ConfigError::MissingField("output_dir"))?;
                Ok(RunMode::Directory {
                    input_dir: input_dir.clone(),
                    output_dir,
                })
            }
            (None, Some(input)) => {
                let output = paths
                    .output_file
                    .clone()
                    .ok_or(ConfigError::MissingField("output_file"))?;
                Ok(RunMode::Single {
                    input: input.clone(),
                    output,
                })
            }
            (None, None) => Err(ConfigError::NoInput),
        }
    }

    /// Pick the mode when paths come from both the profile and the command line.
    ///
    /// An input given on the command line decides the mode on its own; the
    /// profile only fills in a missing output. Without a command-line input the
    /// profile's paths are used, with any command-line outputs on top.
    pub fn resolve_layered(profile: &ProfilePaths, cli: &ProfilePaths) -> ConfigResult<Self> {
        if cli.input_file.is_some() || cli.input_dir.is_some() {
            let chosen = ProfilePaths {
                input_file: cli.input_file.clone(),
                input_dir: cli.input_dir.clone(),
                output_file: cli.output_file.clone().or_else(|| profile.output_file.clone()),
                output_dir: cli.output_dir.clone().or_else(|| profile.output_dir.clone()),
            };
            return Self::resolve(&chosen);
        }
        Self::resolve(&profile.overridden_by(cli))
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.files.len()
    }
}

/// Non-hidden `*.csv` files directly inside `dir`, sorted by path.
pub fn discover_inputs(dir: &Path) -> PathResult<Vec<PathBuf>> {
    let read_err = |source| PathError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        let visible = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| !n.starts_with('.'));
        if visible && path.is_file() && path.extension().is_some_and(|e| e == INPUT_EXTENSION) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Run the pipeline for every input of `mode`.
pub fn run<S: LogSink>(profile: &Profile, mode: &RunMode, sink: &S) -> ConvertResult<BatchReport> {
    let mut report = BatchReport::default();

    match mode {
        RunMode::Single { input, output } => {
            sink.info("1/1", 2);
            report.files.push(convert_file(profile, input, output, sink)?);
        }
        RunMode::Directory { input_dir, output_dir } => {
            if !input_dir.exists() {
                return Err(PathError::MissingInputDir(input_dir.clone()).into());
            }
            let inputs = discover_inputs(input_dir)?;

            if !inputs.is_empty() {
                fs::create_dir_all(output_dir).map_err(|source| PathError::Write {
                    path: output_dir.clone(),
                    source,
                })?;
            }

            let total = inputs.len();
            for (i, input) in inputs.iter().enumerate() {
                sink.info(format!("{}/{}", i + 1, total), 2);
                // file_name is always present for read_dir entries
                let output = match input.file_name() {
                    Some(name) => output_dir.join(name),
                    None => output_dir.clone(),
                };
                report.files.push(convert_file(profile, input, &output, sink)?);
            }
        }
    }

    sink.success("Done!", 0);
    Ok(report)
}
