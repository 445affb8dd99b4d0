//! Command-line interface definitions for the `f3d` binary.

use std::path::PathBuf;

use clap::Parser;
use config::OptionsDict;
use logging::{LogArgs, Verbosity};

/// Command-line interface arguments for the `f3d` binary.
#[derive(Parser, Debug)]
#[command(name = "f3d", about = "Resolve f3d options for a set of 3D files", version)]
pub struct Cli {
    /// Files or directories to open
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Config file name (searched in the config directories) or path
    #[arg(long, value_name = "NAME|PATH")]
    pub config: Option<String>,

    /// Do not read any config file
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Verbosity: quiet, error, warning, info or debug (debug when given alone)
    #[arg(long, value_name = "LEVEL", num_args = 0..=1, default_missing_value = "debug")]
    pub verbose: Option<String>,

    /// Render into this file; `-` writes the image to stdout
    #[arg(long, value_name = "PATH")]
    pub output: Option<String>,

    /// Print the resolved options as JSON
    #[arg(long)]
    pub dump: bool,

    /// Set any option, e.g. `-D edges=true` or `-D render.line_width=2`
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", value_parser = parse_define)]
    pub defines: Vec<(String, String)>,

    /// Logging controls
    #[command(flatten)]
    pub log: LogArgs,
}

impl Cli {
    /// The command-line options entry.
    ///
    /// Dedicated flags win over `--define` for the same key.
    pub fn options_dict(&self) -> OptionsDict {
        let mut dict: OptionsDict = self.defines.iter().cloned().collect();
        if let Some(config) = &self.config {
            dict.insert("config".into(), config.clone());
        }
        if self.no_config {
            dict.insert("no-config".into(), "true".into());
        }
        if let Some(level) = &self.verbose {
            dict.insert("verbose".into(), level.clone());
        }
        if let Some(output) = &self.output {
            dict.insert("output".into(), output.clone());
        }
        dict
    }

    /// Level used until the options are resolved.
    pub fn initial_verbosity(&self) -> Verbosity {
        self.verbose
            .as_deref()
            .or_else(|| {
                self.defines
                    .iter()
                    .rev()
                    .find(|(k, _)| k == "verbose")
                    .map(|(_, v)| v.as_str())
            })
            .and_then(Verbosity::from_name)
            .unwrap_or_default()
    }
}

/// Split a `KEY=VALUE` define.
fn parse_define(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
