//! Binary entrypoint for `f3d`: resolve viewer options for a set of 3D files.
use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use config::{
    Collaborators, FsColormapLookup, ParsedConfig, Resolver, Session, colormap_search_dirs,
    config_search_dirs, read_config_files,
};
use tracing::{debug, error, info};

/// Command-line interface.
mod cli;
/// `--dump` output.
mod dump;
/// Headless render engine.
mod engine;

use crate::{cli::Cli, engine::HeadlessEngine};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbosity = cli.initial_verbosity();
    let (spec, pinned) = logging::compute_spec(verbosity, cli.log.log_filter.as_deref());
    let control = Arc::new(logging::init(&spec, pinned, verbosity));

    let config_dirs = config_search_dirs();
    let parsed = if cli.no_config {
        debug!("Config files disabled");
        ParsedConfig::default()
    } else {
        read_config_files(cli.config.as_deref().unwrap_or_default(), &config_dirs)
    };

    let collab = Collaborators {
        readers: Arc::new(engine::reader_options()),
        colormaps: Arc::new(FsColormapLookup::new(colormap_search_dirs(&config_dirs))),
        verbosity: control,
        ..Collaborators::default()
    };
    let mut session = Session::new(Resolver::new(collab), HeadlessEngine::new());
    session.initialize(cli.options_dict(), parsed);

    for input in &cli.inputs {
        session.add_input(input);
    }
    if session.file_groups().is_empty() {
        debug!("No input files");
    }
    let count = session.load_group(0, true);
    if let Some(index) = session.current_group() {
        info!(
            "Loaded {count} file(s) from group {}/{}",
            index + 1,
            session.file_groups().len()
        );
    }
    debug!("Scene holds {} file(s)", session.engine().loaded().len());

    if cli.dump {
        match dump::to_json(&session) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize options: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
