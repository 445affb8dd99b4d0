//! Console subscriber with a reloadable filter.
//!
//! Warnings and errors go to stderr, everything else to stdout, unless the
//! application forces all output to stderr (when an image is written to
//! stdout).

use std::{
    io::{self, Stderr, Stdout},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use parking_lot::Mutex;
use tracing::{Level, Metadata};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, MakeWriter, writer::EitherWriter},
    prelude::*,
    reload,
};

use crate::{Verbosity, VerbosityHandle, env_filter_from_spec, level_spec_for};

/// Writer factory splitting output between stdout and stderr by level.
#[derive(Debug, Clone)]
struct ConsoleWriter {
    /// Route every level to stderr.
    force_stderr: Arc<AtomicBool>,
}

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = EitherWriter<Stdout, Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        EitherWriter::A(io::stdout())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if self.force_stderr.load(Ordering::Relaxed) || *meta.level() <= Level::WARN {
            EitherWriter::B(io::stderr())
        } else {
            EitherWriter::A(io::stdout())
        }
    }
}

/// Handle to the installed console subscriber.
#[derive(Clone)]
pub struct LogControl {
    /// Reload handle for the filter layer.
    handle: reload::Handle<EnvFilter, Registry>,
    /// Shared with the console writer.
    force_stderr: Arc<AtomicBool>,
    /// Level last applied.
    current: Arc<Mutex<Verbosity>>,
    /// The filter came from `--log-filter` or `RUST_LOG` and is left alone.
    pinned: bool,
}

/// Install the global console subscriber.
///
/// `spec` is the initial filter (see [`crate::compute_spec`]); when `pinned`
/// is true later verbosity changes only affect stderr routing.
pub fn init(spec: &str, pinned: bool, verbosity: Verbosity) -> LogControl {
    let (filter, handle) = reload::Layer::new(env_filter_from_spec(spec));
    let force_stderr = Arc::new(AtomicBool::new(false));
    let writer = ConsoleWriter {
        force_stderr: force_stderr.clone(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .without_time()
                .with_target(false)
                .with_level(false)
                .with_writer(writer),
        )
        .try_init()
        .ok();

    LogControl {
        handle,
        force_stderr,
        current: Arc::new(Mutex::new(verbosity)),
        pinned,
    }
}

impl VerbosityHandle for LogControl {
    fn verbosity(&self) -> Verbosity {
        *self.current.lock()
    }

    fn set_verbosity(&self, level: Verbosity, force_stderr: bool) {
        self.force_stderr.store(force_stderr, Ordering::Relaxed);
        let mut current = self.current.lock();
        if *current == level {
            return;
        }
        *current = level;
        if self.pinned {
            return;
        }
        let spec = level_spec_for(level.directive());
        if let Err(e) = self.handle.reload(env_filter_from_spec(&spec)) {
            tracing::warn!("Could not change the log level to {level}: {e}");
        }
    }
}
