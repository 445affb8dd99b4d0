#![warn(missing_docs)]

//! Shared logging helpers, CLI argument definitions, and tracing utilities for the f3d workspace.
//!
//! This crate consolidates logging infrastructure:
//! - [`fmt`]: Render tracing events to logfmt strings
//! - [`capture`]: Record events in memory for assertions
//! - [`console`]: Install the console subscriber and change its verbosity at run time
//! - CLI argument parsing for log level configuration

use std::{env, fmt as stdfmt};

use clap::Args;
use tracing_subscriber::EnvFilter;

pub mod capture;
pub mod console;
pub mod fmt;

mod verbosity;

pub use capture::{CaptureLayer, CapturedLog, capture};
pub use console::{LogControl, init};
pub use verbosity::{VerbosityCell, VerbosityHandle};

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Set an explicit tracing filter directive (overrides --verbose)
    /// e.g. "config=debug,options=trace"
    #[arg(long)]
    pub log_filter: Option<String>,
}

/// How much the application prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Verbosity {
    /// Nothing at all.
    Quiet,
    /// Errors only.
    Error,
    /// Errors and warnings.
    Warning,
    /// Regular output.
    #[default]
    Info,
    /// Everything, including option resolution traces.
    Debug,
}

impl Verbosity {
    /// All levels, quietest first.
    pub const ALL: [Self; 5] = [
        Self::Quiet,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Debug,
    ];

    /// Parse the value of the `verbose` application option.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == name)
    }

    /// Name used by the `verbose` application option.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Filter directive level for this verbosity.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "off",
            Self::Error => "error",
            Self::Warning => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl stdfmt::Display for Verbosity {
    fn fmt(&self, f: &mut stdfmt::Formatter<'_>) -> stdfmt::Result {
        f.write_str(self.as_str())
    }
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &["f3d", "config", "options", "logging"]
}

/// Build a filter directive string that sets the same `level` for all of our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `log_filter`
/// - `RUST_LOG` env
/// - crate-scoped `verbosity`
///
/// The returned flag is true when the spec came from an explicit override and
/// must not be replaced by later verbosity changes.
pub fn compute_spec(verbosity: Verbosity, log_filter: Option<&str>) -> (String, bool) {
    if let Some(spec) = log_filter {
        return (spec.to_string(), true);
    }
    match env::var("RUST_LOG") {
        Ok(spec) if !spec.is_empty() => (spec, true),
        _ => (level_spec_for(verbosity.directive()), false),
    }
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}
