//! Errors raised while reading config files and colormaps.

use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// A file that could not be read, parsed or understood.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// The file could not be read or decoded.
    #[error("{message}")]
    Read {
        /// File involved, if known.
        path: Option<PathBuf>,
        /// What went wrong.
        message: String,
    },
    /// The text is not valid JSON.
    #[error("{message}")]
    Parse {
        /// File involved, if known.
        path: Option<PathBuf>,
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        col: usize,
        /// What went wrong.
        message: String,
        /// Source lines around the error with a caret under it.
        excerpt: String,
    },
    /// Valid JSON with an unexpected shape.
    #[error("{message}")]
    Validation {
        /// File involved, if known.
        path: Option<PathBuf>,
        /// What went wrong.
        message: String,
    },
}

impl Error {
    /// Multi-line report with the location and, for syntax errors, an excerpt.
    pub fn pretty(&self) -> String {
        let location = self.location();
        match self {
            Self::Read { message, .. } => format!("Cannot read {location}: {message}"),
            Self::Validation { message, .. } => {
                format!("Invalid config file {location}: {message}")
            }
            Self::Parse {
                message, excerpt, ..
            } => {
                let mut out = format!("Syntax error in config file {location}: {message}");
                if !excerpt.is_empty() {
                    out.push('\n');
                    out.push_str(excerpt);
                }
                out
            }
        }
    }

    /// File involved, if known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                path.as_deref()
            }
        }
    }

    /// `path`, plus `:line:col` for syntax errors.
    fn location(&self) -> String {
        let path = self
            .path()
            .map_or_else(|| "<input>".to_string(), |p| p.display().to_string());
        match self {
            Self::Parse { line, col, .. } => format!("{path}:{line}:{col}"),
            _ => path,
        }
    }

    /// Wrap a `serde_json` syntax error found in `source`.
    pub(crate) fn from_json(path: Option<&Path>, source: &str, err: &serde_json::Error) -> Self {
        Self::Parse {
            path: path.map(Path::to_path_buf),
            line: err.line(),
            col: err.column(),
            message: err.to_string(),
            excerpt: excerpt_at(source, err.line(), err.column()),
        }
    }
}

/// The line before `line`, `line` itself and a caret under column `col`.
pub fn excerpt_at(source: &str, line: usize, col: usize) -> String {
    let width = line.to_string().len();
    let mut out = String::new();
    let first = line.saturating_sub(1).max(1);
    for (n, text) in source.lines().enumerate().map(|(i, t)| (i + 1, t)) {
        if (first..=line).contains(&n) {
            let _ignored = writeln!(out, "{n:>width$} | {text}");
        }
    }
    let _ignored = write!(out, "{:width$} | {:>col$}", "", "^");
    out
}
