//! Run-time verbosity control.

use parking_lot::Mutex;

use crate::Verbosity;

/// Something that owns the live verbosity level.
///
/// The option resolver applies the `verbose` option through this trait and
/// the session reads it back to detect interactive changes.
pub trait VerbosityHandle: Send + Sync {
    /// Current level.
    fn verbosity(&self) -> Verbosity;

    /// Change the level; `force_stderr` routes every level to stderr.
    fn set_verbosity(&self, level: Verbosity, force_stderr: bool);
}

/// A verbosity level held in memory, with no subscriber attached.
#[derive(Debug, Default)]
pub struct VerbosityCell {
    /// Level and stderr flag.
    state: Mutex<(Verbosity, bool)>,
}

impl VerbosityCell {
    /// Start at `level`.
    pub fn new(level: Verbosity) -> Self {
        Self {
            state: Mutex::new((level, false)),
        }
    }

    /// Whether the last update forced stderr output.
    pub fn force_stderr(&self) -> bool {
        self.state.lock().1
    }
}

impl VerbosityHandle for VerbosityCell {
    fn verbosity(&self) -> Verbosity {
        self.state.lock().0
    }

    fn set_verbosity(&self, level: Verbosity, force_stderr: bool) {
        *self.state.lock() = (level, force_stderr);
    }
}
