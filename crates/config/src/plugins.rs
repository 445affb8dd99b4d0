//! Plugin loading.

use parking_lot::Mutex;
use tracing::debug;

/// Loads reader plugins by name.
pub trait PluginLoader: Send + Sync {
    /// Load every plugin in `names` that is not loaded yet.
    fn load(&self, names: &[String]);
}

/// Loader that records plugins; each distinct non-empty name loads once.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Loaded plugin names, in load order.
    loaded: Mutex<Vec<String>>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names loaded so far.
    pub fn loaded(&self) -> Vec<String> {
        self.loaded.lock().clone()
    }
}

impl PluginLoader for PluginRegistry {
    fn load(&self, names: &[String]) {
        let mut loaded = self.loaded.lock();
        for name in names.iter().map(|n| n.trim()) {
            if name.is_empty() || loaded.iter().any(|l| l == name) {
                continue;
            }
            debug!("Loading plugin \"{name}\"");
            loaded.push(name.to_string());
        }
    }
}
