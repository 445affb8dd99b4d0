//! Reader options: settings owned by file-format readers rather than the
//! option store.

use std::collections::BTreeMap;

use parking_lot::Mutex;

/// Registry of reader option names and values.
pub trait ReaderOptions: Send + Sync {
    /// Every reader option name.
    fn names(&self) -> Vec<String>;

    /// Set `name` to `value`; `reset` restores the reader default.
    fn set(&self, name: &str, value: &str);

    /// Current value of `name`.
    fn get(&self, name: &str) -> Option<String>;
}

/// Reader options kept in memory with their defaults.
#[derive(Debug, Default)]
pub struct InMemoryReaderOptions {
    /// Name to default value.
    defaults: BTreeMap<String, String>,
    /// Name to current value.
    values: Mutex<BTreeMap<String, String>>,
}

impl InMemoryReaderOptions {
    /// Register options with their default values.
    pub fn new<I, K, V>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let defaults: BTreeMap<String, String> = defaults
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Mutex::new(defaults.clone()),
            defaults,
        }
    }
}

impl ReaderOptions for InMemoryReaderOptions {
    fn names(&self) -> Vec<String> {
        self.defaults.keys().cloned().collect()
    }

    fn set(&self, name: &str, value: &str) {
        let Some(default) = self.defaults.get(name) else {
            return;
        };
        let value = if value == "reset" { default } else { value };
        self.values.lock().insert(name.to_string(), value.to_string());
    }

    fn get(&self, name: &str) -> Option<String> {
        self.values.lock().get(name).cloned()
    }
}
