//! JSON config files.
//!
//! A config file is an array of blocks, each with an optional `match`
//! selector, an optional `match-type`, an `imperative` flag and an `options`
//! object:
//!
//! ```json
//! [
//!   { "options": { "axis": true } },
//!   { "match": "*.stl", "match-type": "glob", "options": { "edges": true } }
//! ]
//! ```
//!
//! The legacy form, an object mapping regexes to option objects, is accepted
//! too. Blocks without `match` apply to every file through the `.*` regex.

use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    Error,
    entry::{MatchType, OptionsDict, OptionsEntries, OptionsEntry},
};

/// Selector used by blocks without `match`.
const MATCH_ALL: &str = ".*";

/// Config name used when none is given.
const DEFAULT_CONFIG_NAME: &str = "config";

/// Entries read from config files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedConfig {
    /// Regular entries, lowest precedence.
    pub options: OptionsEntries,
    /// Imperative entries, applied after everything else.
    pub imperative: OptionsEntries,
}

impl ParsedConfig {
    /// Append the entries of `other`.
    pub fn extend(&mut self, other: Self) {
        self.options.extend(other.options);
        self.imperative.extend(other.imperative);
    }
}

/// Top-level file shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawConfig {
    /// Array of blocks.
    Blocks(Vec<RawBlock>),
    /// Object keyed by regex.
    Legacy(BTreeMap<String, BTreeMap<String, Value>>),
}

/// One block of the array form.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBlock {
    /// Selector.
    #[serde(rename = "match")]
    pattern: Option<String>,
    /// `exact`, `glob` or `regex`.
    #[serde(rename = "match-type")]
    match_type: Option<String>,
    /// Apply after CLI and dynamic options.
    #[serde(default)]
    imperative: bool,
    /// Option values.
    #[serde(default)]
    options: BTreeMap<String, Value>,
    /// Interaction bindings; accepted and ignored.
    #[serde(default, rename = "bindings")]
    _bindings: Option<Value>,
}

/// Parse config text. `path` labels the entries and errors.
pub fn parse_config_str(text: &str, path: &Path) -> Result<ParsedConfig, Error> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| Error::from_json(Some(path), text, &e))?;
    let raw: RawConfig = serde_json::from_value(value).map_err(|e| Error::Validation {
        path: Some(path.to_path_buf()),
        message: format!(
            "A config file must be an array of blocks or an object of option blocks: {e}"
        ),
    })?;

    let source = path.display().to_string();
    let mut parsed = ParsedConfig::default();
    match raw {
        RawConfig::Blocks(blocks) => {
            for block in blocks {
                let match_type = match (&block.pattern, &block.match_type) {
                    (None, _) => MatchType::Regex,
                    (Some(_), Some(text)) => MatchType::from_config(text),
                    (Some(_), None) => MatchType::Regex,
                };
                let entry = OptionsEntry::matching(
                    options_dict(&block.options, &source),
                    source.clone(),
                    match_type,
                    block.pattern.unwrap_or_else(|| MATCH_ALL.to_string()),
                );
                if block.imperative {
                    parsed.imperative.push(entry);
                } else {
                    parsed.options.push(entry);
                }
            }
        }
        RawConfig::Legacy(blocks) => {
            for (pattern, options) in blocks {
                parsed.options.push(OptionsEntry::matching(
                    options_dict(&options, &source),
                    source.clone(),
                    MatchType::Regex,
                    pattern,
                ));
            }
        }
    }
    Ok(parsed)
}

/// Read and parse one config file.
pub fn read_config_file(path: &Path) -> Result<ParsedConfig, Error> {
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    parse_config_str(&text, path)
}

/// Convert JSON option values into strings.
fn options_dict(values: &BTreeMap<String, Value>, source: &str) -> OptionsDict {
    values
        .iter()
        .filter_map(|(key, value)| match value_to_string(value) {
            Some(text) => Some((key.clone(), text)),
            None => {
                warn!("Ignoring '{key}' in {source}: unsupported value {value}");
                None
            }
        })
        .collect()
}

/// Scalar and array values as option strings; `None` for null and objects.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Array(_) => None,
                other => value_to_string(other),
            })
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(",")),
        Value::Null | Value::Object(_) => None,
    }
}

/// Directories searched for config files, lowest priority first.
pub fn config_search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from("/etc/f3d")];
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        dirs.push(PathBuf::from(dir).join("f3d"));
    } else if let Some(home) = env::var_os("HOME").filter(|v| !v.is_empty()) {
        dirs.push(PathBuf::from(home).join(".config").join("f3d"));
    }
    dirs
}

/// Directories searched for colormap files.
pub fn colormap_search_dirs(config_dirs: &[PathBuf]) -> Vec<PathBuf> {
    config_dirs.iter().map(|d| d.join("colormaps")).collect()
}

/// Config files selected by `config`, in application order.
///
/// An existing file or directory is used directly. Otherwise `config` (or
/// `config` when empty) names `<name>.json` and `<name>.d/*.json` in each of
/// `dirs`.
pub fn find_config_files(config: &str, dirs: &[PathBuf]) -> Vec<PathBuf> {
    let direct = Path::new(config);
    if !config.is_empty() {
        if direct.is_file() {
            return vec![direct.to_path_buf()];
        }
        if direct.is_dir() {
            return json_files_in(direct);
        }
    }

    let name = if config.is_empty() {
        DEFAULT_CONFIG_NAME
    } else {
        config
    };
    let mut found = Vec::new();
    for dir in dirs {
        let file = dir.join(format!("{name}.json"));
        if file.is_file() {
            found.push(file);
        }
        found.extend(json_files_in(&dir.join(format!("{name}.d"))));
    }
    found
}

/// Sorted `*.json` files directly inside `dir`.
fn json_files_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(read) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = read
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// Read every config file selected by `config`, skipping broken ones.
pub fn read_config_files(config: &str, dirs: &[PathBuf]) -> ParsedConfig {
    let files = find_config_files(config, dirs);
    if files.is_empty() && !config.is_empty() {
        warn!("Configuration file for \"{config}\" could not be found");
    }
    let mut parsed = ParsedConfig::default();
    for file in files {
        match read_config_file(&file) {
            Ok(one) => {
                debug!("Using config file {}", file.display());
                parsed.extend(one);
            }
            Err(e) => error!("{}", e.pretty()),
        }
    }
    parsed
}
