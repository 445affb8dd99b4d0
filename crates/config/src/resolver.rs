//! Layered option resolution.
//!
//! A resolution pass walks every input path, then every entries collection in
//! precedence order, then every entry in list order. Matching entries write
//! into a fresh application dictionary and a fresh library option store, so
//! the last applicable assignment wins. The pass never fails: bad names and
//! bad values become warnings, or nothing at all when `quiet` is set.

use std::{
    collections::BTreeMap,
    path::PathBuf,
    sync::Arc,
};

use logging::{VerbosityCell, VerbosityHandle};
use options::{Error as OptionError, Options};
use tracing::{debug, info, warn};

use crate::{
    AppOptions,
    app_options::{closest_option, default_app_options, lib_option_name},
    colormap::{ColormapLookup, FsColormapLookup},
    entry::{OptionsDict, OptionsEntries, OptionsEntry},
    matcher::{PatternDiagnostics, PatternMatcher},
    plugins::{PluginLoader, PluginRegistry},
    postprocess::apply_interdependent,
    reader::{InMemoryReaderOptions, ReaderOptions},
};

/// Prefix marking a reset directive.
const RESET_PREFIX: &str = "reset-";

/// Initial drop zone text.
const DROP_ZONE_INFO: &str = "Drop a file or HDRI to load it\nPress H to show cheatsheet";

/// External collaborators of the resolver.
#[derive(Clone)]
pub struct Collaborators {
    /// Reader option registry.
    pub readers: Arc<dyn ReaderOptions>,
    /// Colormap file lookup.
    pub colormaps: Arc<dyn ColormapLookup>,
    /// Plugin loader.
    pub plugins: Arc<dyn PluginLoader>,
    /// Live verbosity level.
    pub verbosity: Arc<dyn VerbosityHandle>,
    /// Malformed pattern reports, shared for the process lifetime.
    pub diagnostics: Arc<PatternDiagnostics>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            readers: Arc::new(InMemoryReaderOptions::default()),
            colormaps: Arc::new(FsColormapLookup::default()),
            plugins: Arc::new(PluginRegistry::new()),
            verbosity: Arc::new(VerbosityCell::default()),
            diagnostics: Arc::new(PatternDiagnostics::new()),
        }
    }
}

/// Output of the merge phase of a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Application options as strings.
    pub app: OptionsDict,
    /// Library options.
    pub options: Options,
}

/// One line of the debug trace.
struct Assignment {
    /// Name as written, or the reset target.
    key: String,
    /// Value applied.
    value: String,
    /// Provenance of the entry.
    origin: String,
}

/// Merges entries collections into application and library options.
pub struct Resolver {
    /// Entry selector.
    matcher: PatternMatcher,
    /// External collaborators.
    collab: Collaborators,
    /// Typed application options from the last pass.
    app_options: AppOptions,
    /// Library options from the last pass.
    lib_options: Options,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Collaborators::default())
    }
}

impl Resolver {
    /// Create a resolver around `collab`.
    pub fn new(collab: Collaborators) -> Self {
        Self {
            matcher: PatternMatcher::new(collab.diagnostics.clone()),
            collab,
            app_options: AppOptions::default(),
            lib_options: Options::new(),
        }
    }

    /// Replace the pattern matcher.
    pub fn with_matcher(mut self, matcher: PatternMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Typed application options from the last pass.
    pub fn app_options(&self) -> &AppOptions {
        &self.app_options
    }

    /// Mutable typed application options.
    pub fn app_options_mut(&mut self) -> &mut AppOptions {
        &mut self.app_options
    }

    /// Library options from the last pass.
    pub fn lib_options(&self) -> &Options {
        &self.lib_options
    }

    /// The collaborators.
    pub fn collaborators(&self) -> &Collaborators {
        &self.collab
    }

    /// Run a full pass and make its result authoritative.
    ///
    /// Besides merging, this projects the typed application options, applies
    /// the verbosity level, loads declared plugins and resolves options that
    /// depend on both option sets.
    pub fn update_options(&mut self, collections: &[&OptionsEntries], paths: &[PathBuf], quiet: bool) {
        let Resolution { app, options } = self.resolve(collections, paths, quiet);

        self.app_options.project(&app);
        self.apply_verbosity();
        self.collab.plugins.load(&self.app_options.plugins);
        self.lib_options = options;
        apply_interdependent(
            &self.app_options,
            &mut self.lib_options,
            self.collab.colormaps.as_ref(),
        );
    }

    /// Merge `collections` for `paths` without touching the stored state.
    ///
    /// Reader options are still forwarded to the reader registry. An empty
    /// `paths` resolves for the empty path only.
    pub fn resolve(&self, collections: &[&OptionsEntries], paths: &[PathBuf], quiet: bool) -> Resolution {
        let fallback = no_file();
        let paths = if paths.is_empty() { &fallback[..] } else { paths };
        if !quiet {
            debug!("Updating Options:");
        }

        let mut options = Options::new();
        if let Err(e) = options.set_as_string("ui.drop_zone.info", DROP_ZONE_INFO) {
            warn!("{e}");
        }
        let mut app = default_app_options();
        let trace = self.app_options.verbose == "debug" && !quiet;
        let mut log: BTreeMap<String, Assignment> = BTreeMap::new();
        let reader_names = self.collab.readers.names();

        {
            let mut pass = Pass {
                app: &mut app,
                options: &mut options,
                log: trace.then_some(&mut log),
                reader_names: &reader_names,
                quiet,
            };
            for path in paths {
                let input = path.to_string_lossy();
                for entry in collections.iter().flat_map(|entries| entries.iter()) {
                    if !self.matcher.matches(entry, &input) {
                        continue;
                    }
                    for (key, value) in &entry.options {
                        self.apply(entry, key, value, &mut pass);
                    }
                }
            }
        }

        for Assignment { key, value, origin } in log.values() {
            debug!(" '{key}' = '{value}' from {origin}");
        }
        debug!("");

        Resolution { app, options }
    }

    /// Apply a single `key = value` from `entry`.
    fn apply(&self, entry: &OptionsEntry, key: &str, value: &str, pass: &mut Pass<'_>) {
        if let Some(slot) = pass.app.get_mut(key) {
            *slot = value.to_string();
            pass.record(key, key, value, entry);
            return;
        }

        if key == "animation-index" {
            warn!("animation-index is deprecated, please use animation-indices");
        }

        let mut name = lib_option_name(key).unwrap_or(key);
        let mut key_for_log = key;
        let mut value = value;
        let mut reset = false;

        if let Some(target) = name.strip_prefix(RESET_PREFIX) {
            if target.is_empty() {
                warn!("Invalid option: 'reset' must be followed by a valid option name, ignoring entry");
                return;
            }
            reset = true;
            // Unlike plain library names, aliases are accepted after `reset-`
            // too: `reset-line-width` resets `render.line_width`.
            name = lib_option_name(target).unwrap_or(target);
            key_for_log = target;
            value = "reset";
        }

        if pass.reader_names.iter().any(|r| r == name) {
            self.collab.readers.set(name, value);
            return;
        }

        let result = if reset {
            pass.options.reset(name)
        } else {
            pass.options.set_as_string(name, value)
        }
        .map(|_| ());
        match result {
            Ok(()) => pass.record(name, key_for_log, value, entry),
            Err(_) if pass.quiet => {}
            Err(OptionError::Parse { source, .. }) => warn!(
                "Could not set '{key_for_log}' to '{value}' from {} because: {source}",
                entry.origin()
            ),
            Err(OptionError::Inexistent { .. }) => {
                let (closest, _) = closest_option(name, true, pass.reader_names);
                warn!(
                    "'{key_for_log}' option from {} does not exist, did you mean '{closest}'?",
                    entry.origin()
                );
            }
            Err(e) => warn!("Could not set '{key_for_log}' from {}: {e}", entry.origin()),
        }
    }

    /// Apply the `verbose` and `output` application options to the logger.
    fn apply_verbosity(&self) {
        let force_stderr = self.app_options.output == "-";
        match self.app_options.verbosity() {
            Some(level) => self.collab.verbosity.set_verbosity(level, force_stderr),
            None => warn!(
                "Unrecognized verbose level: {}, Ignoring. Possible values are quiet, error, warning, info, debug",
                self.app_options.verbose
            ),
        }
        if force_stderr {
            info!(
                "Output image will be saved to stdout, all log types including debug and info levels are redirected to stderr"
            );
        }
    }
}

/// Mutable state threaded through one pass.
struct Pass<'a> {
    /// Application options being built.
    app: &'a mut OptionsDict,
    /// Library options being built.
    options: &'a mut Options,
    /// Debug trace, when enabled.
    log: Option<&'a mut BTreeMap<String, Assignment>>,
    /// Reader option names, fetched once per pass.
    reader_names: &'a [String],
    /// Suppress warnings.
    quiet: bool,
}

impl Pass<'_> {
    /// Record an assignment for the debug trace.
    fn record(&mut self, name: &str, key: &str, value: &str, entry: &OptionsEntry) {
        if let Some(log) = self.log.as_deref_mut() {
            log.insert(
                name.to_string(),
                Assignment {
                    key: key.to_string(),
                    value: value.to_string(),
                    origin: entry.origin(),
                },
            );
        }
    }
}

/// The single empty path used when no file is loaded.
pub fn no_file() -> [PathBuf; 1] {
    [PathBuf::new()]
}
