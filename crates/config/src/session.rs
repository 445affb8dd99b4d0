//! A viewing session: entries collections, the resolver and the engine that
//! receives the resolved options.
//!
//! Options the user changes interactively are detected when the next file
//! group loads, by comparing the engine's options with the last resolved
//! ones. The differences are appended as a new dynamic entry so they survive
//! the re-resolution that every load performs.
//!
//! Input files are organised in [`FileGroups`]; one group is in the scene at
//! a time and navigation wraps around in both directions. After each load the
//! engine receives `ui.filename_info` and `ui.drop_zone.enable` describing
//! the scene.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use options::{OptionValue, Options};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    AppOptions, FileGroups, ParsedConfig, Resolver,
    entry::{OptionsDict, OptionsEntries, OptionsEntry},
    resolver::no_file,
};

/// Bytes in a MiB, for `max-size`.
const BYTES_IN_MIB: f64 = 1_048_576.0;

/// Supported `multi-file-mode` values.
const MULTI_FILE_MODES: [&str; 3] = ["single", "all", "dir"];

/// Option showing the drop zone.
const DROP_ZONE: &str = "ui.drop_zone.enable";

/// Option naming the files in the scene.
const FILENAME_INFO: &str = "ui.filename_info";

/// Outcome of checking one input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    /// Goes to the engine.
    Accepted,
    /// Missing or too big.
    Skipped,
    /// No reader for it.
    Unsupported,
}

/// Rendering engine receiving the resolved options.
pub trait RenderEngine {
    /// Live options, possibly changed interactively.
    fn options(&self) -> &Options;

    /// Mutable live options.
    fn options_mut(&mut self) -> &mut Options;

    /// Replace the live options.
    fn set_options(&mut self, options: Options);

    /// Whether a reader exists for `path`.
    fn supports(&self, path: &Path) -> bool;

    /// Add files to the scene.
    fn load(&mut self, paths: &[PathBuf]) -> Result<(), String>;

    /// Remove everything from the scene.
    fn clear(&mut self);
}

/// Reload request set by a file watcher and consumed by the control loop.
#[derive(Debug, Clone, Default)]
pub struct ReloadFlag(Arc<Mutex<bool>>);

impl ReloadFlag {
    /// Ask for a reload.
    pub fn request(&self) {
        *self.0.lock() = true;
    }

    /// Consume a pending request.
    pub fn take(&self) -> bool {
        let mut pending = self.0.lock();
        let was = *pending;
        *pending = false;
        was
    }
}

/// Entries, resolver, engine and loaded files of one viewer.
pub struct Session<E: RenderEngine> {
    /// Entries read from config files.
    config_entries: OptionsEntries,
    /// The single command-line entry.
    cli_entries: OptionsEntries,
    /// One entry per file load, never pruned.
    dynamic_entries: OptionsEntries,
    /// Imperative config entries.
    imperative_entries: OptionsEntries,
    /// Option resolver.
    resolver: Resolver,
    /// Engine owning the live options.
    engine: E,
    /// Files currently in the scene.
    loaded_files: Vec<PathBuf>,
    /// Files watched for changes.
    files_to_watch: BTreeSet<PathBuf>,
    /// Pending reload request.
    reload: ReloadFlag,
    /// Input files, grouped.
    groups: FileGroups,
    /// Group in the scene, if any.
    current_group: Option<usize>,
}

impl<E: RenderEngine> Session<E> {
    /// Create a session around `resolver` and `engine`.
    pub fn new(resolver: Resolver, engine: E) -> Self {
        Self {
            config_entries: Vec::new(),
            cli_entries: Vec::new(),
            dynamic_entries: Vec::new(),
            imperative_entries: Vec::new(),
            resolver,
            engine,
            loaded_files: Vec::new(),
            files_to_watch: BTreeSet::new(),
            reload: ReloadFlag::default(),
            groups: FileGroups::default(),
            current_group: None,
        }
    }

    /// Store the command-line and config entries and resolve them once.
    pub fn initialize(&mut self, cli: OptionsDict, config: ParsedConfig) {
        debug!("========== Initializing Options ==========");
        self.cli_entries = vec![OptionsEntry::unconditional(cli, "CLI options")];
        self.config_entries = config.options;
        self.imperative_entries = config.imperative;

        self.resolver.update_options(
            &[
                &self.config_entries,
                &self.cli_entries,
                &self.imperative_entries,
            ],
            &no_file(),
            true,
        );

        let app = self.resolver.app_options_mut();
        if !MULTI_FILE_MODES.contains(&app.multi_file_mode.as_str()) {
            warn!(
                "Unrecognized multi-file-mode: {}. Assuming \"single\" mode.",
                app.multi_file_mode
            );
            app.multi_file_mode = "single".to_string();
        }
        self.groups = FileGroups::new(self.resolver.app_options());

        self.engine.set_options(self.resolver.lib_options().clone());
    }

    /// Replace the config entries, e.g. after the config file changed.
    pub fn reload_config(&mut self, config: ParsedConfig) {
        debug!("Reloading configuration");
        self.config_entries = config.options;
        self.imperative_entries = config.imperative;
    }

    /// Add an input file or directory to the groups.
    ///
    /// Returns the index of the last group touched.
    pub fn add_input(&mut self, input: &Path) -> Option<usize> {
        self.groups.add(input)
    }

    /// Load group `index`, wrapping around the number of groups.
    ///
    /// The scene is cleared when `force_clear` is set or the group changes.
    /// Returns the number of files added to the scene.
    pub fn load_group(&mut self, index: usize, force_clear: bool) -> usize {
        match self.groups.len() {
            0 => self.load_no_group(),
            len => self.load_group_at(index % len, force_clear),
        }
    }

    /// Load the group `offset` positions away from the current one.
    ///
    /// An offset of zero reloads the current group.
    pub fn load_relative_group(&mut self, offset: isize, force_clear: bool) -> usize {
        let len = self.groups.len();
        if len == 0 {
            return self.load_no_group();
        }
        let current = self.current_group.unwrap_or(0) % len;
        let step = offset.unsigned_abs() % len;
        let index = if offset < 0 {
            (current + len - step) % len
        } else {
            (current + step) % len
        };
        self.load_group_at(index, force_clear)
    }

    /// Reload the current group if a reload was requested.
    pub fn reload_if_requested(&mut self) -> bool {
        if !self.take_reload_request() {
            return false;
        }
        debug!("Reloading the current file group");
        self.load_relative_group(0, true);
        true
    }

    /// Load group `index`, which must exist.
    fn load_group_at(&mut self, index: usize, force_clear: bool) -> usize {
        let clear = force_clear || self.current_group != Some(index);
        self.current_group = Some(index);
        let label = format!("({}/{})", index + 1, self.groups.len());
        let files = self.groups.get(index).map(<[_]>::to_vec).unwrap_or_default();
        let count = self.load_paths(&files, clear, &label);

        if self.resolver.app_options().remove_empty_file_groups && self.loaded_files.is_empty() {
            debug!("Removing empty file group {label}");
            self.groups.remove(index);
            return self.load_relative_group(0, true);
        }
        count
    }

    /// Empty the scene when there is no group to show.
    fn load_no_group(&mut self) -> usize {
        self.current_group = None;
        self.load_paths(&[], true, "")
    }

    /// Load `paths` on top of the current files, or alone when `clear` is set.
    ///
    /// Returns the number of files added to the scene.
    pub fn load_file_group(&mut self, paths: &[PathBuf], clear: bool) -> usize {
        self.load_paths(paths, clear, "")
    }

    /// Load `paths`, then describe the scene with the group `label`.
    fn load_paths(&mut self, paths: &[PathBuf], clear: bool, label: &str) -> usize {
        debug!("========== Loading 3D files ==========");

        let dynamic = self.dynamic_options();
        self.dynamic_entries
            .push(OptionsEntry::unconditional(dynamic, "dynamic options"));

        if clear {
            self.engine.clear();
            self.loaded_files.clear();
            self.files_to_watch.clear();
        }

        let mut unsupported = false;
        let count = if paths.is_empty() {
            self.resolve(&no_file());
            debug!("No files to load provided");
            0
        } else {
            let mut config_paths = self.loaded_files.clone();
            config_paths.extend_from_slice(paths);
            self.resolve(&config_paths);

            debug!("Checking files:");
            let mut admitted = Vec::new();
            for path in paths {
                if self.loaded_files.contains(path) {
                    continue;
                }
                match self.admit(path) {
                    Admission::Accepted => admitted.push(path.clone()),
                    Admission::Unsupported => unsupported = true,
                    Admission::Skipped => {}
                }
            }
            self.add_to_scene(admitted)
        };

        self.publish_scene_state(label, unsupported);
        count
    }

    /// Hand `admitted` to the engine; returns how many were loaded.
    fn add_to_scene(&mut self, admitted: Vec<PathBuf>) -> usize {
        if admitted.is_empty() {
            return 0;
        }
        if let Err(e) = self.engine.load(&admitted) {
            error!("Some of these files could not be loaded: {e}");
            for path in &admitted {
                error!("  {}", path.display());
            }
            return 0;
        }
        if let Some(time) = self.app_options().animation_time {
            debug!("Loading animation time: {time}");
        }
        let count = admitted.len();
        self.loaded_files.extend(admitted);
        count
    }

    /// Push the filename info and the drop zone state to the engine.
    fn publish_scene_state(&mut self, label: &str, unsupported: bool) {
        let info = filename_info(&self.loaded_files, label, unsupported);
        let empty = self.loaded_files.is_empty();
        let live = self.engine.options_mut();
        let state = [
            (DROP_ZONE, OptionValue::Bool(empty)),
            (FILENAME_INFO, OptionValue::String(info)),
        ];
        for (name, value) in state {
            if let Err(e) = live.set(name, value) {
                warn!("{e}");
            }
        }
    }

    /// Differences between the engine options and the last resolution.
    fn dynamic_options(&mut self) -> OptionsDict {
        let live = self.engine.options_mut();
        // Options forced by the viewer are not user changes.
        let forced = [
            (DROP_ZONE, OptionValue::Bool(false)),
            (FILENAME_INFO, OptionValue::String(String::new())),
        ];
        for (name, value) in forced {
            if let Err(e) = live.set(name, value) {
                warn!("{e}");
            }
        }

        let live = self.engine.options();
        let resolved = self.resolver.lib_options();
        let mut dict = OptionsDict::new();
        for name in Options::all_names() {
            if !matches!(live.is_same(resolved, name), Ok(false)) {
                continue;
            }
            if live.has_value(name) {
                if let Ok(value) = live.get_as_string(name) {
                    dict.insert(name.to_string(), value);
                }
            } else {
                dict.insert(format!("reset-{name}"), String::new());
            }
        }

        let current = self.resolver.collaborators().verbosity.verbosity();
        if current.as_str() != self.resolver.app_options().verbose {
            dict.insert("verbose".to_string(), current.as_str().to_string());
        }
        dict
    }

    /// Resolve every collection for `paths` and push the result to the engine.
    fn resolve(&mut self, paths: &[PathBuf]) {
        self.resolver.update_options(
            &[
                &self.config_entries,
                &self.cli_entries,
                &self.dynamic_entries,
                &self.imperative_entries,
            ],
            paths,
            false,
        );
        self.engine.set_options(self.resolver.lib_options().clone());
    }

    /// Decide whether a new path goes to the engine, logging why not.
    fn admit(&mut self, path: &Path) -> Admission {
        if self.resolver.app_options().watch {
            self.files_to_watch.insert(path.to_path_buf());
        }

        let Ok(meta) = fs::metadata(path) else {
            error!("{} does not exist", path.display());
            return Admission::Skipped;
        };
        if !self.engine.supports(path) {
            match self.resolver.lib_options().get_as_string("scene.force_reader") {
                Ok(reader) => warn!("Forced reader {reader} doesn't exist"),
                Err(_) => warn!("{} is not a file of a supported file format", path.display()),
            }
            return Admission::Unsupported;
        }
        if let Some(max) = self.app_options().max_size
            && meta.len() as f64 > max * BYTES_IN_MIB
        {
            info!("{} skipped, file is bigger than max size", path.display());
            return Admission::Skipped;
        }
        Admission::Accepted
    }

    /// Typed application options from the last resolution.
    pub fn app_options(&self) -> &AppOptions {
        self.resolver.app_options()
    }

    /// Library options from the last resolution.
    pub fn lib_options(&self) -> &Options {
        self.resolver.lib_options()
    }

    /// The resolver.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// The engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable engine, e.g. to apply interactive changes.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Files currently in the scene.
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.loaded_files
    }

    /// Input file groups.
    pub fn file_groups(&self) -> &FileGroups {
        &self.groups
    }

    /// Index of the group in the scene.
    pub fn current_group(&self) -> Option<usize> {
        self.current_group
    }

    /// Files watched for changes.
    pub fn files_to_watch(&self) -> &BTreeSet<PathBuf> {
        &self.files_to_watch
    }

    /// Dynamic entries recorded so far.
    pub fn dynamic_entries(&self) -> &OptionsEntries {
        &self.dynamic_entries
    }

    /// Handle a file watcher can use to request a reload.
    pub fn reload_flag(&self) -> ReloadFlag {
        self.reload.clone()
    }

    /// Ask for the current files to be reloaded.
    pub fn request_reload(&self) {
        self.reload.request();
    }

    /// Consume a pending reload request.
    pub fn take_reload_request(&self) -> bool {
        self.reload.take()
    }
}

/// `(i/n) name +N [+UNSUPPORTED]`, or `(i/n) [EMPTY]` when nothing is loaded.
fn filename_info(loaded: &[PathBuf], label: &str, unsupported: bool) -> String {
    let Some(first) = loaded.first() else {
        return if label.is_empty() {
            String::new()
        } else {
            format!("{label} [EMPTY]")
        };
    };
    let name = first
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let mut info = if label.is_empty() {
        name.into_owned()
    } else {
        format!("{label} {name}")
    };
    if loaded.len() > 1 {
        info.push_str(&format!(" +{}", loaded.len() - 1));
    }
    if unsupported {
        info.push_str(" [+UNSUPPORTED]");
    }
    info
}
