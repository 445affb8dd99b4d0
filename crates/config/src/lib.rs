//! Layered option resolution for the f3d front-end.
//!
//! Options arrive as string dictionaries from several ordered sources:
//! config files, the command line, interactive changes recorded while the
//! viewer runs and imperative config blocks. Each dictionary is an
//! [`OptionsEntry`] carrying a selector that decides which input files it
//! applies to. The [`Resolver`] merges them, for a list of input files, into
//! typed [`AppOptions`] and a library [`options::Options`] store. A
//! [`Session`] keeps the collections, detects interactive changes and hands
//! the result to a [`RenderEngine`].

mod app_options;
mod colormap;
mod config_file;
mod entry;
mod error;
mod file_groups;
mod glob;
mod matcher;
mod plugins;
mod postprocess;
mod reader;
mod resolver;
mod session;

#[cfg(test)]
mod test_config_file;

pub use app_options::{
    AppOptions, CameraConfiguration, DEFAULT_APP_OPTIONS, LIB_OPTION_NAMES, closest_option,
    default_app_options, is_app_option, lib_option_name,
};
pub use colormap::{ColormapLookup, FsColormapLookup};
pub use config_file::{
    ParsedConfig, colormap_search_dirs, config_search_dirs, find_config_files, parse_config_str,
    read_config_file, read_config_files,
};
pub use entry::{MatchType, OptionsDict, OptionsEntries, OptionsEntry, dict};
pub use error::{Error, excerpt_at};
pub use file_groups::FileGroups;
pub use glob::{GlobError, PathGlob};
pub use matcher::{PatternDiagnostics, PatternMatcher};
pub use plugins::{PluginLoader, PluginRegistry};
pub use postprocess::apply_interdependent;
pub use reader::{InMemoryReaderOptions, ReaderOptions};
pub use resolver::{Collaborators, Resolution, Resolver, no_file};
pub use session::{ReloadFlag, RenderEngine, Session};
