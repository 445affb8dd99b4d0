//! JSON dump of the resolved options.

use std::{collections::BTreeMap, path::PathBuf};

use config::{AppOptions, RenderEngine, Session};
use serde::Serialize;

/// Everything `--dump` prints.
#[derive(Serialize)]
struct Dump<'a> {
    /// Typed application options.
    app: &'a AppOptions,
    /// Engine options that hold a value, as strings.
    options: BTreeMap<&'static str, String>,
    /// Files in the scene.
    loaded: &'a [PathBuf],
}

/// Render the state of `session` as pretty JSON.
pub fn to_json<E: RenderEngine>(session: &Session<E>) -> serde_json::Result<String> {
    let lib = session.engine().options();
    let options = lib
        .names()
        .into_iter()
        .filter_map(|name| lib.get_as_string(name).ok().map(|v| (name, v)))
        .collect();
    serde_json::to_string_pretty(&Dump {
        app: session.app_options(),
        options,
        loaded: session.loaded_files(),
    })
}
