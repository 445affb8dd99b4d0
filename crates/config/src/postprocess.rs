//! Options that depend on both application and library options.

use options::{Colormap, OptionValue, Options};
use tracing::error;

use crate::{AppOptions, colormap::ColormapLookup};

/// Library option receiving the colormap file contents.
const COLORMAP_OPTION: &str = "model.scivis.colormap";

/// Load `colormap-file` into the scivis colormap option.
///
/// A file that cannot be found or read leaves an empty colormap.
pub fn apply_interdependent(app: &AppOptions, lib: &mut Options, colormaps: &dyn ColormapLookup) {
    let file = &app.colormap_file;
    if file.is_empty() {
        return;
    }

    let colormap = match colormaps.find(file) {
        Some(path) => colormaps.read(&path).unwrap_or_else(|e| {
            error!("{}", e.pretty());
            Colormap::default()
        }),
        None => {
            error!("Cannot find the colormap {file}");
            Colormap::default()
        }
    };
    if let Err(e) = lib.set(COLORMAP_OPTION, OptionValue::Colormap(colormap)) {
        error!("{e}");
    }
}
