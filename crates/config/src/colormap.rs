//! Colormap files: lookup by name and conversion of an image row into
//! colormap stops.

use std::path::{Path, PathBuf};

use options::Colormap;

use crate::Error;

/// Finds and reads colormap files.
pub trait ColormapLookup: Send + Sync {
    /// Resolve a colormap file name or path.
    fn find(&self, name: &str) -> Option<PathBuf>;

    /// Read the colormap stored in `path`.
    fn read(&self, path: &Path) -> Result<Colormap, Error>;
}

/// Colormaps on disk, searched in a list of directories.
#[derive(Debug, Clone, Default)]
pub struct FsColormapLookup {
    /// Directories searched for bare names, in order.
    dirs: Vec<PathBuf>,
}

impl FsColormapLookup {
    /// Search `dirs` for colormaps given by name.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }
}

impl ColormapLookup for FsColormapLookup {
    fn find(&self, name: &str) -> Option<PathBuf> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        self.dirs
            .iter()
            .flat_map(|dir| [dir.join(name), dir.join(format!("{name}.png"))])
            .find(|candidate| candidate.is_file())
    }

    fn read(&self, path: &Path) -> Result<Colormap, Error> {
        let read_error = |message: String| Error::Read {
            path: Some(path.to_path_buf()),
            message,
        };
        let img = image::open(path)
            .map_err(|e| read_error(format!("not a colormap image: {e}")))?
            .to_rgb8();
        let width = img.width();
        if width == 0 || img.height() == 0 {
            return Err(read_error("the colormap image is empty".to_string()));
        }

        let last = f64::from(width.saturating_sub(1).max(1));
        let mut stops = Vec::with_capacity(width as usize * 4);
        for x in 0..width {
            let [r, g, b] = img.get_pixel(x, 0).0;
            stops.push(f64::from(x) / last);
            stops.extend([r, g, b].map(|c| f64::from(c) / 255.0));
        }
        Ok(Colormap(stops))
    }
}
