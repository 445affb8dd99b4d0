//! Headless render engine: keeps the live options and the loaded files, and
//! knows which file formats have a reader.

use std::path::{Path, PathBuf};

use config::{InMemoryReaderOptions, RenderEngine};
use options::Options;
use tracing::debug;

/// Reader names and the extensions they open.
const READERS: &[(&str, &[&str])] = &[
    ("3DS", &["3ds"]),
    ("Alembic", &["abc"]),
    ("Assimp", &["fbx", "dae", "off", "dxf", "x", "3mf"]),
    ("Draco", &["drc"]),
    ("GLTF", &["gltf", "glb"]),
    ("OBJ", &["obj"]),
    ("OCCT", &["step", "stp", "iges", "igs", "brep"]),
    ("PLY", &["ply"]),
    ("QuakeMDL", &["mdl"]),
    ("STL", &["stl"]),
    ("USD", &["usd", "usda", "usdc", "usdz"]),
    ("VTK", &["vtk", "vtp", "vtu", "vtr", "vti", "vts", "vtm"]),
];

/// Reader options and their defaults.
const READER_OPTIONS: [(&str, &str); 5] = [
    ("Alembic.frame_rate", "24"),
    ("Draco.skip_normals", "false"),
    ("OCCT.linear_deflection", "0.1"),
    ("OCCT.angular_deflection", "0.5"),
    ("QuakeMDL.skin_index", "0"),
];

/// Reader option registry for the built-in readers.
pub fn reader_options() -> InMemoryReaderOptions {
    InMemoryReaderOptions::new(READER_OPTIONS)
}

/// Engine without a window.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    /// Live options.
    options: Options,
    /// Files in the scene.
    loaded: Vec<PathBuf>,
}

impl HeadlessEngine {
    /// Create an engine with default options and an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Files in the scene.
    pub fn loaded(&self) -> &[PathBuf] {
        &self.loaded
    }

    /// Reader that would open `path`.
    pub fn reader_for(&self, path: &Path) -> Option<&'static str> {
        if let Ok(forced) = self.options.get_as_string("scene.force_reader") {
            return READERS
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(&forced))
                .map(|(name, _)| *name);
        }
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        READERS
            .iter()
            .find(|(_, exts)| exts.contains(&ext.as_str()))
            .map(|(name, _)| *name)
    }
}

impl RenderEngine for HeadlessEngine {
    fn options(&self) -> &Options {
        &self.options
    }

    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    fn supports(&self, path: &Path) -> bool {
        self.reader_for(path).is_some()
    }

    fn load(&mut self, paths: &[PathBuf]) -> Result<(), String> {
        for path in paths {
            let reader = self
                .reader_for(path)
                .ok_or_else(|| format!("no reader for {}", path.display()))?;
            debug!("Loading {} with the {reader} reader", path.display());
        }
        self.loaded.extend_from_slice(paths);
        Ok(())
    }

    fn clear(&mut self) {
        self.loaded.clear();
    }
}
