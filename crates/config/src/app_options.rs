//! Application options: the string defaults, the CLI-to-library rename table
//! and the typed projection used by the front-end.

use std::collections::HashMap;

use logging::Verbosity;
use once_cell::sync::Lazy;
use options::{Direction, OptionType, Options, closest_name};
use serde::Serialize;
use tracing::warn;

use crate::entry::OptionsDict;

/// Application option names and their default values, as strings.
pub const DEFAULT_APP_OPTIONS: [(&str, &str); 34] = [
    ("input", ""),
    ("output", ""),
    ("list-bindings", "false"),
    ("no-background", "false"),
    ("config", ""),
    ("no-config", "false"),
    ("no-render", "false"),
    ("rendering-backend", "auto"),
    ("max-size", ""),
    ("animation-time", ""),
    ("watch", "false"),
    ("load-plugins", ""),
    ("screenshot-filename", "{app}/{model}_{n}.png"),
    ("verbose", "info"),
    ("multi-file-mode", "single"),
    ("recursive-dir-add", "false"),
    ("remove-empty-file-groups", "false"),
    ("resolution", "1000, 600"),
    ("position", ""),
    ("colormap-file", ""),
    ("camera-position", ""),
    ("camera-focal-point", ""),
    ("camera-view-up", ""),
    ("camera-view-angle", "0.0"),
    ("camera-direction", ""),
    ("camera-zoom-factor", "0.0"),
    ("camera-azimuth-angle", "0.0"),
    ("camera-elevation-angle", "0.0"),
    ("reference", ""),
    ("reference-threshold", "0.04"),
    ("interaction-test-record", ""),
    ("interaction-test-play", ""),
    ("command-script", ""),
    ("frame-rate", "30.0"),
];

/// CLI option names and the library option each one drives.
pub const LIB_OPTION_NAMES: [(&str, &str); 71] = [
    ("loading-progress", "ui.loader_progress"),
    ("animation-progress", "ui.animation_progress"),
    ("up", "scene.up_direction"),
    ("axis", "ui.axis"),
    ("grid", "render.grid.enable"),
    ("grid-absolute", "render.grid.absolute"),
    ("grid-unit", "render.grid.unit"),
    ("grid-subdivisions", "render.grid.subdivisions"),
    ("grid-color", "render.grid.color"),
    ("axes-grid", "render.axes_grid.enable"),
    ("edges", "render.show_edges"),
    ("armature", "render.armature.enable"),
    ("camera-index", "scene.camera.index"),
    ("interaction-trackball", "interactor.trackball"),
    ("invert-zoom", "interactor.invert_zoom"),
    ("animation-autoplay", "scene.animation.autoplay"),
    ("animation-index", "scene.animation.index"),
    ("animation-indices", "scene.animation.indices"),
    ("animation-speed-factor", "scene.animation.speed_factor"),
    ("force-reader", "scene.force_reader"),
    ("font-file", "ui.font_file"),
    ("font-scale", "ui.scale"),
    ("point-sprites", "model.point_sprites.enable"),
    ("point-sprites-type", "model.point_sprites.type"),
    ("point-sprites-size", "model.point_sprites.size"),
    ("point-size", "render.point_size"),
    ("line-width", "render.line_width"),
    ("backface-type", "render.backface_type"),
    ("color", "model.color.rgb"),
    ("opacity", "model.color.opacity"),
    ("roughness", "model.material.roughness"),
    ("metallic", "model.material.metallic"),
    ("base-ior", "model.material.base_ior"),
    ("hdri-file", "render.hdri.file"),
    ("hdri-ambient", "render.hdri.ambient"),
    ("hdri-skybox", "render.background.skybox"),
    ("texture-matcap", "model.matcap.texture"),
    ("texture-base-color", "model.color.texture"),
    ("texture-material", "model.material.texture"),
    ("texture-emissive", "model.emissive.texture"),
    ("emissive-factor", "model.emissive.factor"),
    ("texture-normal", "model.normal.texture"),
    ("normal-scale", "model.normal.scale"),
    ("background-color", "render.background.color"),
    ("fps", "ui.fps"),
    ("filename", "ui.filename"),
    ("metadata", "ui.metadata"),
    ("blur-background", "render.background.blur.enable"),
    ("blur-coc", "render.background.blur.coc"),
    ("scalar-coloring", "model.scivis.enable"),
    ("coloring-array", "model.scivis.array_name"),
    ("light-intensity", "render.light.intensity"),
    ("coloring-component", "model.scivis.component"),
    ("coloring-by-cells", "model.scivis.cells"),
    ("coloring-range", "model.scivis.range"),
    ("coloring-scalar-bar", "ui.scalar_bar"),
    ("colormap", "model.scivis.colormap"),
    ("colormap-discretization", "model.scivis.discretization"),
    ("volume", "model.volume.enable"),
    ("volume-inverse", "model.volume.inverse"),
    ("camera-orthographic", "scene.camera.orthographic"),
    ("raytracing", "render.raytracing.enable"),
    ("raytracing-samples", "render.raytracing.samples"),
    ("raytracing-denoise", "render.raytracing.denoise"),
    ("translucency-support", "render.effect.translucency_support"),
    ("ambient-occlusion", "render.effect.ambient_occlusion"),
    ("anti-aliasing", "render.effect.antialiasing.enable"),
    ("anti-aliasing-mode", "render.effect.antialiasing.mode"),
    ("tone-mapping", "render.effect.tone_mapping"),
    ("final-shader", "render.effect.final_shader"),
    ("textures-transform", "model.textures_transform"),
];

/// Rename table as a map.
static RENAMES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LIB_OPTION_NAMES.iter().copied().collect());

/// The default application options dictionary.
pub fn default_app_options() -> OptionsDict {
    DEFAULT_APP_OPTIONS
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Whether `name` is an application option.
pub fn is_app_option(name: &str) -> bool {
    DEFAULT_APP_OPTIONS.iter().any(|(k, _)| *k == name)
}

/// Library option name for a CLI option name, if it has one.
pub fn lib_option_name(cli_name: &str) -> Option<&'static str> {
    RENAMES.get(cli_name).copied()
}

/// Closest known option name to `name` and its edit distance.
///
/// Searches application names and CLI names, then library and reader option
/// names when `include_lib_and_readers` is set.
pub fn closest_option(
    name: &str,
    include_lib_and_readers: bool,
    reader_names: &[String],
) -> (String, usize) {
    let app = DEFAULT_APP_OPTIONS.iter().map(|(k, _)| *k);
    let cli = LIB_OPTION_NAMES.iter().map(|(k, _)| *k);
    let mut candidates: Vec<&str> = app.chain(cli).collect();
    if include_lib_and_readers {
        candidates.extend(Options::all_names());
        candidates.extend(reader_names.iter().map(String::as_str));
    }
    closest_name(name, candidates)
        .map(|(found, dist)| (found.to_string(), dist))
        .unwrap_or_default()
}

/// Camera overrides applied after a file is loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraConfiguration {
    /// `camera-position`; used only when it has 3 values.
    pub position: Vec<f64>,
    /// `camera-focal-point`; used only when it has 3 values.
    pub focal_point: Vec<f64>,
    /// `camera-view-up`.
    pub view_up: Option<Direction>,
    /// `camera-view-angle`; ignored when not positive.
    pub view_angle: f64,
    /// `camera-direction`.
    pub direction: Option<Direction>,
    /// `camera-zoom-factor`.
    pub zoom_factor: f64,
    /// `camera-azimuth-angle`.
    pub azimuth_angle: f64,
    /// `camera-elevation-angle`.
    pub elevation_angle: f64,
}

/// Typed application options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppOptions {
    /// Render to this file instead of a window; `-` is stdout.
    pub output: String,
    /// Print the interaction bindings and exit.
    pub bindings_list: bool,
    /// Transparent background in output images.
    pub no_background: bool,
    /// Do not create a window.
    pub no_render: bool,
    /// Rendering backend name.
    pub rendering_backend: String,
    /// Skip files larger than this, in MiB.
    pub max_size: Option<f64>,
    /// Animation time to load.
    pub animation_time: Option<f64>,
    /// Reload files when they change on disk.
    pub watch: bool,
    /// Interactive frame rate.
    pub frame_rate: f64,
    /// Plugins to load.
    pub plugins: Vec<String>,
    /// Screenshot filename template.
    pub screenshot_filename: String,
    /// Verbosity level name.
    pub verbose: String,
    /// `single`, `all` or `dir`.
    pub multi_file_mode: String,
    /// Recurse into directories given as inputs.
    pub recursive_dir_add: bool,
    /// Drop file groups with no loadable file.
    pub remove_empty_file_groups: bool,
    /// Window size.
    pub resolution: Vec<i32>,
    /// Window position.
    pub position: Vec<i32>,
    /// Colormap image to load into `model.scivis.colormap`.
    pub colormap_file: String,
    /// Camera overrides.
    pub camera: CameraConfiguration,
    /// Reference image for regression testing.
    pub reference: String,
    /// Allowed difference against the reference image.
    pub reference_threshold: f64,
    /// Record interactions into this file.
    pub interaction_test_record: String,
    /// Replay interactions from this file.
    pub interaction_test_play: String,
    /// Command script to run.
    pub command_script: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        let mut opts = Self::blank();
        opts.project(&default_app_options());
        opts
    }
}

impl AppOptions {
    /// Zero values, before any projection.
    fn blank() -> Self {
        Self {
            output: String::new(),
            bindings_list: false,
            no_background: false,
            no_render: false,
            rendering_backend: String::new(),
            max_size: None,
            animation_time: None,
            watch: false,
            frame_rate: 0.0,
            plugins: Vec::new(),
            screenshot_filename: String::new(),
            verbose: String::new(),
            multi_file_mode: String::new(),
            recursive_dir_add: false,
            remove_empty_file_groups: false,
            resolution: Vec::new(),
            position: Vec::new(),
            colormap_file: String::new(),
            camera: CameraConfiguration {
                position: Vec::new(),
                focal_point: Vec::new(),
                view_up: None,
                view_angle: 0.0,
                direction: None,
                zoom_factor: 0.0,
                azimuth_angle: 0.0,
                elevation_angle: 0.0,
            },
            reference: String::new(),
            reference_threshold: 0.0,
            interaction_test_record: String::new(),
            interaction_test_play: String::new(),
            command_script: String::new(),
        }
    }

    /// Update every field from its string in `dict`.
    ///
    /// A value that does not parse is reported and the field keeps its
    /// previous value. Optional fields become `None` on an empty string.
    pub fn project(&mut self, dict: &OptionsDict) {
        field(dict, "output", &mut self.output);
        field(dict, "list-bindings", &mut self.bindings_list);
        field(dict, "no-background", &mut self.no_background);
        field(dict, "no-render", &mut self.no_render);
        field(dict, "rendering-backend", &mut self.rendering_backend);
        optional(dict, "max-size", &mut self.max_size);
        optional(dict, "animation-time", &mut self.animation_time);
        field(dict, "frame-rate", &mut self.frame_rate);
        field(dict, "watch", &mut self.watch);
        field(dict, "load-plugins", &mut self.plugins);
        field(dict, "screenshot-filename", &mut self.screenshot_filename);
        field(dict, "verbose", &mut self.verbose);
        field(dict, "multi-file-mode", &mut self.multi_file_mode);
        field(dict, "recursive-dir-add", &mut self.recursive_dir_add);
        field(dict, "remove-empty-file-groups", &mut self.remove_empty_file_groups);
        field(dict, "resolution", &mut self.resolution);
        field(dict, "position", &mut self.position);
        field(dict, "colormap-file", &mut self.colormap_file);

        let cam = &mut self.camera;
        field(dict, "camera-position", &mut cam.position);
        field(dict, "camera-focal-point", &mut cam.focal_point);
        optional(dict, "camera-view-up", &mut cam.view_up);
        field(dict, "camera-view-angle", &mut cam.view_angle);
        optional(dict, "camera-direction", &mut cam.direction);
        field(dict, "camera-zoom-factor", &mut cam.zoom_factor);
        field(dict, "camera-azimuth-angle", &mut cam.azimuth_angle);
        field(dict, "camera-elevation-angle", &mut cam.elevation_angle);

        field(dict, "reference", &mut self.reference);
        field(dict, "reference-threshold", &mut self.reference_threshold);
        field(dict, "interaction-test-record", &mut self.interaction_test_record);
        field(dict, "interaction-test-play", &mut self.interaction_test_play);
        field(dict, "command-script", &mut self.command_script);
    }

    /// Parsed `verbose` level, if it names one.
    pub fn verbosity(&self) -> Option<Verbosity> {
        Verbosity::from_name(&self.verbose)
    }
}

/// Parse `dict[name]` into `slot`, keeping the old value on failure.
fn field<T: OptionType>(dict: &OptionsDict, name: &str, slot: &mut T) {
    let Some(text) = dict.get(name) else { return };
    match T::parse(text) {
        Ok(value) => *slot = value,
        Err(_) => warn!("Could not parse '{text}' into '{name}' option"),
    }
}

/// Like [`field`], with an empty string meaning "no value".
fn optional<T: OptionType>(dict: &OptionsDict, name: &str, slot: &mut Option<T>) {
    let Some(text) = dict.get(name) else { return };
    if text.is_empty() {
        *slot = None;
        return;
    }
    match T::parse(text) {
        Ok(value) => *slot = Some(value),
        Err(_) => warn!("Could not parse '{text}' into '{name}' option"),
    }
}
