//! The fixed library option schema: names, kinds and default values.
//!
//! No option name may start with `reset-`; that prefix is reserved for reset
//! directives in configuration entries.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{
    types::{Color, Colormap, Direction, Ratio},
    value::{OptionKind, OptionValue},
};

/// Schema entry for a single library option.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// Dotted option name, e.g. `render.line_width`.
    pub name: &'static str,
    /// Declared value kind.
    pub kind: OptionKind,
    /// Default value; `None` marks an optional option that starts without a value.
    pub default: Option<OptionValue>,
}

/// Schema entries sorted by name.
static SCHEMA: Lazy<Vec<OptionSpec>> = Lazy::new(build_schema);

/// Name to index into [`SCHEMA`].
static INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    SCHEMA
        .iter()
        .enumerate()
        .map(|(i, spec)| (spec.name, i))
        .collect()
});

/// All schema entries, sorted by name.
pub fn schema() -> &'static [OptionSpec] {
    &SCHEMA
}

/// Look up the schema entry for `name`.
pub fn spec(name: &str) -> Option<&'static OptionSpec> {
    INDEX.get(name).map(|i| &SCHEMA[*i])
}

/// Non-optional option with a default.
fn required(name: &'static str, default: OptionValue) -> OptionSpec {
    OptionSpec {
        name,
        kind: default.kind(),
        default: Some(default),
    }
}

/// Optional option, no value by default.
fn optional(name: &'static str, kind: OptionKind) -> OptionSpec {
    OptionSpec {
        name,
        kind,
        default: None,
    }
}

/// Default scivis colormap: black, red, yellow, white.
fn default_colormap() -> Colormap {
    Colormap(vec![
        0.0, 0.0, 0.0, 0.0, //
        0.4, 0.9, 0.0, 0.0, //
        0.8, 0.9, 0.9, 0.0, //
        1.0, 1.0, 1.0, 1.0,
    ])
}

/// Build the schema table.
#[allow(clippy::too_many_lines)]
fn build_schema() -> Vec<OptionSpec> {
    use OptionKind as K;
    use OptionValue as V;

    let mut specs = vec![
        required("interactor.invert_zoom", V::Bool(false)),
        required("interactor.trackball", V::Bool(false)),
        optional("model.color.opacity", K::Double),
        optional("model.color.rgb", K::Color),
        optional("model.color.texture", K::Path),
        optional("model.emissive.factor", K::Color),
        optional("model.emissive.texture", K::Path),
        optional("model.matcap.texture", K::Path),
        optional("model.material.base_ior", K::Double),
        optional("model.material.metallic", K::Double),
        optional("model.material.roughness", K::Double),
        optional("model.material.texture", K::Path),
        optional("model.normal.scale", K::Double),
        optional("model.normal.texture", K::Path),
        required("model.point_sprites.enable", V::Bool(false)),
        required("model.point_sprites.size", V::Double(10.0)),
        required("model.point_sprites.type", V::String("sphere".into())),
        optional("model.scivis.array_name", K::String),
        required("model.scivis.cells", V::Bool(false)),
        required("model.scivis.colormap", V::Colormap(default_colormap())),
        required("model.scivis.component", V::Int(-1)),
        optional("model.scivis.discretization", K::Int),
        required("model.scivis.enable", V::Bool(false)),
        optional("model.scivis.range", K::DoubleVector),
        optional("model.textures_transform", K::Transform2d),
        required("model.volume.enable", V::Bool(false)),
        required("model.volume.inverse", V::Bool(false)),
        required("render.armature.enable", V::Bool(false)),
        required("render.axes_grid.enable", V::Bool(false)),
        optional("render.backface_type", K::String),
        required("render.background.blur.coc", V::Double(20.0)),
        required("render.background.blur.enable", V::Bool(false)),
        required("render.background.color", V::Color(Color([0.2, 0.2, 0.2]))),
        required("render.background.skybox", V::Bool(false)),
        required("render.effect.ambient_occlusion", V::Bool(false)),
        required("render.effect.antialiasing.enable", V::Bool(false)),
        required("render.effect.antialiasing.mode", V::String("fxaa".into())),
        optional("render.effect.final_shader", K::String),
        required("render.effect.tone_mapping", V::Bool(false)),
        required("render.effect.translucency_support", V::Bool(false)),
        required("render.grid.absolute", V::Bool(false)),
        required("render.grid.color", V::Color(Color([0.0, 0.0, 0.0]))),
        required("render.grid.enable", V::Bool(false)),
        required("render.grid.subdivisions", V::Int(10)),
        optional("render.grid.unit", K::Double),
        required("render.hdri.ambient", V::Bool(false)),
        optional("render.hdri.file", K::Path),
        required("render.light.intensity", V::Double(1.0)),
        optional("render.line_width", K::Double),
        optional("render.point_size", K::Double),
        required("render.raytracing.denoise", V::Bool(false)),
        required("render.raytracing.enable", V::Bool(false)),
        required("render.raytracing.samples", V::Int(5)),
        optional("render.show_edges", K::Bool),
        required("scene.animation.autoplay", V::Bool(false)),
        required("scene.animation.index", V::Int(0)),
        required("scene.animation.indices", V::IntVector(vec![0])),
        required("scene.animation.speed_factor", V::Ratio(Ratio(1.0))),
        optional("scene.animation.time", K::Double),
        optional("scene.camera.index", K::Int),
        optional("scene.camera.orthographic", K::Bool),
        optional("scene.force_reader", K::String),
        required("scene.up_direction", V::Direction(Direction([0.0, 1.0, 0.0]))),
        required("ui.animation_progress", V::Bool(false)),
        required("ui.axis", V::Bool(false)),
        required("ui.cheatsheet", V::Bool(false)),
        required("ui.console", V::Bool(false)),
        required("ui.drop_zone.enable", V::Bool(false)),
        required("ui.drop_zone.info", V::String(String::new())),
        required("ui.filename", V::Bool(false)),
        required("ui.filename_info", V::String(String::new())),
        optional("ui.font_file", K::Path),
        required("ui.fps", V::Bool(false)),
        required("ui.loader_progress", V::Bool(false)),
        required("ui.metadata", V::Bool(false)),
        required("ui.scalar_bar", V::Bool(false)),
        required("ui.scale", V::Ratio(Ratio(1.0))),
    ];
    specs.sort_by(|a, b| a.name.cmp(b.name));
    specs
}
