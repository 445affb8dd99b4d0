//! Value types that only exist as library options.

use serde::Serialize;

/// RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color(pub [f64; 3]);

impl Color {
    /// Red component.
    pub fn r(&self) -> f64 {
        self.0[0]
    }
    /// Green component.
    pub fn g(&self) -> f64 {
        self.0[1]
    }
    /// Blue component.
    pub fn b(&self) -> f64 {
        self.0[2]
    }
}

/// A 3D direction, not necessarily normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Direction(pub [f64; 3]);

impl Direction {
    /// X component.
    pub fn x(&self) -> f64 {
        self.0[0]
    }
    /// Y component.
    pub fn y(&self) -> f64 {
        self.0[1]
    }
    /// Z component.
    pub fn z(&self) -> f64 {
        self.0[2]
    }
}

/// A scalar that can be written as a percentage or a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ratio(pub f64);

/// Flat list of `value, r, g, b` stops.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Colormap(pub Vec<f64>);

impl Colormap {
    /// True when the colormap has no stops.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of `value, r, g, b` stops.
    pub fn stops(&self) -> usize {
        self.0.len() / 4
    }
}

/// Row-major 3x3 matrix applied to texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform2d(pub [f64; 9]);

impl Transform2d {
    /// The identity transform.
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Compose scale, translation and rotation (degrees) into a matrix.
    pub fn from_parts(scale: [f64; 2], translation: [f64; 2], angle_degrees: f64) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self([
            scale[0] * cos,
            -scale[0] * sin,
            translation[0],
            scale[1] * sin,
            scale[1] * cos,
            translation[1],
            0.0,
            0.0,
            1.0,
        ])
    }
}

impl Default for Transform2d {
    fn default() -> Self {
        Self::IDENTITY
    }
}
