//! Tagged option values and the kinds the schema declares.

use std::{fmt, path::PathBuf};

use crate::{
    error::ParseError,
    parse::{OptionType, parse},
    types::{Color, Colormap, Direction, Ratio, Transform2d},
};

/// Declared type of an option in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// `true`/`false`.
    Bool,
    /// 32-bit signed integer.
    Int,
    /// Finite double.
    Double,
    /// Double accepting `%` and fraction forms.
    Ratio,
    /// Free text.
    String,
    /// Filesystem path, lexically collapsed.
    Path,
    /// Comma-separated integers.
    IntVector,
    /// Comma-separated doubles.
    DoubleVector,
    /// Comma-separated strings.
    StringVector,
    /// RGB color.
    Color,
    /// 3D direction.
    Direction,
    /// Colormap stops.
    Colormap,
    /// 3x3 texture transform.
    Transform2d,
}

impl OptionKind {
    /// Parse `s` into a value of this kind.
    pub fn parse(self, s: &str) -> Result<OptionValue, ParseError> {
        Ok(match self {
            Self::Bool => OptionValue::Bool(parse(s)?),
            Self::Int => OptionValue::Int(parse(s)?),
            Self::Double => OptionValue::Double(parse(s)?),
            Self::Ratio => OptionValue::Ratio(parse(s)?),
            Self::String => OptionValue::String(parse(s)?),
            Self::Path => OptionValue::Path(parse(s)?),
            Self::IntVector => OptionValue::IntVector(parse(s)?),
            Self::DoubleVector => OptionValue::DoubleVector(parse(s)?),
            Self::StringVector => OptionValue::StringVector(parse(s)?),
            Self::Color => OptionValue::Color(parse(s)?),
            Self::Direction => OptionValue::Direction(parse(s)?),
            Self::Colormap => OptionValue::Colormap(parse(s)?),
            Self::Transform2d => OptionValue::Transform2d(parse(s)?),
        })
    }

    /// Short type name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Double => "double",
            Self::Ratio => "ratio",
            Self::String => "string",
            Self::Path => "path",
            Self::IntVector => "vector<int>",
            Self::DoubleVector => "vector<double>",
            Self::StringVector => "vector<string>",
            Self::Color => "color",
            Self::Direction => "direction",
            Self::Colormap => "colormap",
            Self::Transform2d => "transform2d",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum OptionValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    Ratio(Ratio),
    String(String),
    Path(PathBuf),
    IntVector(Vec<i32>),
    DoubleVector(Vec<f64>),
    StringVector(Vec<String>),
    Color(Color),
    Direction(Direction),
    Colormap(Colormap),
    Transform2d(Transform2d),
}

impl OptionValue {
    /// The kind of this value.
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Bool(_) => OptionKind::Bool,
            Self::Int(_) => OptionKind::Int,
            Self::Double(_) => OptionKind::Double,
            Self::Ratio(_) => OptionKind::Ratio,
            Self::String(_) => OptionKind::String,
            Self::Path(_) => OptionKind::Path,
            Self::IntVector(_) => OptionKind::IntVector,
            Self::DoubleVector(_) => OptionKind::DoubleVector,
            Self::StringVector(_) => OptionKind::StringVector,
            Self::Color(_) => OptionKind::Color,
            Self::Direction(_) => OptionKind::Direction,
            Self::Colormap(_) => OptionKind::Colormap,
            Self::Transform2d(_) => OptionKind::Transform2d,
        }
    }

    /// Canonical string form.
    pub fn format(&self) -> String {
        match self {
            Self::Bool(v) => v.format(),
            Self::Int(v) => v.format(),
            Self::Double(v) => v.format(),
            Self::Ratio(v) => v.format(),
            Self::String(v) => v.format(),
            Self::Path(v) => v.format(),
            Self::IntVector(v) => v.format(),
            Self::DoubleVector(v) => v.format(),
            Self::StringVector(v) => v.format(),
            Self::Color(v) => v.format(),
            Self::Direction(v) => v.format(),
            Self::Colormap(v) => v.format(),
            Self::Transform2d(v) => v.format(),
        }
    }

    /// Convert into `kind`, accepting the loose forms a caller may hand in
    /// (a double for a ratio, a double vector for fixed-size vector types).
    pub(crate) fn coerce(self, kind: OptionKind) -> Result<Self, String> {
        if self.kind() == kind {
            return Ok(self);
        }
        let given = self.kind();
        match (self, kind) {
            (Self::Double(v), OptionKind::Ratio) => Ok(Self::Ratio(Ratio(v))),
            (Self::Ratio(v), OptionKind::Double) => Ok(Self::Double(v.0)),
            (Self::String(v), OptionKind::Path) => Ok(Self::Path(PathBuf::from(v))),
            (Self::Path(v), OptionKind::String) => {
                Ok(Self::String(v.to_string_lossy().into_owned()))
            }
            (Self::DoubleVector(v), OptionKind::Color) => fixed::<3>(v).map(|a| Self::Color(Color(a))),
            (Self::DoubleVector(v), OptionKind::Direction) => {
                fixed::<3>(v).map(|a| Self::Direction(Direction(a)))
            }
            (Self::DoubleVector(v), OptionKind::Transform2d) => {
                fixed::<9>(v).map(|a| Self::Transform2d(Transform2d(a)))
            }
            (Self::DoubleVector(v), OptionKind::Colormap) if v.len() % 4 == 0 => {
                Ok(Self::Colormap(Colormap(v)))
            }
            _ => Err(format!("cannot store a {given} value into a {kind} option")),
        }
    }
}

/// Convert a vector into a fixed-size array, reporting size mismatches.
fn fixed<const N: usize>(values: Vec<f64>) -> Result<[f64; N], String> {
    values
        .try_into()
        .map_err(|v: Vec<f64>| format!("expected {N} values, got {}", v.len()))
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
