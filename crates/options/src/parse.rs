//! String parsing and formatting for every option value type.
//!
//! Each type implements [`OptionType`], a parse/format pair. Parsing is
//! whitespace tolerant; formatting produces the canonical string that
//! `get_as_string` returns and that dynamic entries store.

use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::ParseError,
    types::{Color, Colormap, Direction, Ratio, Transform2d},
};

/// Functional color notations: `rgb(...)`, `hsv(...)`, `hsl(...)`, `hwb(...)`, `cmyk(...)`.
static COLOR_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(rgb|hsv|hsl|hwb|cmyk)\s*\((.*)\)$").expect("valid color function regex")
});

/// Letter direction form, e.g. `+X`, `-XY+Z`.
static DIRECTION_LETTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([+-]?)(x?)([+-]?)(y?)([+-]?)(z?)$").expect("valid direction regex")
});

/// A type that can be stored in an option and round-tripped through a string.
pub trait OptionType: Sized {
    /// Parse from user-provided text.
    fn parse(s: &str) -> Result<Self, ParseError>;
    /// Canonical string form.
    fn format(&self) -> String;
}

/// Parse `s` into `T`.
pub fn parse<T: OptionType>(s: &str) -> Result<T, ParseError> {
    T::parse(s)
}

/// Format `value` into its canonical string.
pub fn format<T: OptionType>(value: &T) -> String {
    value.format()
}

impl OptionType for bool {
    fn parse(s: &str) -> Result<Self, ParseError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            other => Err(ParseError::new(format!(
                "Cannot parse '{other}' into a boolean"
            ))),
        }
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

impl OptionType for i32 {
    fn parse(s: &str) -> Result<Self, ParseError> {
        let trimmed = s.trim();
        trimmed
            .parse::<Self>()
            .map_err(|e| ParseError::new(format!("Cannot parse '{trimmed}' into an int: {e}")))
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

impl OptionType for f64 {
    fn parse(s: &str) -> Result<Self, ParseError> {
        parse_double(s)
    }

    fn format(&self) -> String {
        format_double(*self)
    }
}

impl OptionType for Ratio {
    fn parse(s: &str) -> Result<Self, ParseError> {
        let trimmed = s.trim();
        if let Some(percent) = trimmed.strip_suffix('%') {
            return Ok(Self(parse_double(percent)? / 100.0));
        }
        match trimmed.matches(['/', ':']).count() {
            0 => Ok(Self(parse_double(trimmed)?)),
            1 => {
                let (num, den) = trimmed.split_once(['/', ':']).ok_or_else(|| {
                    ParseError::new(format!("Cannot parse '{trimmed}' into a ratio"))
                })?;
                let ratio = parse_double(num)? / parse_double(den)?;
                if !ratio.is_finite() {
                    return Err(ParseError::new(format!(
                        "Ratio '{trimmed}' is not a finite number"
                    )));
                }
                Ok(Self(ratio))
            }
            _ => Err(ParseError::new(format!(
                "Cannot parse '{trimmed}' into a ratio: too many separators"
            ))),
        }
    }

    fn format(&self) -> String {
        format_double(self.0)
    }
}

impl OptionType for String {
    fn parse(s: &str) -> Result<Self, ParseError> {
        Ok(s.trim().to_string())
    }

    fn format(&self) -> String {
        self.clone()
    }
}

impl OptionType for PathBuf {
    fn parse(s: &str) -> Result<Self, ParseError> {
        Ok(collapse_path(Path::new(s.trim())))
    }

    fn format(&self) -> String {
        self.to_string_lossy().into_owned()
    }
}

impl<T: OptionType> OptionType for Vec<T> {
    fn parse(s: &str) -> Result<Self, ParseError> {
        if s.trim().is_empty() {
            return Ok(Vec::new());
        }
        s.split(',').map(T::parse).collect()
    }

    fn format(&self) -> String {
        self.iter().map(T::format).collect::<Vec<_>>().join(",")
    }
}

impl OptionType for Color {
    fn parse(s: &str) -> Result<Self, ParseError> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex_color(hex);
        }
        if let Some(caps) = COLOR_FUNCTION.captures(trimmed) {
            return parse_color_function(&caps[1], &caps[2]);
        }
        if let Some(color) = named_color(trimmed) {
            return Ok(color);
        }
        let values = parse_doubles(trimmed)?;
        let rgb: [f64; 3] = values.try_into().map_err(|v: Vec<f64>| {
            ParseError::new(format!("Color needs 3 components, got {}", v.len()))
        })?;
        Ok(Self(rgb))
    }

    fn format(&self) -> String {
        match hex_bytes(&self.0) {
            Some([r, g, b]) => format!("#{r:02x}{g:02x}{b:02x}"),
            None => join_doubles(&self.0),
        }
    }
}

impl OptionType for Direction {
    fn parse(s: &str) -> Result<Self, ParseError> {
        let trimmed = s.trim();
        if let Some(caps) = DIRECTION_LETTERS.captures(trimmed) {
            let dangling = || {
                ParseError::new(format!(
                    "Cannot parse '{trimmed}' into a direction: sign without axis"
                ))
            };
            let mut dir = [0.0; 3];
            let mut sign = 1.0;
            let mut pending_sign = false;
            let mut any = false;
            for (axis, value) in dir.iter_mut().enumerate() {
                let sign_text = &caps[1 + 2 * axis];
                let letter = &caps[2 + 2 * axis];
                if !sign_text.is_empty() {
                    if pending_sign {
                        return Err(dangling());
                    }
                    sign = if sign_text == "-" { -1.0 } else { 1.0 };
                    pending_sign = true;
                }
                if !letter.is_empty() {
                    *value = sign;
                    pending_sign = false;
                    any = true;
                }
            }
            if pending_sign {
                return Err(dangling());
            }
            if any {
                return Ok(Self(dir));
            }
        }
        let values = parse_doubles(trimmed)?;
        let xyz: [f64; 3] = values.try_into().map_err(|v: Vec<f64>| {
            ParseError::new(format!("Direction needs 3 components, got {}", v.len()))
        })?;
        Ok(Self(xyz))
    }

    fn format(&self) -> String {
        let magnitudes: Vec<f64> = self.0.iter().filter(|v| **v != 0.0).map(|v| v.abs()).collect();
        let Some(first) = magnitudes.first() else {
            return join_doubles(&self.0);
        };
        if magnitudes.iter().any(|m| (m - first).abs() > 1e-12 * first) {
            return join_doubles(&self.0);
        }
        let mut out = String::new();
        let mut positive: Option<bool> = None;
        for (value, axis) in self.0.iter().zip(['X', 'Y', 'Z']) {
            if *value == 0.0 {
                continue;
            }
            let is_positive = *value > 0.0;
            if positive != Some(is_positive) {
                out.push(if is_positive { '+' } else { '-' });
                positive = Some(is_positive);
            }
            out.push(axis);
        }
        out
    }
}

impl OptionType for Colormap {
    fn parse(s: &str) -> Result<Self, ParseError> {
        if s.trim().is_empty() {
            return Ok(Self(Vec::new()));
        }
        let tokens: Vec<&str> = s.split(',').map(str::trim).collect();
        let mut out = Vec::with_capacity(tokens.len() * 2);
        let mut i = 0;
        while i < tokens.len() {
            let value = parse_double(tokens[i])?;
            if !(0.0..=1.0).contains(&value) {
                return Err(ParseError::new(format!(
                    "Colormap value {} is outside of the [0, 1] range",
                    tokens[i]
                )));
            }
            i += 1;
            let Some(next) = tokens.get(i) else {
                return Err(ParseError::new(
                    "Colormap has an incorrect number of tokens: missing color",
                ));
            };
            let color = if next.parse::<f64>().is_ok() {
                let Some(triple) = tokens.get(i..i + 3) else {
                    return Err(ParseError::new(
                        "Colormap has an incorrect number of tokens: incomplete color",
                    ));
                };
                i += 3;
                Color([
                    parse_double(triple[0])?,
                    parse_double(triple[1])?,
                    parse_double(triple[2])?,
                ])
            } else {
                i += 1;
                Color::parse(next)?
            };
            out.push(value);
            out.extend_from_slice(&color.0);
        }
        Ok(Self(out))
    }

    fn format(&self) -> String {
        if self.0.len() % 4 != 0 {
            return join_doubles(&self.0);
        }
        self.0
            .chunks_exact(4)
            .map(|stop| {
                format!(
                    "{},{}",
                    format_double(stop[0]),
                    Color([stop[1], stop[2], stop[3]]).format()
                )
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl OptionType for Transform2d {
    fn parse(s: &str) -> Result<Self, ParseError> {
        let trimmed = s.trim();
        if trimmed.contains(':') {
            return parse_transform_clauses(trimmed);
        }
        let values = parse_doubles(trimmed)?;
        let matrix: [f64; 9] = values.try_into().map_err(|v: Vec<f64>| {
            ParseError::new(format!("Transform needs 9 components, got {}", v.len()))
        })?;
        Ok(Self(matrix))
    }

    fn format(&self) -> String {
        if self.0.iter().any(|v| v.is_nan()) {
            return join_doubles(&Self::IDENTITY.0);
        }
        join_doubles(&self.0)
    }
}

/// Parse a finite double, tolerating surrounding whitespace.
fn parse_double(s: &str) -> Result<f64, ParseError> {
    let trimmed = s.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|e| ParseError::new(format!("Cannot parse '{trimmed}' into a double: {e}")))?;
    if !value.is_finite() {
        return Err(ParseError::new(format!(
            "Cannot parse '{trimmed}' into a double: out of range"
        )));
    }
    Ok(value)
}

/// Parse a comma-separated list of doubles.
fn parse_doubles(s: &str) -> Result<Vec<f64>, ParseError> {
    s.split(',').map(parse_double).collect()
}

/// Shortest decimal form; negative zero prints as `0`.
fn format_double(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Join doubles with commas.
fn join_doubles(values: &[f64]) -> String {
    values.iter().map(|v| format_double(*v)).collect::<Vec<_>>().join(",")
}

/// Lexically collapse `.` and `..` components without touching the filesystem.
fn collapse_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Convert colors whose components are exact multiples of 1/255 into bytes.
fn hex_bytes(rgb: &[f64; 3]) -> Option<[u8; 3]> {
    let mut out = [0u8; 3];
    for (byte, component) in out.iter_mut().zip(rgb) {
        let scaled = component * 255.0;
        let rounded = scaled.round();
        if !(0.0..=255.0).contains(&rounded) || (scaled - rounded).abs() > 1e-6 {
            return None;
        }
        *byte = rounded as u8;
    }
    Some(out)
}

/// `#rgb` or `#rrggbb`.
fn parse_hex_color(hex: &str) -> Result<Color, ParseError> {
    let invalid = || ParseError::new(format!("Cannot parse '#{hex}' into a color"));
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    let bytes = match hex.len() {
        3 => [
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        ],
        6 => [
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ],
        _ => return Err(invalid()),
    };
    Ok(Color(bytes.map(|b| f64::from(b) / 255.0)))
}

/// Parse one functional argument; a trailing `%` is accepted and ignored.
fn color_argument(token: &str) -> Result<f64, ParseError> {
    let trimmed = token.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
    parse_double(number)
}

/// Check that `value` lies in `[0, max]`.
fn in_range(function: &str, value: f64, max: f64) -> Result<f64, ParseError> {
    if (0.0..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ParseError::new(format!(
            "Invalid {function}() color: {value} is outside of [0, {max}]"
        )))
    }
}

/// Parse `rgb()`, `hsv()`, `hsl()`, `hwb()` and `cmyk()` notations.
fn parse_color_function(function: &str, args: &str) -> Result<Color, ParseError> {
    let function = function.to_ascii_lowercase();
    let values = args
        .split(',')
        .map(color_argument)
        .collect::<Result<Vec<_>, _>>()?;
    let expected = if function == "cmyk" { 4 } else { 3 };
    if values.len() != expected {
        return Err(ParseError::new(format!(
            "Invalid {function}() color: expected {expected} values, got {}",
            values.len()
        )));
    }
    let rgb = match function.as_str() {
        "rgb" => [
            in_range("rgb", values[0], 255.0)? / 255.0,
            in_range("rgb", values[1], 255.0)? / 255.0,
            in_range("rgb", values[2], 255.0)? / 255.0,
        ],
        "cmyk" => {
            let c = in_range("cmyk", values[0], 100.0)? / 100.0;
            let m = in_range("cmyk", values[1], 100.0)? / 100.0;
            let y = in_range("cmyk", values[2], 100.0)? / 100.0;
            let k = in_range("cmyk", values[3], 100.0)? / 100.0;
            [(1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k)]
        }
        _ => {
            let hue = in_range(&function, values[0], 360.0)?;
            let a = in_range(&function, values[1], 100.0)? / 100.0;
            let b = in_range(&function, values[2], 100.0)? / 100.0;
            match function.as_str() {
                "hsv" => hsv_to_rgb(hue, a, b),
                "hsl" => hsl_to_rgb(hue, a, b),
                _ => hwb_to_rgb(hue, a, b),
            }
        }
    };
    Ok(Color(rgb))
}

/// Chroma/hue helper shared by the HSV and HSL conversions.
fn hue_to_rgb(hue: f64, chroma: f64, offset: f64) -> [f64; 3] {
    let sector = (hue / 60.0).rem_euclid(6.0);
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    [r + offset, g + offset, b + offset]
}

/// HSV to RGB, saturation and value in `[0, 1]`.
fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [f64; 3] {
    let chroma = value * saturation;
    hue_to_rgb(hue, chroma, value - chroma)
}

/// HSL to RGB, saturation and lightness in `[0, 1]`.
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [f64; 3] {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    hue_to_rgb(hue, chroma, lightness - chroma / 2.0)
}

/// HWB to RGB, whiteness and blackness in `[0, 1]`.
fn hwb_to_rgb(hue: f64, whiteness: f64, blackness: f64) -> [f64; 3] {
    if whiteness + blackness >= 1.0 {
        let gray = whiteness / (whiteness + blackness);
        return [gray; 3];
    }
    let value = 1.0 - blackness;
    hsv_to_rgb(hue, 1.0 - whiteness / value, value)
}

/// Look up a CSS color name; case, spaces and underscores are ignored.
fn named_color(name: &str) -> Option<Color> {
    let normalized: String = name
        .chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if !normalized.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    colornames::Color::try_from(normalized.as_str())
        .ok()
        .map(|c| {
            let (r, g, b) = c.rgb();
            Color([r, g, b].map(|v| f64::from(v) / 255.0))
        })
}

/// Parse `scale:..;translation:..;angle:..` clauses.
fn parse_transform_clauses(s: &str) -> Result<Transform2d, ParseError> {
    let mut scale: Option<[f64; 2]> = None;
    let mut translation: Option<[f64; 2]> = None;
    let mut angle: Option<f64> = None;

    for clause in s.split(';') {
        let (name, values) = clause.split_once(':').ok_or_else(|| {
            ParseError::new(format!("Invalid transform clause '{clause}': expected name:values"))
        })?;
        let name = name.trim().to_ascii_lowercase();
        let values = parse_doubles(values)?;
        let duplicate = || ParseError::new(format!("Transform '{name}' is specified more than once"));
        match (name.as_str(), values.as_slice()) {
            ("scale", _) if scale.is_some() => return Err(duplicate()),
            ("scale", [v]) => scale = Some([*v, *v]),
            ("scale", [x, y]) => scale = Some([*x, *y]),
            ("translation", _) if translation.is_some() => return Err(duplicate()),
            ("translation", [x, y]) => translation = Some([*x, *y]),
            ("angle", _) if angle.is_some() => return Err(duplicate()),
            ("angle", [a]) => angle = Some(*a),
            ("scale" | "translation" | "angle", _) => {
                return Err(ParseError::new(format!(
                    "Transform '{name}' has an invalid number of values: {}",
                    values.len()
                )));
            }
            _ => {
                return Err(ParseError::new(format!(
                    "Unknown transform '{name}', expected scale, translation or angle"
                )));
            }
        }
    }

    Ok(Transform2d::from_parts(
        scale.unwrap_or([1.0, 1.0]),
        translation.unwrap_or([0.0, 0.0]),
        angle.unwrap_or(0.0),
    ))
}
