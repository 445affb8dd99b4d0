//! Typed library options for the F3D viewer.
//!
//! The store exposes a fixed schema of dotted option names (e.g.
//! `render.line_width`). Values are a closed tagged variant,
//! [`OptionValue`], selected by each name's declared [`OptionKind`]; every kind
//! has a parse/format pair so options can be driven entirely by strings:
//!
//! ```
//! use options::Options;
//!
//! let mut opts = Options::new();
//! opts.set_as_string("render.grid.subdivisions", "4").unwrap();
//! assert_eq!(opts.get_as_string("render.grid.subdivisions").unwrap(), "4");
//! ```
//!
//! Failures are reported through [`Error`]: unknown names, unparsable
//! strings, incompatible typed values and reads of optional options that
//! hold no value.

mod closest;
mod error;
mod parse;
mod schema;
mod store;
mod types;
mod value;

#[cfg(test)]
mod test_parse;
#[cfg(test)]
mod test_store;

pub use closest::{closest_name, levenshtein_distance};
pub use error::{Error, ParseError};
pub use parse::{OptionType, format, parse};
pub use schema::{OptionSpec, schema, spec};
pub use store::Options;
pub use types::{Color, Colormap, Direction, Ratio, Transform2d};
pub use value::{OptionKind, OptionValue};
