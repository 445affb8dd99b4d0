//! Path globs compiled with `globset`.
//!
//! Matching always happens on `/`-separated text. With a `\` separator both
//! the glob and the path are rewritten first, and `\` stops being an escape
//! character. `*`, `?` and character classes never match a separator; `**`
//! does.

use std::borrow::Cow;

use globset::{GlobBuilder, GlobMatcher};
use thiserror::Error;

/// The separator `globset` requires literally.
const SLASH: char = '/';

/// A glob that cannot be compiled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GlobError {
    /// Rejected by the glob parser.
    #[error(transparent)]
    Syntax(#[from] globset::Error),
    /// A character class listing nothing but the separator.
    #[error("character class `[{0}]` can only match the path separator")]
    SeparatorClass(String),
}

/// A glob compiled for one path separator.
#[derive(Debug, Clone)]
pub struct PathGlob {
    /// Compiled `/`-separated glob.
    matcher: GlobMatcher,
    /// Separator of the paths given to [`PathGlob::is_match`].
    separator: char,
}

impl PathGlob {
    /// Compile `pattern`, case-insensitively.
    ///
    /// A pattern without a separator matches the file name at any depth.
    pub fn new(pattern: &str, separator: char) -> Result<Self, GlobError> {
        let escapes = separator != '\\';
        let slashed = to_slashes(pattern, separator);
        let mut text = confine_classes(&slashed, escapes)?;
        if !slashed.contains(SLASH) {
            text.insert_str(0, "**/");
        }
        let matcher = GlobBuilder::new(&text)
            .literal_separator(true)
            .case_insensitive(true)
            .backslash_escape(escapes)
            .build()?
            .compile_matcher();
        Ok(Self { matcher, separator })
    }

    /// Whether `path` matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(&*to_slashes(path, self.separator))
    }
}

/// `text` with `separator` replaced by `/`.
fn to_slashes(text: &str, separator: char) -> Cow<'_, str> {
    if separator == SLASH || !text.contains(separator) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.replace(separator, "/"))
    }
}

/// Rewrite character classes so they cannot match `/`.
///
/// Negated classes get `/` added to their members, other classes lose it.
/// Unterminated classes are left for the glob parser to report.
fn confine_classes(pattern: &str, escapes: bool) -> Result<String, GlobError> {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' if escapes => {
                out.push(c);
                out.extend(chars.next());
            }
            '[' => {
                let rest = chars.as_str();
                if let Some(end) = class_end(rest) {
                    out.push_str(&confine(&rest[..end])?);
                    chars = rest[end + 1..].chars();
                } else {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// Offset of the `]` closing a class whose body starts `body`.
///
/// A `]` right after the opening bracket, or after its negation, is a member.
fn class_end(body: &str) -> Option<usize> {
    let negation = usize::from(body.starts_with(['!', '^']));
    let skip = match body[negation..].chars().next()? {
        ']' => negation + 1,
        _ => negation,
    };
    body[skip..].find(']').map(|i| i + skip)
}

/// Bracketed form of `class` excluding `/`.
fn confine(class: &str) -> Result<String, GlobError> {
    if let Some(members) = class.strip_prefix(['!', '^']) {
        // A trailing `-` must stay last to remain a literal.
        let at = members.strip_suffix('-').map_or(members.len(), str::len);
        return Ok(format!("[!{}/{}]", &members[..at], &members[at..]));
    }
    let members: String = class.chars().filter(|&c| c != SLASH).collect();
    if members.is_empty() {
        return Err(GlobError::SeparatorClass(class.to_string()));
    }
    Ok(format!("[{members}]"))
}
