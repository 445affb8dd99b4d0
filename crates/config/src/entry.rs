//! Options entries: a dictionary of option strings plus the selector that
//! decides which input files it applies to.

use std::{collections::BTreeMap, fmt};

/// Option name to unparsed value.
pub type OptionsDict = BTreeMap<String, String>;

/// Ordered list of entries; later entries win for the same key.
pub type OptionsEntries = Vec<OptionsEntry>;

/// How an entry's pattern is compared to an input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchType {
    /// Byte-exact path equality.
    Exact,
    /// Path-aware glob.
    Glob,
    /// Case-insensitive regex over the whole path.
    #[default]
    Regex,
    /// No selector: the entry applies to every path.
    Unconditional,
}

impl MatchType {
    /// Interpret the `match-type` text of a config block.
    ///
    /// Unknown text falls back to [`MatchType::Regex`].
    pub fn from_config(text: &str) -> Self {
        match text {
            "" => Self::Unconditional,
            "exact" => Self::Exact,
            "glob" => Self::Glob,
            _ => Self::Regex,
        }
    }

    /// Config text for this match type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Glob => "glob",
            Self::Regex => "regex",
            Self::Unconditional => "",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One block of options with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionsEntry {
    /// Option values, keyed by option name.
    pub options: OptionsDict,
    /// Where the entry came from (a config file path); empty applies unconditionally.
    pub source: String,
    /// How `pattern` is matched.
    pub match_type: MatchType,
    /// The selector, or a label such as `CLI options` for unconditional entries.
    pub pattern: String,
}

impl OptionsEntry {
    /// An entry that applies to every input, labelled for diagnostics.
    pub fn unconditional(options: OptionsDict, label: impl Into<String>) -> Self {
        Self {
            options,
            source: String::new(),
            match_type: MatchType::Unconditional,
            pattern: label.into(),
        }
    }

    /// An entry selected by `pattern`, coming from `source`.
    pub fn matching(
        options: OptionsDict,
        source: impl Into<String>,
        match_type: MatchType,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            options,
            source: source.into(),
            match_type,
            pattern: pattern.into(),
        }
    }

    /// Whether this entry applies regardless of the input path.
    pub fn is_unconditional(&self) -> bool {
        self.source.is_empty()
    }

    /// Human-readable provenance used in warnings and debug traces.
    ///
    /// The bare label for unconditional entries, ``source:`pattern` (type)``
    /// otherwise.
    pub fn origin(&self) -> String {
        if self.is_unconditional() {
            self.pattern.clone()
        } else {
            format!("{}:`{}` ({})", self.source, self.pattern, self.match_type)
        }
    }
}

/// Build an [`OptionsDict`] from string pairs.
pub fn dict<K, V, I>(pairs: I) -> OptionsDict
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
