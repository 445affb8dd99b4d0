//! Decide whether an options entry applies to an input path.
//!
//! Globs without a path separator match the file name at any depth, so
//! `*.vtp` applies to `/data/cow.vtp`. Other globs and regexes match the
//! whole path.
//!
//! Compiled patterns live in a bounded LRU cache. Patterns that fail to
//! compile are cached as permanent non-matches and reported once through
//! [`PatternDiagnostics`].

use std::{
    collections::HashSet,
    num::NonZeroUsize,
    path::MAIN_SEPARATOR,
    sync::Arc,
};

use lru::LruCache;
use parking_lot::Mutex;
use regex::{Regex, RegexBuilder};
use tracing::error;

use crate::{
    entry::{MatchType, OptionsEntry},
    glob::PathGlob,
};

/// Default maximum number of cached compiled patterns.
const DEFAULT_CAPACITY: usize = 256;

/// Set of malformed patterns already reported.
#[derive(Debug, Default)]
pub struct PatternDiagnostics {
    /// Patterns reported so far.
    reported: Mutex<HashSet<String>>,
}

impl PatternDiagnostics {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `pattern`; true the first time it is seen.
    pub fn first_report(&self, pattern: &str) -> bool {
        self.reported.lock().insert(pattern.to_string())
    }

    /// Number of distinct patterns reported.
    pub fn len(&self) -> usize {
        self.reported.lock().len()
    }

    /// Whether nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.reported.lock().is_empty()
    }
}

/// Cache key: the same text compiles differently as a glob and as a regex.
type CacheKey = (MatchType, String);

/// A compiled selector.
enum Compiled {
    /// Anchored, case-insensitive regex.
    Regex(Regex),
    /// Path glob.
    Glob(PathGlob),
}

impl Compiled {
    /// Whether `input` is selected.
    fn is_match(&self, input: &str) -> bool {
        match self {
            Self::Regex(re) => re.is_match(input),
            Self::Glob(glob) => glob.is_match(input),
        }
    }
}

/// Thread-safe pattern matcher with a compiled-pattern cache.
pub struct PatternMatcher {
    /// Compiled patterns; `None` marks a pattern that failed to compile.
    cache: Mutex<LruCache<CacheKey, Option<Arc<Compiled>>>>,
    /// Shared record of reported malformed patterns.
    diagnostics: Arc<PatternDiagnostics>,
    /// Path separator used by glob translation.
    separator: char,
}

impl PatternMatcher {
    /// Create a matcher reporting through `diagnostics`.
    pub fn new(diagnostics: Arc<PatternDiagnostics>) -> Self {
        Self::with_capacity(diagnostics, DEFAULT_CAPACITY)
    }

    /// Create a matcher with a specific cache capacity.
    pub fn with_capacity(diagnostics: Arc<PatternDiagnostics>, capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(cap)),
            diagnostics,
            separator: MAIN_SEPARATOR,
        }
    }

    /// Use `separator` instead of the platform separator for globs.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// The diagnostics collaborator.
    pub fn diagnostics(&self) -> &Arc<PatternDiagnostics> {
        &self.diagnostics
    }

    /// Whether `entry` applies to `input`.
    pub fn matches(&self, entry: &OptionsEntry, input: &str) -> bool {
        if entry.is_unconditional() {
            return true;
        }
        match entry.match_type {
            MatchType::Unconditional => true,
            MatchType::Exact => entry.pattern == input,
            MatchType::Glob | MatchType::Regex => self
                .compiled(entry)
                .is_some_and(|compiled| compiled.is_match(input)),
        }
    }

    /// Compiled form of the entry pattern.
    fn compiled(&self, entry: &OptionsEntry) -> Option<Arc<Compiled>> {
        let key = (entry.match_type, entry.pattern.clone());
        if let Some(found) = self.cache.lock().get(&key) {
            return found.clone();
        }

        let compiled = self.compile(entry).map(Arc::new);
        self.cache.lock().put(key, compiled.clone());
        compiled
    }

    /// Compile without caching, reporting failures once.
    fn compile(&self, entry: &OptionsEntry) -> Option<Compiled> {
        let compiled = if entry.match_type == MatchType::Glob {
            PathGlob::new(&entry.pattern, self.separator)
                .map(Compiled::Glob)
                .map_err(|e| e.to_string())
        } else {
            RegexBuilder::new(&format!("^(?:{})$", entry.pattern))
                .case_insensitive(true)
                .build()
                .map(Compiled::Regex)
                .map_err(|e| e.to_string())
        };

        match compiled {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                if self.diagnostics.first_report(&entry.pattern) {
                    error!(
                        "There was an error in the config {} for {} pattern `{}`: {}",
                        entry.source, entry.match_type, entry.pattern, e
                    );
                }
                None
            }
        }
    }
}
