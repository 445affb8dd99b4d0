//! The option store: one value slot per schema entry.

use std::collections::BTreeMap;

use crate::{
    closest::closest_name,
    error::Error,
    schema::{OptionSpec, schema, spec},
    value::{OptionKind, OptionValue},
};

/// A full set of library options, initialized to schema defaults.
///
/// Every schema name always has a slot; optional options hold `None` until
/// they are given a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Current value per option name.
    values: BTreeMap<&'static str, Option<OptionValue>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            values: schema()
                .iter()
                .map(|spec| (spec.name, spec.default.clone()))
                .collect(),
        }
    }
}

/// Shared empty slot for lookups that miss the map.
static NO_VALUE: Option<OptionValue> = None;

/// Resolve `name` against the schema.
fn lookup(name: &str) -> Result<&'static OptionSpec, Error> {
    spec(name).ok_or_else(|| Error::Inexistent {
        name: name.to_string(),
    })
}

impl Options {
    /// Create a store with every option at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every option name in the schema, sorted.
    pub fn all_names() -> Vec<&'static str> {
        schema().iter().map(|spec| spec.name).collect()
    }

    /// Names of the options that currently hold a value.
    pub fn names(&self) -> Vec<&'static str> {
        self.values
            .iter()
            .filter(|(_, value)| value.is_some())
            .map(|(name, _)| *name)
            .collect()
    }

    /// Declared kind of `name`.
    pub fn kind(name: &str) -> Result<OptionKind, Error> {
        lookup(name).map(|spec| spec.kind)
    }

    /// Typed value of `name`.
    pub fn get(&self, name: &str) -> Result<&OptionValue, Error> {
        let spec = lookup(name)?;
        self.slot(spec).as_ref().ok_or_else(|| Error::NoValue {
            name: name.to_string(),
        })
    }

    /// Set a typed value, checking it against the declared kind.
    pub fn set(&mut self, name: &str, value: OptionValue) -> Result<&mut Self, Error> {
        let spec = lookup(name)?;
        let value = value
            .coerce(spec.kind)
            .map_err(|message| Error::Incompatible {
                name: name.to_string(),
                message,
            })?;
        self.values.insert(spec.name, Some(value));
        Ok(self)
    }

    /// Canonical string form of the value of `name`.
    pub fn get_as_string(&self, name: &str) -> Result<String, Error> {
        self.get(name).map(OptionValue::format)
    }

    /// Parse `value` with the declared kind of `name` and store it.
    pub fn set_as_string(&mut self, name: &str, value: &str) -> Result<&mut Self, Error> {
        let spec = lookup(name)?;
        let parsed = spec.kind.parse(value).map_err(|source| Error::Parse {
            name: name.to_string(),
            source,
        })?;
        self.values.insert(spec.name, Some(parsed));
        Ok(self)
    }

    /// Restore the schema default of `name` (no value for optional options).
    pub fn reset(&mut self, name: &str) -> Result<&mut Self, Error> {
        let spec = lookup(name)?;
        self.values.insert(spec.name, spec.default.clone());
        Ok(self)
    }

    /// Clear the value of an optional option.
    pub fn remove_value(&mut self, name: &str) -> Result<&mut Self, Error> {
        let spec = lookup(name)?;
        if spec.default.is_some() {
            return Err(Error::Incompatible {
                name: name.to_string(),
                message: "only optional options can be left without a value".to_string(),
            });
        }
        self.values.insert(spec.name, None);
        Ok(self)
    }

    /// Flip a boolean option. An optional boolean without a value becomes `true`.
    pub fn toggle(&mut self, name: &str) -> Result<&mut Self, Error> {
        let spec = lookup(name)?;
        if spec.kind != OptionKind::Bool {
            return Err(Error::Incompatible {
                name: name.to_string(),
                message: format!("cannot toggle a {} option", spec.kind),
            });
        }
        let next = match self.slot(spec) {
            Some(OptionValue::Bool(v)) => !v,
            _ => true,
        };
        self.values.insert(spec.name, Some(OptionValue::Bool(next)));
        Ok(self)
    }

    /// Whether `name` currently holds a value.
    pub fn has_value(&self, name: &str) -> bool {
        spec(name).is_some_and(|spec| self.slot(spec).is_some())
    }

    /// Whether `name` is declared optional.
    pub fn is_optional(name: &str) -> Result<bool, Error> {
        lookup(name).map(|spec| spec.default.is_none())
    }

    /// Compare the value of `name` in both stores (two empty slots are the same).
    pub fn is_same(&self, other: &Self, name: &str) -> Result<bool, Error> {
        let spec = lookup(name)?;
        Ok(self.slot(spec) == other.slot(spec))
    }

    /// Copy the value of `name` from `other`.
    pub fn copy_from(&mut self, other: &Self, name: &str) -> Result<&mut Self, Error> {
        let spec = lookup(name)?;
        self.values.insert(spec.name, other.slot(spec).clone());
        Ok(self)
    }

    /// Closest schema name to `name` and its edit distance.
    pub fn closest_option(name: &str) -> (String, usize) {
        closest_name(name, schema().iter().map(|spec| spec.name))
            .map(|(found, dist)| (found.to_string(), dist))
            .unwrap_or_default()
    }

    /// Slot for a known schema entry.
    fn slot(&self, spec: &OptionSpec) -> &Option<OptionValue> {
        self.values.get(spec.name).unwrap_or(&NO_VALUE)
    }
}
