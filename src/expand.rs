//! Type-reference expansion.
//!
//! Value expressions often refer to named types (`<color>`, `<length>`) whose
//! own grammars are known. Expanding replaces each known `<name>` with
//! `[definition]` so the compiler can enumerate concrete values instead of
//! placeholders.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::LazyLock,
};

use log::{debug, warn};
use regex::{Captures, Regex};
use thiserror::Error;

static TYPE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([-_a-zA-Z]+)>").expect("type reference pattern is valid"));

/// Default number of substitution passes before giving up.
pub const DEFAULT_MAX_PASSES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// Substitution kept changing the text, usually a self-referencing type.
    #[error("type expansion of '{expression}' did not settle after {passes} passes")]
    TooDeep { expression: String, passes: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandOptions {
    pub max_passes: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        ExpandOptions {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// Outcome of expanding one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    /// Referenced type names with no definition; left verbatim in `text`
    pub unresolved: BTreeSet<String>,
}

/// Named type definitions, each a value-expression source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTable {
    definitions: BTreeMap<String, String>,
    options: ExpandOptions,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExpandOptions) -> Self {
        TypeTable {
            definitions: BTreeMap::new(),
            options,
        }
    }

    pub fn define(&mut self, name: impl Into<String>, expression: impl Into<String>) {
        self.definitions.insert(name.into(), expression.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.definitions.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Substitutes known type references until the text no longer changes.
    pub fn expand(&self, expression: &str) -> Result<Expansion, ExpandError> {
        let mut unresolved = BTreeSet::new();
        let mut current = expression.to_string();

        for pass in 0..self.options.max_passes {
            let next = TYPE_REF
                .replace_all(&current, |caps: &Captures| {
                    let name = &caps[1];
                    match self.definitions.get(name) {
                        Some(definition) => format!("[{}]", definition),
                        None => {
                            unresolved.insert(name.to_string());
                            caps[0].to_string()
                        }
                    }
                })
                .into_owned();

            if next == current {
                debug!("expanded '{}' in {} passes", expression, pass);
                for name in &unresolved {
                    warn!("unknown type reference <{}> in '{}'", name, expression);
                }
                return Ok(Expansion {
                    text: current,
                    unresolved,
                });
            }
            current = next;
        }

        Err(ExpandError::TooDeep {
            expression: expression.to_string(),
            passes: self.options.max_passes,
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TypeTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = TypeTable::new();
        for (name, expression) in iter {
            table.define(name, expression);
        }
        table
    }
}
