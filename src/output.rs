//! Rendering of compiled expressions into sample value strings.
//!
//! This is the consumer side of the compiler: take a bounded prefix of the
//! enumeration, render each item to text and drop repeats.
//!
//! # Examples
//!
//! ```
//! use valgen::output::{SampleOptions, samples};
//!
//! let node = valgen::parse("bold? [red | blue]").unwrap();
//! let compiled = valgen::compile(&node);
//!
//! let values = samples(&compiled, &SampleOptions::default());
//! assert_eq!(values, vec!["red", "blue", "bold red", "bold blue"]);
//! ```

use std::collections::HashSet;

use crate::compiler::Compiled;

/// Default number of items requested from an enumeration.
pub const DEFAULT_SAMPLE_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleOptions {
    /// Items requested from the enumeration, before de-duplication.
    /// `None` enumerates everything.
    pub limit: Option<usize>,

    /// Drop items whose rendered text was already produced.
    pub dedup: bool,
}

impl Default for SampleOptions {
    fn default() -> Self {
        SampleOptions {
            limit: Some(DEFAULT_SAMPLE_LIMIT),
            dedup: true,
        }
    }
}

impl SampleOptions {
    /// Every item, duplicates included.
    pub fn exhaustive() -> Self {
        SampleOptions {
            limit: None,
            dedup: false,
        }
    }
}

/// Render a bounded prefix of `compiled` to text.
///
/// The limit counts enumerated items, so with de-duplication enabled fewer
/// than `limit` strings may come back.
pub fn samples(compiled: &Compiled, options: &SampleOptions) -> Vec<String> {
    let items = compiled.iter().map(|sample| sample.render());
    let items: Box<dyn Iterator<Item = String> + '_> = match options.limit {
        Some(limit) => Box::new(items.take(limit)),
        None => Box::new(items),
    };

    if !options.dedup {
        return items.collect();
    }

    let mut seen = HashSet::new();
    items.filter(|text| seen.insert(text.clone())).collect()
}
