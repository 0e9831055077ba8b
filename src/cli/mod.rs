//! CLI support for valgen
//!
//! Provides programmatic access to the `valgen` commands so they can be
//! embedded in documentation build scripts.

mod inspect;
mod logging;
mod samples;

pub use inspect::{execute_expand, execute_parse, execute_source, execute_symbols};
pub use logging::{LoggingConfig, init_logging};
pub use samples::{SamplesOptions, execute_samples};

use std::io;

use thiserror::Error;

use crate::TypeTable;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Expansion error: {0}")]
    Expand(#[from] crate::ExpandError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No expression provided. Pass one as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Invalid type definition '{0}', expected NAME=EXPRESSION")]
    InvalidTypeDefinition(String),
}

/// Builds a type table from `NAME=EXPRESSION` arguments.
pub fn parse_type_definitions(definitions: &[String]) -> Result<TypeTable, CliError> {
    let mut table = TypeTable::new();
    for definition in definitions {
        let (name, expression) = definition
            .split_once('=')
            .filter(|(name, _)| !name.trim().is_empty())
            .ok_or_else(|| CliError::InvalidTypeDefinition(definition.clone()))?;
        table.define(name.trim().trim_matches(['<', '>']), expression.trim());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_definitions() {
        let table = parse_type_definitions(&[
            "color=red | blue".to_string(),
            "<width> = thin | thick".to_string(),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("color"), Some("red | blue"));
        assert_eq!(table.get("width"), Some("thin | thick"));
    }

    #[test]
    fn test_rejects_missing_name() {
        assert!(matches!(
            parse_type_definitions(&["=red".to_string()]),
            Err(CliError::InvalidTypeDefinition(_))
        ));
    }
}
