//! Inspect the tree of an expression

use super::CliError;
use crate::{SymbolTable, TypeTable, node_to_json, parse, to_source};

/// The tree of `expression` in the one-key JSON encoding
pub fn execute_parse(expression: &str, pretty: bool) -> Result<String, CliError> {
    let node = parse(expression)?;
    let value = node_to_json(&node);
    let json = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(json)
}

/// Canonical source of `expression`
pub fn execute_source(expression: &str) -> Result<String, CliError> {
    Ok(to_source(&parse(expression)?))
}

/// Leaf frequencies across all `expressions`, as pretty JSON
pub fn execute_symbols(expressions: &[String]) -> Result<String, CliError> {
    let mut table = SymbolTable::new();
    for expression in expressions {
        table.collect(&parse(expression)?);
    }
    Ok(serde_json::to_string_pretty(&table.to_json())?)
}

/// `expression` with known type references substituted
pub fn execute_expand(expression: &str, types: &TypeTable) -> Result<String, CliError> {
    Ok(types.expand(expression)?.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let json = execute_parse("a | b", false).unwrap();
        assert_eq!(json, r#"{"xor":[{"identifier":"a"},{"identifier":"b"}]}"#);
    }

    #[test]
    fn test_source_normalizes() {
        assert_eq!(execute_source("a   'b'  [c|d]?").unwrap(), "a \"b\" [c | d]?");
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(execute_source("a ||"), Err(CliError::Parse(_))));
    }
}
