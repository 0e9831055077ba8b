use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::ast::Node;

/// Occurrence counts of the leaves found in one or more trees.
///
/// The table is an explicit accumulator: callers create one, feed it any
/// number of trees with [`SymbolTable::collect`], and read the counts back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    pub identifiers: BTreeMap<String, usize>,
    pub types: BTreeMap<String, usize>,
    pub strings: BTreeMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks `node` depth-first, counting every leaf.
    pub fn collect(&mut self, node: &Node) {
        match node {
            Node::Identifier(name) => bump(&mut self.identifiers, name),
            Node::Type(name) => bump(&mut self.types, name),
            Node::StringLiteral(text) => bump(&mut self.strings, text),
            _ => {
                for child in node.children() {
                    self.collect(child);
                }
            }
        }
    }

    /// Adds every count of `other` into this table.
    pub fn merge(&mut self, other: &SymbolTable) {
        for (target, source) in [
            (&mut self.identifiers, &other.identifiers),
            (&mut self.types, &other.types),
            (&mut self.strings, &other.strings),
        ] {
            for (name, count) in source {
                *target.entry(name.clone()).or_insert(0) += count;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty() && self.types.is_empty() && self.strings.is_empty()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "identifiers": self.identifiers,
            "types": self.types,
            "strings": self.strings,
        })
    }
}

fn bump(category: &mut BTreeMap<String, usize>, name: &str) {
    *category.entry(name.to_string()).or_insert(0) += 1;
}
