//! One-key JSON encoding of the AST.
//!
//! Every node is an object with exactly one key naming its tag:
//!
//! ```text
//! {"and": [{"identifier": "bold"}, {"type": "color"}]}
//! {"?": {"string": "none"}}
//! {"range": {"start": 1, "end": 4, "expression": {"type": "length"}}}
//! ```
//!
//! This is the interchange form for tooling that stores parsed expressions.
//! Decoding is the one place where a tag outside the known set can reach the
//! printer or the compiler, and it fails with [`NodeError::UnknownNodeType`].

use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::ast::Node;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// A tag outside the known node set.
    #[error("unknown node type '{0}'")]
    UnknownNodeType(String),

    /// A known tag whose payload has the wrong shape.
    #[error("malformed '{tag}' node: {message}")]
    Malformed { tag: String, message: String },
}

impl NodeError {
    fn malformed(tag: &str, message: impl Into<String>) -> Self {
        NodeError::Malformed {
            tag: tag.to_string(),
            message: message.into(),
        }
    }
}

/// Convert an AST node to its JSON encoding
pub fn node_to_json(node: &Node) -> Value {
    let payload = match node {
        Node::Identifier(text) | Node::Type(text) | Node::StringLiteral(text) => {
            Value::String(text.clone())
        }
        Node::ZeroOrOne(expr)
        | Node::ZeroOrMore(expr)
        | Node::OneOrMore(expr)
        | Node::CommaList(expr)
        | Node::Group(expr) => node_to_json(expr),
        Node::Range { expr, start, end } => json!({
            "start": start,
            "end": end,
            "expression": node_to_json(expr),
        }),
        Node::And(children)
        | Node::PermutedAnd(children)
        | Node::InclusiveOr(children)
        | Node::ExclusiveOr(children) => {
            Value::Array(children.iter().map(node_to_json).collect())
        }
    };

    let mut object = Map::new();
    object.insert(node.tag().to_string(), payload);
    Value::Object(object)
}

/// Convert a JSON encoding back to an AST node
pub fn json_to_node(value: &Value) -> Result<Node, NodeError> {
    let object = value
        .as_object()
        .ok_or_else(|| NodeError::malformed("node", "expected an object"))?;

    let mut entries = object.iter();
    let (tag, payload) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        (None, _) => return Err(NodeError::malformed("node", "object has no keys")),
        (Some(_), Some(_)) => {
            return Err(NodeError::malformed("node", "object has more than one key"));
        }
    };

    let node = match tag.as_str() {
        "identifier" => Node::Identifier(leaf_text(tag, payload)?),
        "type" => Node::Type(leaf_text(tag, payload)?),
        "string" => Node::StringLiteral(leaf_text(tag, payload)?),
        "?" => Node::ZeroOrOne(Box::new(json_to_node(payload)?)),
        "*" => Node::ZeroOrMore(Box::new(json_to_node(payload)?)),
        "+" => Node::OneOrMore(Box::new(json_to_node(payload)?)),
        "#" => Node::CommaList(Box::new(json_to_node(payload)?)),
        "group" => Node::Group(Box::new(json_to_node(payload)?)),
        "range" => range_from_json(payload)?,
        "and" => Node::And(children_from_json(tag, payload)?),
        "permute" => Node::PermutedAnd(children_from_json(tag, payload)?),
        "ior" => Node::InclusiveOr(children_from_json(tag, payload)?),
        "xor" => Node::ExclusiveOr(children_from_json(tag, payload)?),
        other => return Err(NodeError::UnknownNodeType(other.to_string())),
    };
    Ok(node)
}

fn leaf_text(tag: &str, payload: &Value) -> Result<String, NodeError> {
    payload
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| NodeError::malformed(tag, "expected a string"))
}

fn children_from_json(tag: &str, payload: &Value) -> Result<Vec<Node>, NodeError> {
    let items = payload
        .as_array()
        .ok_or_else(|| NodeError::malformed(tag, "expected an array of nodes"))?;

    if items.len() < 2 {
        return Err(NodeError::malformed(tag, "expected at least two operands"));
    }

    items.iter().map(json_to_node).collect()
}

fn range_from_json(payload: &Value) -> Result<Node, NodeError> {
    let bound = |key: &str| -> Result<u32, NodeError> {
        payload
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| NodeError::malformed("range", format!("missing or invalid '{}'", key)))
    };

    let start = bound("start")?;
    let end = bound("end")?;
    if start > end {
        return Err(NodeError::malformed(
            "range",
            format!("start {} is greater than end {}", start, end),
        ));
    }

    let expr = payload
        .get("expression")
        .ok_or_else(|| NodeError::malformed("range", "missing 'expression'"))?;

    Ok(Node::Range {
        expr: Box::new(json_to_node(expr)?),
        start,
        end,
    })
}
