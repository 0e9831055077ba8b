//! Canonical source printer.
//!
//! [`to_source`] is the inverse of the parser: re-parsing its output yields a
//! tree equal to the one printed. Whitespace and quoting are normalized, so the
//! text itself may differ from what was originally written.

use crate::{
    ast::{Node, SeqOp},
    convert::{NodeError, json_to_node},
};

pub fn to_source(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Print a node held in the one-key JSON encoding.
///
/// Fails with [`NodeError::UnknownNodeType`] rather than skipping any tag it
/// does not recognize.
pub fn to_source_json(value: &serde_json::Value) -> Result<String, NodeError> {
    let node = json_to_node(value)?;
    Ok(to_source(&node))
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Identifier(name) => out.push_str(name),
        Node::Type(name) => {
            out.push('<');
            out.push_str(name);
            out.push('>');
        }
        Node::StringLiteral(text) => write_string(text, out),
        Node::ZeroOrOne(expr) => write_postfix(expr, "?", out),
        Node::ZeroOrMore(expr) => write_postfix(expr, "*", out),
        Node::OneOrMore(expr) => write_postfix(expr, "+", out),
        Node::CommaList(expr) => write_postfix(expr, "#", out),
        Node::Range { expr, start, end } => {
            write_postfix(expr, &format!("{{{},{}}}", start, end), out)
        }
        Node::Group(expr) => {
            out.push('[');
            write_node(expr, out);
            out.push(']');
        }
        Node::And(children) => write_sequence(children, SeqOp::And, out),
        Node::PermutedAnd(children) => write_sequence(children, SeqOp::PermutedAnd, out),
        Node::InclusiveOr(children) => write_sequence(children, SeqOp::InclusiveOr, out),
        Node::ExclusiveOr(children) => write_sequence(children, SeqOp::ExclusiveOr, out),
    }
}

fn write_sequence(children: &[Node], op: SeqOp, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            out.push_str(op.separator());
        }
        write_node(child, out);
    }
}

fn write_postfix(expr: &Node, suffix: &str, out: &mut String) {
    // Closures bind to a single term; anything wider needs brackets to
    // survive a re-parse.
    let needs_group = !(expr.is_leaf() || matches!(expr, Node::Group(_)));
    if needs_group {
        out.push('[');
    }
    write_node(expr, out);
    if needs_group {
        out.push(']');
    }
    out.push_str(suffix);
}

/// Picks a quote style the literal does not contain.
///
/// Assumes the text is one the lexer could produce; a literal holding `"`,
/// `'` and `’` together has no quoting that re-parses.
fn write_string(text: &str, out: &mut String) {
    let (open, close) = if text.is_empty() {
        ('‘', '’')
    } else if !text.contains('"') {
        ('"', '"')
    } else if !text.contains('\'') {
        ('\'', '\'')
    } else {
        ('‘', '’')
    };
    out.push(open);
    out.push_str(text);
    out.push(close);
}
