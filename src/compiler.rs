use std::iter;

use log::debug;

use crate::{
    ast::Node,
    convert::{NodeError, json_to_node},
    generator::{Generator, Sample, Samples},
};

/// Default upper repetition count for `*`, `+` and `#`.
pub const DEFAULT_REPEAT_LIMIT: usize = 4;

/// Knobs that keep enumeration of unbounded quantifiers finite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Upper repetition count substituted for "or more" quantifiers.
    /// Explicit `{m,n}` ranges are never capped.
    pub repeat_limit: usize,

    /// When set, each draw of a repetition only sees this many items of the
    /// repeated expression.
    pub draw_limit: Option<usize>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            repeat_limit: DEFAULT_REPEAT_LIMIT,
            draw_limit: None,
        }
    }
}

/// Result of compiling a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compiled {
    /// The tree was a single leaf
    Text(String),
    Iter(Generator),
}

impl Compiled {
    /// Starts a new enumeration; a bare text yields itself once.
    pub fn iter(&self) -> Samples<'_> {
        match self {
            Compiled::Text(text) => Box::new(iter::once(Sample::Text(text.clone()))),
            Compiled::Iter(generator) => generator.iter(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Compiled::Text(text) => Some(text),
            Compiled::Iter(_) => None,
        }
    }

    pub fn as_generator(&self) -> Option<&Generator> {
        match self {
            Compiled::Text(_) => None,
            Compiled::Iter(generator) => Some(generator),
        }
    }
}

pub fn compile(node: &Node) -> Compiled {
    compile_with(node, &CompileOptions::default())
}

pub fn compile_with(node: &Node, options: &CompileOptions) -> Compiled {
    let compiled = match unwrap_groups(node) {
        leaf if leaf.is_leaf() => Compiled::Text(leaf_text(leaf)),
        inner => Compiled::Iter(Compiler { options }.generator(inner)),
    };
    debug!("compiled '{}' node", node.tag());
    compiled
}

/// Compile a tree held in the one-key JSON encoding.
///
/// Unknown tags fail with [`NodeError::UnknownNodeType`].
pub fn compile_json(
    value: &serde_json::Value,
    options: &CompileOptions,
) -> Result<Compiled, NodeError> {
    let node = json_to_node(value)?;
    Ok(compile_with(&node, options))
}

fn unwrap_groups(mut node: &Node) -> &Node {
    while let Node::Group(inner) = node {
        node = inner;
    }
    node
}

fn leaf_text(node: &Node) -> String {
    match node {
        Node::Type(name) => format!("<{}>", name),
        Node::Identifier(text) | Node::StringLiteral(text) => text.clone(),
        other => unreachable!("'{}' is not a leaf", other.tag()),
    }
}

struct Compiler<'o> {
    options: &'o CompileOptions,
}

impl Compiler<'_> {
    fn generator(&self, node: &Node) -> Generator {
        match node {
            Node::Identifier(_) | Node::Type(_) | Node::StringLiteral(_) => {
                Generator::Literal(leaf_text(node))
            }
            Node::Group(inner) => self.generator(inner),

            Node::InclusiveOr(children) => Generator::Subset(self.all(children)),
            Node::ExclusiveOr(children) => Generator::Choice(self.all(children)),
            Node::PermutedAnd(children) => Generator::Permutation(self.all(children)),
            Node::And(children) => Generator::CrossProduct(self.all(children)),

            Node::ZeroOrOne(inner) => self.repeat(inner, 0, 1),
            Node::ZeroOrMore(inner) => self.repeat(inner, 0, self.options.repeat_limit),
            Node::OneOrMore(inner) => {
                self.repeat(inner, 1, self.options.repeat_limit.max(1))
            }
            Node::Range { expr, start, end } => self.repeat(expr, *start as usize, *end as usize),
            Node::CommaList(inner) => {
                // `a#` is one `a` followed by zero or more `, a` pairs.
                let first = self.generator(inner);
                let rest = Generator::CrossProduct(vec![
                    Generator::literal(","),
                    first.clone(),
                ]);
                Generator::CrossProduct(vec![
                    first,
                    self.bounded(rest, 0, self.options.repeat_limit),
                ])
            }
        }
    }

    fn all(&self, children: &[Node]) -> Vec<Generator> {
        children.iter().map(|child| self.generator(child)).collect()
    }

    fn repeat(&self, inner: &Node, min: usize, max: usize) -> Generator {
        let inner = self.generator(inner);
        self.bounded(inner, min, max)
    }

    fn bounded(&self, inner: Generator, min: usize, max: usize) -> Generator {
        let inner = match self.options.draw_limit {
            Some(count) => Generator::Limit {
                inner: Box::new(inner),
                count,
            },
            None => inner,
        };
        Generator::repeat(inner, min, max)
    }
}
