/// Abstract Syntax Tree node of a parsed value expression.
///
/// Each variant corresponds to exactly one node tag. Sequence variants are
/// n-ary: the parser never nests a node directly inside another node of the
/// same operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    // Leaves
    /// Bare word or bare number
    ///
    /// # Example
    /// ```text
    /// none
    /// ```
    Identifier(String),

    /// Type reference, without angle brackets
    ///
    /// # Example
    /// ```text
    /// <color>
    /// ```
    Type(String),

    /// Quoted literal, without quotes
    ///
    /// # Example
    /// ```text
    /// "inherit"
    /// ```
    StringLiteral(String),

    // Closures
    /// `expr?`
    ZeroOrOne(Box<Node>),
    /// `expr*`
    ZeroOrMore(Box<Node>),
    /// `expr+`
    OneOrMore(Box<Node>),
    /// `expr#`
    CommaList(Box<Node>),

    /// `expr{start,end}`, inclusive bounds with `start <= end`
    ///
    /// # Example
    /// ```text
    /// <length>{1,4}
    /// ```
    Range {
        expr: Box<Node>,
        start: u32,
        end: u32,
    },

    // Sequences
    /// All operands, in order (juxtaposition)
    And(Vec<Node>),
    /// All operands, in any order (`&&`)
    PermutedAnd(Vec<Node>),
    /// One or more operands, in any combination (`||`)
    InclusiveOr(Vec<Node>),
    /// Exactly one operand (`|`)
    ExclusiveOr(Vec<Node>),

    /// Explicit bracketing, `[ expr ]`
    Group(Box<Node>),
}

impl Node {
    /// Tag name used by the one-key JSON encoding.
    pub fn tag(&self) -> &'static str {
        match self {
            Node::Identifier(_) => "identifier",
            Node::Type(_) => "type",
            Node::StringLiteral(_) => "string",
            Node::ZeroOrOne(_) => "?",
            Node::ZeroOrMore(_) => "*",
            Node::OneOrMore(_) => "+",
            Node::CommaList(_) => "#",
            Node::Range { .. } => "range",
            Node::And(_) => "and",
            Node::PermutedAnd(_) => "permute",
            Node::InclusiveOr(_) => "ior",
            Node::ExclusiveOr(_) => "xor",
            Node::Group(_) => "group",
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Node::Identifier(_) | Node::Type(_) | Node::StringLiteral(_)
        )
    }

    /// Direct children, in declared order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Identifier(_) | Node::Type(_) | Node::StringLiteral(_) => vec![],
            Node::ZeroOrOne(expr)
            | Node::ZeroOrMore(expr)
            | Node::OneOrMore(expr)
            | Node::CommaList(expr)
            | Node::Group(expr)
            | Node::Range { expr, .. } => vec![expr.as_ref()],
            Node::And(children)
            | Node::PermutedAnd(children)
            | Node::InclusiveOr(children)
            | Node::ExclusiveOr(children) => children.iter().collect(),
        }
    }
}
