use crate::ast::Node;

/// Binary sequence operators.
///
/// Every operator builds an n-ary node; chains of the same operator are kept
/// flat by [`SeqOp::collect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqOp {
    /// Juxtaposition, all in order
    And,
    /// All, in any order (`&&`)
    PermutedAnd,
    /// One or more, in any combination (`||`)
    InclusiveOr,
    /// Exactly one (`|`)
    ExclusiveOr,
}

impl SeqOp {
    /// Separator written between operands in canonical source.
    pub fn separator(self) -> &'static str {
        match self {
            SeqOp::And => " ",
            SeqOp::PermutedAnd => " && ",
            SeqOp::InclusiveOr => " || ",
            SeqOp::ExclusiveOr => " | ",
        }
    }

    /// Wraps `children` in the node variant for this operator.
    pub fn node(self, children: Vec<Node>) -> Node {
        match self {
            SeqOp::And => Node::And(children),
            SeqOp::PermutedAnd => Node::PermutedAnd(children),
            SeqOp::InclusiveOr => Node::InclusiveOr(children),
            SeqOp::ExclusiveOr => Node::ExclusiveOr(children),
        }
    }

    /// Builds the node for `operands`, joined by this operator.
    ///
    /// A single operand is returned as is. Operands that are already nodes of
    /// the same operator have their children spliced in place, so the result
    /// never nests the operator directly inside itself.
    pub fn collect(self, operands: Vec<Node>) -> Node {
        let mut children = Vec::with_capacity(operands.len());
        for operand in operands {
            match (self, operand) {
                (SeqOp::And, Node::And(inner))
                | (SeqOp::PermutedAnd, Node::PermutedAnd(inner))
                | (SeqOp::InclusiveOr, Node::InclusiveOr(inner))
                | (SeqOp::ExclusiveOr, Node::ExclusiveOr(inner)) => children.extend(inner),
                (_, operand) => children.push(operand),
            }
        }

        match <[Node; 1]>::try_from(children) {
            Ok([only]) => only,
            Err(children) => self.node(children),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Node {
        Node::Identifier(name.to_string())
    }

    #[test]
    fn test_collect_splices_same_operator() {
        let right = SeqOp::And.collect(vec![ident("b"), ident("c")]);
        let node = SeqOp::And.collect(vec![ident("a"), right]);
        assert_eq!(node, Node::And(vec![ident("a"), ident("b"), ident("c")]));
    }

    #[test]
    fn test_collect_nests_other_operator() {
        let right = SeqOp::And.collect(vec![ident("b"), ident("c")]);
        let node = SeqOp::InclusiveOr.collect(vec![ident("a"), right]);
        assert_eq!(
            node,
            Node::InclusiveOr(vec![
                ident("a"),
                Node::And(vec![ident("b"), ident("c")])
            ])
        );
    }

    #[test]
    fn test_collect_single_operand_is_unwrapped() {
        assert_eq!(SeqOp::ExclusiveOr.collect(vec![ident("a")]), ident("a"));
    }
}
