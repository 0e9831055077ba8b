//! # Value Expression Language - Abstract Syntax Tree
//!
//! This module defines the tokens and tree nodes of the value-expression
//! language, the small grammar used to describe the legal values of a
//! styleable property.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[node]** - Tree nodes (leaves, closures, sequences, groups)
//! - **[operators]** - The four sequence operators and their flattening rule
//!
//! ## Quick Start
//!
//! ```text
//! <color> || <gradient>+ | "none"
//! ```
//!
//! parses as
//!
//! ```text
//! InclusiveOr(Type(color), ExclusiveOr(OneOrMore(Type(gradient)), StringLiteral(none)))
//! ```
//!
//! ## Precedence
//!
//! From loosest to tightest:
//!
//! | Syntax | Node | Meaning |
//! |---|---|---|
//! | `a \|\| b` | [`Node::InclusiveOr`] | one or more of, any combination |
//! | `a \| b` | [`Node::ExclusiveOr`] | exactly one of |
//! | `a && b` | [`Node::PermutedAnd`] | all of, any order |
//! | `a b` | [`Node::And`] | all of, in order |
//! | `a*` `a+` `a?` `a#` `a{m,n}` | closures | repetition |
//! | `[ ... ]` | [`Node::Group`] | bracketing |
//!
//! ## Flattening
//!
//! Chains of the same operator become a single n-ary node: `a b c` is one
//! `And` with three children, never `And(a, And(b, c))`.
pub mod node;
pub mod operators;
pub mod tokens;

pub use node::Node;
pub use operators::SeqOp;
pub use tokens::Token;
