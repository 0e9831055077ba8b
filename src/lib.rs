pub mod ast;
pub mod compiler;
pub mod convert;
pub mod expand;
pub mod generator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod source;
pub mod symbols;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Node, SeqOp, Token};
pub use compiler::{CompileOptions, Compiled, compile, compile_json, compile_with};
pub use convert::{NodeError, json_to_node, node_to_json};
pub use expand::{ExpandError, Expansion, TypeTable};
pub use generator::{Generator, Sample, Samples};
pub use lexer::{LexError, Lexer};
pub use output::{SampleOptions, samples};
pub use parser::{ParseError, Parser};
pub use source::{to_source, to_source_json};
pub use symbols::SymbolTable;

/// Type substituted by [`parse_or_unknown`] for expressions that fail to parse.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Parse a value expression into its tree.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    Parser::new(Lexer::new(input))?.parse()
}

/// Parse a value expression, substituting an opaque `<unknown>` type when the
/// text is malformed.
pub fn parse_or_unknown(input: &str) -> Node {
    parse(input).unwrap_or_else(|e| {
        log::warn!("{}; using <{}> instead", e, UNKNOWN_TYPE);
        Node::Type(UNKNOWN_TYPE.to_string())
    })
}
