use std::mem;

use log::debug;
use thiserror::Error;

use crate::{
    ast::{Node, SeqOp, Token},
    lexer::{LexError, Lexer},
};

/// A malformed value expression.
///
/// Carries the complete offending input so callers can report it or fall
/// back to an opaque placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse '{input}' at offset {offset}: {reason}")]
pub struct ParseError {
    pub input: String,
    /// Byte offset of the token where parsing stopped
    pub offset: usize,
    pub reason: ParseErrorReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorReason {
    #[error("{0}")]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: &'static str, found: String },

    #[error("repeat count must be a non-negative integer, found {0}")]
    InvalidCount(String),

    #[error("range start {start} is greater than range end {end}")]
    InvertedRange { start: u32, end: u32 },
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, ParseError> {
        let current_token = match lexer.next_token() {
            Ok(token) => token,
            Err(e) => {
                return Err(ParseError {
                    input: lexer.input().to_string(),
                    offset: e.offset,
                    reason: e.into(),
                });
            }
        };

        Ok(Parser {
            lexer,
            current_token,
        })
    }

    fn error(&self, reason: ParseErrorReason) -> ParseError {
        ParseError {
            input: self.lexer.input().to_string(),
            offset: self.lexer.offset(),
            reason,
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        self.error(ParseErrorReason::UnexpectedToken {
            expected,
            found: self.current_token.describe(),
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        match self.lexer.next_token() {
            Ok(token) => {
                self.current_token = token;
                Ok(())
            }
            Err(e) => Err(ParseError {
                input: self.lexer.input().to_string(),
                offset: e.offset,
                reason: e.into(),
            }),
        }
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(description));
        }
        self.advance()
    }

    /// Parse a complete expression; the whole input must be consumed.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_expression()?;
        if !self.check(&Token::Eof) {
            return Err(self.unexpected("an operator or end of input"));
        }
        debug!("parsed value expression '{}'", self.lexer.input());
        Ok(node)
    }

    pub fn parse_expression(&mut self) -> Result<Node, ParseError> {
        self.parse_inclusive_or()
    }

    // Each level collects its operands in a loop so that long chains parse
    // in constant stack depth.

    fn parse_inclusive_or(&mut self) -> Result<Node, ParseError> {
        let mut operands = vec![self.parse_exclusive_or()?];

        while self.check(&Token::DoublePipe) {
            self.advance()?;
            operands.push(self.parse_exclusive_or()?);
        }
        Ok(SeqOp::InclusiveOr.collect(operands))
    }

    fn parse_exclusive_or(&mut self) -> Result<Node, ParseError> {
        let mut operands = vec![self.parse_permuted_and()?];

        while self.check(&Token::Pipe) {
            self.advance()?;
            operands.push(self.parse_permuted_and()?);
        }
        Ok(SeqOp::ExclusiveOr.collect(operands))
    }

    fn parse_permuted_and(&mut self) -> Result<Node, ParseError> {
        let mut operands = vec![self.parse_and()?];

        while self.check(&Token::DoubleAmpersand) {
            self.advance()?;
            operands.push(self.parse_and()?);
        }
        Ok(SeqOp::PermutedAnd.collect(operands))
    }

    fn parse_and(&mut self) -> Result<Node, ParseError> {
        let mut operands = vec![self.parse_closure()?];

        while self.current_token.starts_term() {
            operands.push(self.parse_closure()?);
        }
        Ok(SeqOp::And.collect(operands))
    }

    /// A term followed by at most one postfix closure.
    fn parse_closure(&mut self) -> Result<Node, ParseError> {
        let term = self.parse_term()?;

        let node = match self.current_token {
            Token::Star => {
                self.advance()?;
                Node::ZeroOrMore(Box::new(term))
            }
            Token::Plus => {
                self.advance()?;
                Node::OneOrMore(Box::new(term))
            }
            Token::Question => {
                self.advance()?;
                Node::ZeroOrOne(Box::new(term))
            }
            Token::Hash => {
                self.advance()?;
                Node::CommaList(Box::new(term))
            }
            Token::LBrace => {
                self.advance()?;
                self.parse_range(term)?
            }
            _ => term,
        };
        Ok(node)
    }

    /// Parse `m}` or `m,n}` after the opening brace.
    fn parse_range(&mut self, expr: Node) -> Result<Node, ParseError> {
        let start = self.parse_count()?;

        let end = if self.check(&Token::Comma) {
            self.advance()?;
            self.parse_count()?
        } else {
            start
        };

        if start > end {
            return Err(self.error(ParseErrorReason::InvertedRange { start, end }));
        }

        self.expect(Token::RBrace, "'}'")?;

        Ok(Node::Range {
            expr: Box::new(expr),
            start,
            end,
        })
    }

    fn parse_count(&mut self) -> Result<u32, ParseError> {
        let Token::Number(text) = &self.current_token else {
            return Err(self.unexpected("a repeat count"));
        };

        let count = text
            .parse::<u32>()
            .map_err(|_| self.error(ParseErrorReason::InvalidCount(text.clone())))?;

        self.advance()?;
        Ok(count)
    }

    fn parse_term(&mut self) -> Result<Node, ParseError> {
        let node = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(name) | Token::Number(name) => Node::Identifier(name),
            Token::Type(name) => Node::Type(name),
            Token::String(text) => Node::StringLiteral(text),
            Token::LBracket => {
                self.advance()?;
                let inner = self.parse_expression()?;
                if !self.check(&Token::RBracket) {
                    return Err(self.unexpected("']'"));
                }
                Node::Group(Box::new(inner))
            }
            token => {
                self.current_token = token;
                return Err(self.unexpected("a term"));
            }
        };

        self.advance()?;
        Ok(node)
    }
}
