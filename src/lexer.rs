use std::sync::LazyLock;

use log::trace;
use regex::Regex;
use thiserror::Error;

use crate::ast::Token;

/// An unexpected character in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected character '{found}' at offset {offset}")]
pub struct LexError {
    /// Byte offset of the offending character
    pub offset: usize,
    pub found: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Skip,
    Identifier,
    Type,
    String,
    DoublePipe,
    Pipe,
    DoubleAmpersand,
    Star,
    Plus,
    Question,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Number,
    Hash,
    Comma,
}

// Order matters: the first rule that matches at the current offset wins.
static RULES: LazyLock<Vec<(Regex, Rule)>> = LazyLock::new(|| {
    [
        (r"\s+", Rule::Skip),
        (r"//[^\n]*", Rule::Skip),
        (r"[-_a-zA-Z][-_a-zA-Z0-9]*", Rule::Identifier),
        (r"<[-_a-zA-Z]+>", Rule::Type),
        (r#""[^"]+""#, Rule::String),
        (r"'[^']+'", Rule::String),
        (r"‘[^‘’]*[‘’]", Rule::String),
        (r"\|\|", Rule::DoublePipe),
        (r"\|", Rule::Pipe),
        (r"&&", Rule::DoubleAmpersand),
        (r"\*", Rule::Star),
        (r"\+", Rule::Plus),
        (r"\?", Rule::Question),
        (r"\{", Rule::LBrace),
        (r"\}", Rule::RBrace),
        (r"\[", Rule::LBracket),
        (r"\]", Rule::RBracket),
        (r"(0|[1-9][0-9]*)(\.[0-9]+)?", Rule::Number),
        (r"#", Rule::Hash),
        (r",", Rule::Comma),
    ]
    .into_iter()
    .map(|(pattern, rule)| {
        let anchored = format!("^(?:{})", pattern);
        let regex = Regex::new(&anchored).expect("lexer rule is a valid pattern");
        (regex, rule)
    })
    .collect()
});

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            token_start: 0,
        }
    }

    /// The complete input being tokenized.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset at which the most recently returned token starts.
    pub fn offset(&self) -> usize {
        self.token_start
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let rest = &self.input[self.position..];
            self.token_start = self.position;

            let Some(found) = rest.chars().next() else {
                return Ok(Token::Eof);
            };

            let Some((len, rule)) = RULES
                .iter()
                .find_map(|(regex, rule)| regex.find(rest).map(|m| (m.end(), *rule)))
            else {
                return Err(LexError {
                    offset: self.position,
                    found,
                });
            };

            let text = &rest[..len];
            self.position += len;

            if rule == Rule::Skip {
                continue;
            }

            let token = make_token(rule, text);
            trace!("token {:?} at {}", token, self.token_start);
            return Ok(token);
        }
    }

    /// Tokenizes the remaining input, excluding the final `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = vec![];
        loop {
            match self.next_token()? {
                Token::Eof => return Ok(tokens),
                token => tokens.push(token),
            }
        }
    }
}

fn make_token(rule: Rule, text: &str) -> Token {
    match rule {
        Rule::Identifier => Token::Identifier(text.to_string()),
        Rule::Type => Token::Type(strip_delimiters(text)),
        Rule::String => Token::String(strip_delimiters(text)),
        Rule::Number => Token::Number(text.to_string()),
        Rule::DoublePipe => Token::DoublePipe,
        Rule::Pipe => Token::Pipe,
        Rule::DoubleAmpersand => Token::DoubleAmpersand,
        Rule::Star => Token::Star,
        Rule::Plus => Token::Plus,
        Rule::Question => Token::Question,
        Rule::LBrace => Token::LBrace,
        Rule::RBrace => Token::RBrace,
        Rule::LBracket => Token::LBracket,
        Rule::RBracket => Token::RBracket,
        Rule::Hash => Token::Hash,
        Rule::Comma => Token::Comma,
        Rule::Skip => unreachable!("skipped input never becomes a token"),
    }
}

/// Drops the first and last character (quotes or angle brackets).
fn strip_delimiters(text: &str) -> String {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

#[test]
fn test_operators() {
    let mut lexer = Lexer::new("|| | && * + ? #");
    assert_eq!(lexer.next_token(), Ok(Token::DoublePipe));
    assert_eq!(lexer.next_token(), Ok(Token::Pipe));
    assert_eq!(lexer.next_token(), Ok(Token::DoubleAmpersand));
    assert_eq!(lexer.next_token(), Ok(Token::Star));
    assert_eq!(lexer.next_token(), Ok(Token::Plus));
    assert_eq!(lexer.next_token(), Ok(Token::Question));
    assert_eq!(lexer.next_token(), Ok(Token::Hash));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_range() {
    let mut lexer = Lexer::new("<length>{1,4}");
    assert_eq!(lexer.next_token(), Ok(Token::Type("length".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::LBrace));
    assert_eq!(lexer.next_token(), Ok(Token::Number("1".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Comma));
    assert_eq!(lexer.next_token(), Ok(Token::Number("4".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::RBrace));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_offsets() {
    let mut lexer = Lexer::new("a  <b>");
    lexer.next_token().unwrap();
    assert_eq!(lexer.offset(), 0);
    lexer.next_token().unwrap();
    assert_eq!(lexer.offset(), 3);
}
