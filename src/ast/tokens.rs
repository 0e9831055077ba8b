/// Lexical tokens of the value-expression language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Terms
    /// Bare word
    ///
    /// # Examples
    /// ```text
    /// none
    /// -moz-box
    /// small_caps
    /// ```
    Identifier(String),

    /// Angle-bracketed type reference, stored without the brackets
    ///
    /// # Examples
    /// ```text
    /// <color>
    /// <line-width>
    /// ```
    Type(String),

    /// Quoted literal, stored without the quotes
    ///
    /// Double, single and curly single quotes are accepted.
    ///
    /// # Examples
    /// ```text
    /// "none"
    /// 'inherit'
    /// ‘auto’
    /// ```
    String(String),

    /// Bare numeric literal, kept as written
    ///
    /// # Examples
    /// ```text
    /// 0
    /// 12
    /// 1.5
    /// ```
    Number(String),

    // Operators
    /// Inclusive or (`||`)
    DoublePipe,
    /// Exclusive or (`|`)
    Pipe,
    /// Permuted and (`&&`)
    DoubleAmpersand,

    // Closures
    /// Zero or more (`*`)
    Star,
    /// One or more (`+`)
    Plus,
    /// Zero or one (`?`)
    Question,
    /// Comma separated list (`#`)
    Hash,

    // Delimiters
    /// Range opener (`{`)
    LBrace,
    /// Range closer (`}`)
    RBrace,
    /// Group opener (`[`)
    LBracket,
    /// Group closer (`]`)
    RBracket,
    /// Range bound separator (`,`)
    Comma,

    /// End of input
    Eof,
}

impl Token {
    /// True for tokens that can begin a term, and therefore continue an
    /// implicit juxtaposition chain.
    pub fn starts_term(&self) -> bool {
        matches!(
            self,
            Token::Identifier(_)
                | Token::Type(_)
                | Token::String(_)
                | Token::Number(_)
                | Token::LBracket
        )
    }

    /// Short human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(name) => format!("identifier '{}'", name),
            Token::Type(name) => format!("type <{}>", name),
            Token::String(text) => format!("string \"{}\"", text),
            Token::Number(n) => format!("number {}", n),
            Token::DoublePipe => "'||'".to_string(),
            Token::Pipe => "'|'".to_string(),
            Token::DoubleAmpersand => "'&&'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Plus => "'+'".to_string(),
            Token::Question => "'?'".to_string(),
            Token::Hash => "'#'".to_string(),
            Token::LBrace => "'{'".to_string(),
            Token::RBrace => "'}'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}
