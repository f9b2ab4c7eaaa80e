use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Literals.
    Number,
    String,
    Bool,
    Null,

    // Names.
    Ident,
    Keyword,

    // Symbols and operators.
    At,
    Assign,
    Op,
    Arrow,
    Colon,
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Bool => "BOOL",
            TokenKind::Null => "NULL",
            TokenKind::Ident => "IDENT",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::At => "AT",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Op => "OP",
            TokenKind::Arrow => "ARROW",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexeme together with where it starts in the source.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
    /// Full text of the line the token starts on, kept for diagnostics.
    pub source_line: String,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        line: usize,
        column: usize,
        source_line: impl Into<String>,
    ) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
            source_line: source_line.into(),
        }
    }

    /// Checks kind and, if given, the exact text.
    pub fn is(&self, kind: TokenKind, value: Option<&str>) -> bool {
        self.kind == kind && value.map_or(true, |v| self.text == v)
    }

    #[cfg(test)]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.is(TokenKind::Keyword, Some(word))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.text)
    }
}
