use super::errors::LexicalError;
use super::token::{Token, TokenKind};
use regex::Regex;
use std::sync::LazyLock;

pub type LexerResult<T> = Result<T, LexicalError>;

pub const KEYWORDS: &[&str] = &[
    "var", "const", "def", "macro", "comptime", "type", "extends", "if", "else", "for", "in",
    "match", "try", "except", "raise", "return", "test", "assertEqual", "assertNotEqual",
    "assertTrue", "assertFalse", "assertRaises", "print", "null", "True", "False", "number",
    "float", "int", "string", "bool", "list", "dict",
];

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Pattern {
    BlockComment,
    Comment,
    Newline,
    Skip,
    Word,
    Emit(TokenKind),
}

impl Pattern {
    /// Literal words that only match where a word starts.
    fn needs_word_start(self) -> bool {
        matches!(self, Pattern::Emit(TokenKind::Bool | TokenKind::Null))
    }
}

/// Lexical patterns in priority order. The first one matching at the
/// cursor wins, so literal words must come before `Word` and multi-char
/// symbols before their single-char prefixes.
static PATTERNS: LazyLock<Vec<(Pattern, Regex)>> = LazyLock::new(|| {
    [
        (Pattern::BlockComment, r#"^"""(?s:.)*?""""#),
        (Pattern::Comment, r"^#[^\n]*"),
        (Pattern::Emit(TokenKind::Number), r"^[0-9]+(\.[0-9]+)?"),
        (Pattern::Emit(TokenKind::String), r#"^"([^"\\]|\\.)*""#),
        (Pattern::Emit(TokenKind::Bool), r"^(True|False)\b"),
        (Pattern::Emit(TokenKind::Null), r"^null\b"),
        (Pattern::Word, r"^[A-Za-z_][A-Za-z0-9_]*"),
        (Pattern::Emit(TokenKind::At), r"^@"),
        (Pattern::Emit(TokenKind::Arrow), r"^->"),
        (Pattern::Emit(TokenKind::Op), r"^(==|!=|>=|<=|//|[+\-*/%<>])"),
        (Pattern::Emit(TokenKind::Assign), r"^="),
        (Pattern::Emit(TokenKind::Colon), r"^:"),
        (Pattern::Emit(TokenKind::Comma), r"^,"),
        (Pattern::Emit(TokenKind::Semicolon), r"^;"),
        (Pattern::Emit(TokenKind::LParen), r"^\("),
        (Pattern::Emit(TokenKind::RParen), r"^\)"),
        (Pattern::Emit(TokenKind::LBrace), r"^\{"),
        (Pattern::Emit(TokenKind::RBrace), r"^\}"),
        (Pattern::Emit(TokenKind::LBracket), r"^\["),
        (Pattern::Emit(TokenKind::RBracket), r"^\]"),
        (Pattern::Newline, r"^\n"),
        (Pattern::Skip, r"^[ \t\r]+"),
    ]
    .into_iter()
    .map(|(pattern, re)| (pattern, Regex::new(re).expect("lexical pattern must compile")))
    .collect()
});

/// Tokenizes the whole source, stopping at the first unrecognized character.
pub fn tokenize(source: &str) -> LexerResult<Vec<Token>> {
    let tokens = Lexer::new(source).collect::<LexerResult<Vec<_>>>()?;
    tracing::debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

pub struct Lexer<'src> {
    source: &'src str,
    offset: usize,
    line_no: usize,
    line_start: usize,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer from source code.
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            offset: 0,
            line_no: 1,
            line_start: 0,
        }
    }

    /// Returns the next token, or None once the source is exhausted.
    fn scan_token(&mut self) -> Option<LexerResult<Token>> {
        while self.offset < self.source.len() {
            let rest = &self.source[self.offset..];
            let word_start = self.at_word_start();
            let matched = PATTERNS
                .iter()
                .filter(|(pattern, _)| word_start || !pattern.needs_word_start())
                .find_map(|(pattern, re)| re.find(rest).map(|m| (*pattern, m.end())));

            let (pattern, len) = match matched {
                Some(t) => t,
                None => {
                    let error = self.unexpected_character(rest);
                    // Nothing after the first error is scanned.
                    self.offset = self.source.len();
                    return Some(Err(error));
                }
            };

            let start = self.offset;
            let text = &rest[..len];
            let line_no = self.line_no;
            let column = self.column_at(start);
            let source_line = self.current_line();

            self.offset += len;
            self.track_newlines(start, text);

            let kind = match pattern {
                Pattern::BlockComment | Pattern::Comment | Pattern::Newline | Pattern::Skip => {
                    continue
                }
                Pattern::Word if KEYWORDS.contains(&text) => TokenKind::Keyword,
                Pattern::Word => TokenKind::Ident,
                Pattern::Emit(kind) => kind,
            };

            return Some(Ok(Token::new(kind, text, line_no, column, source_line)));
        }

        None
    }

    fn at_word_start(&self) -> bool {
        self.source[..self.offset]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
    }

    fn column_at(&self, offset: usize) -> usize {
        self.source[self.line_start..offset].chars().count() + 1
    }

    fn current_line(&self) -> &'src str {
        self.source[self.line_start..].lines().next().unwrap_or("")
    }

    /// Moves the line origin past any newlines inside the consumed text.
    fn track_newlines(&mut self, start: usize, text: &str) {
        if let Some(last) = text.rfind('\n') {
            self.line_no += text.matches('\n').count();
            self.line_start = start + last + 1;
        }
    }

    fn unexpected_character(&self, rest: &str) -> LexicalError {
        LexicalError {
            character: rest.chars().next().unwrap_or_default(),
            line: self.line_no,
            column: self.column_at(self.offset),
            source_line: self.current_line().to_owned(),
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = LexerResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::more_asserts::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn single(source: &str) -> Token {
        let mut tokens = tokenize(source).unwrap();
        assert_eq!(tokens.len(), 1, "expected one token for {:?}", source);
        tokens.remove(0)
    }

    #[test]
    fn test_literal_forms() {
        let cases = [
            ("42", TokenKind::Number),
            ("3.14", TokenKind::Number),
            ("\"hello\"", TokenKind::String),
            ("\"say \\\"hi\\\"\"", TokenKind::String),
            ("True", TokenKind::Bool),
            ("False", TokenKind::Bool),
            ("null", TokenKind::Null),
        ];

        for (source, kind) in cases {
            let token = single(source);
            assert_eq!(token.kind, kind, "{}", source);
            assert_eq!(token.text, source);
        }
    }

    #[test]
    fn test_keywords_and_identifiers() {
        for &word in KEYWORDS {
            let expected = match word {
                "True" | "False" => TokenKind::Bool,
                "null" => TokenKind::Null,
                _ => TokenKind::Keyword,
            };
            assert_eq!(single(word).kind, expected, "{}", word);
        }

        for word in ["x", "_tmp", "value2", "Truely", "nullable", "printer"] {
            let token = single(word);
            assert_eq!(token.kind, TokenKind::Ident, "{}", word);
            assert_eq!(token.text, word);
        }
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            kinds("@ -> == = != <= // % : , ; ( ) { } [ ]"),
            vec![
                TokenKind::At,
                TokenKind::Arrow,
                TokenKind::Op,
                TokenKind::Assign,
                TokenKind::Op,
                TokenKind::Op,
                TokenKind::Op,
                TokenKind::Op,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("var x = 10\n  print(x)").unwrap();

        let print = &tokens[4];
        assert_eq!(print.text, "print");
        assert_eq!((print.line, print.column), (2, 3));
        assert_eq!(print.source_line, "  print(x)");

        let ten = &tokens[3];
        assert_eq!((ten.line, ten.column), (1, 9));
        assert_eq!(ten.source_line, "var x = 10");
    }

    #[test]
    fn test_comments_are_dropped() {
        let tokens = tokenize("# heading\nvar x = 1 # trailing\n").unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_block_comment_relocates_column_origin() {
        let source = "var a = 1\n\"\"\"first\nsecond\n  third\"\"\" var b = 2";
        let tokens = tokenize(source).unwrap();

        let var_b = &tokens[4];
        assert!(var_b.is_keyword("var"));
        assert_eq!(var_b.line, 4);
        assert_eq!(var_b.column, 12);
        assert_eq!(var_b.source_line, "  third\"\"\" var b = 2");
    }

    #[test]
    fn test_literal_words_need_word_start() {
        let tokens = tokenize("1True 2null").unwrap();
        let pairs: Vec<_> = tokens.iter().map(|t| (t.kind, t.text.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                (TokenKind::Number, "1"),
                (TokenKind::Keyword, "True"),
                (TokenKind::Number, "2"),
                (TokenKind::Keyword, "null"),
            ]
        );

        assert_eq!(kinds("(True,null)")[1], TokenKind::Bool);
        assert_eq!(kinds("(True,null)")[3], TokenKind::Null);
    }

    #[test]
    fn test_crlf_line_endings() {
        let tokens = tokenize("var x = 1\r\nprint(x)\r\n").unwrap();
        assert_eq!(tokens.len(), 8);

        let print = &tokens[4];
        assert_eq!(print.text, "print");
        assert_eq!((print.line, print.column), (2, 1));
        assert_eq!(print.source_line, "print(x)");
        assert_eq!(tokens[3].source_line, "var x = 1");
    }

    #[test]
    fn test_multiline_string_relocates_column_origin() {
        let tokens = tokenize("var s = \"one\ntwo\" var t").unwrap();

        let string = &tokens[3];
        assert_eq!(string.kind, TokenKind::String);
        assert_eq!((string.line, string.column), (1, 9));

        let var_t = &tokens[4];
        assert!(var_t.is_keyword("var"));
        assert_eq!((var_t.line, var_t.column), (2, 6));
        assert_eq!(var_t.source_line, "two\" var t");
        assert_eq!((tokens[5].line, tokens[5].column), (2, 10));
    }

    #[test]
    fn test_unexpected_character() {
        let error = tokenize("var x = $").unwrap_err();
        assert_eq!(error.character, '$');
        assert_eq!((error.line, error.column), (1, 9));

        let message = error.to_string();
        assert!(message.contains("Unexpected character '$'"));
        assert!(message.contains("line 1"));
        assert!(message.contains("column 9"));
        assert!(message.contains('^'));
    }

    #[test]
    fn test_error_reports_offending_line() {
        let error = tokenize("var a = 10\n# note\nvar c = $\nvar d = 30").unwrap_err();

        assert_eq!(error.line, 3);
        assert_eq!(error.source_line, "var c = $");
        let message = error.to_string();
        assert!(message.contains("line 3"));
        assert!(message.contains("var c = $"));
    }

    #[test]
    fn test_stops_at_first_error() {
        let error = tokenize("var x = $\nvar y = `").unwrap_err();
        assert_eq!(error.character, '$');
        assert!(!error.to_string().contains('`'));

        let mut lexer = Lexer::new("` var");
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_unterminated_string() {
        let error = tokenize("var s = \"unterminated").unwrap_err();
        assert_eq!(error.character, '"');
        assert_gt!(error.column, 1);
    }

    #[test]
    fn test_tokenize_is_repeatable() {
        let source = "const pi: float = 3.14\nprint(pi, \"pi\")";
        assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
    }

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  \n\t\n").unwrap().is_empty());
    }
}
