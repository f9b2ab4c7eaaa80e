use super::errors::{ParserError, ParserErrorType, ParserResult, SyntaxError};
use super::grammar::{Block, ConstDecl, FunctionCall, FunctionDef, Node, Param, Program, VarDecl};
use super::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    filename: String,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, filename: impl Into<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            filename: filename.into(),
        }
    }

    /// Returns the current token, or None at end of stream.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Returns current token and advances the stream.
    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Checks whether or not the current token has the given kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek().map_or(false, |t| t.kind == kind)
    }

    /// If the current token has the given kind consume it and return true.
    fn check_consume(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            return true;
        }
        false
    }

    /// Consumes the current token, asserting its kind and optionally its text.
    /// A mismatching token is left in place so the error points at it.
    fn expect(&mut self, kind: TokenKind, value: Option<&str>) -> ParserResult<Token> {
        if self.peek().map_or(false, |t| t.is(kind, value)) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }

        let expected = match value {
            Some(v) => format!("{} '{}'", kind, v),
            None => kind.to_string(),
        };
        Err(ParserError::Unlocated(ParserErrorType::ExpectedToken {
            expected,
            got: self.peek().cloned(),
        }))
    }

    /// Token whose position describes where parsing currently stands: the
    /// current one, or the last consumed one once the stream is exhausted.
    fn context_token(&self) -> Option<&Token> {
        self.peek().or_else(|| self.tokens.last())
    }

    fn syntax_error(&self, error: ParserErrorType) -> SyntaxError {
        let message = error.message();
        match self.context_token() {
            Some(t) => SyntaxError::at(&self.filename, t.line, t.column, &t.source_line, message),
            None => SyntaxError::at(&self.filename, 1, 1, "", message),
        }
    }

    /// Attaches position context to an error that does not carry any yet.
    fn annotate(&self, error: ParserError) -> SyntaxError {
        match error {
            ParserError::Located(e) => e,
            ParserError::Unlocated(e) => self.syntax_error(e),
        }
    }

    /// Runs a production, locating whatever unlocated error escapes it.
    fn located<T, F>(&mut self, production: F) -> ParserResult<T>
    where
        F: FnOnce(&mut Self) -> ParserResult<T>,
    {
        production(self).map_err(|e| ParserError::Located(self.annotate(e)))
    }

    /// Parses program from the top treating it as a set of statements.
    pub fn parse(mut self) -> Result<Program, SyntaxError> {
        let mut statements = vec![];

        while self.peek().is_some() {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(e) => return Err(self.annotate(e)),
            }
        }

        tracing::debug!(
            filename = %self.filename,
            statements = statements.len(),
            "parsed program"
        );
        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> ParserResult<Node> {
        let keyword = match self.peek() {
            Some(t) if t.kind == TokenKind::Keyword => Some(t.text.clone()),
            _ => None,
        };

        match keyword.as_deref() {
            Some("var") => self.parse_var_decl(),
            Some("const") => self.parse_const_decl(),
            Some("def") => self.parse_function_def(),
            Some("print") => self.parse_print_call(),
            Some("if") => self.parse_reserved("if"),
            Some("for") => self.parse_reserved("for"),
            Some("match") => self.parse_reserved("match"),
            Some("return") => self.parse_reserved("return"),
            Some("raise") => self.parse_reserved("raise"),
            Some("try") => self.parse_reserved("try"),
            Some("macro") => self.parse_reserved("macro"),
            Some("comptime") => self.parse_reserved("comptime"),
            Some("type") => self.parse_reserved("type"),
            _ => self.parse_expression(),
        }
    }

    /// Keyword slot kept for grammar that has no production yet.
    fn parse_reserved(&mut self, keyword: &'static str) -> ParserResult<Node> {
        self.located(|_| Err(ParserError::Unlocated(ParserErrorType::NotImplemented(keyword))))
    }

    fn parse_var_decl(&mut self) -> ParserResult<Node> {
        self.located(|p| {
            p.expect(TokenKind::Keyword, Some("var"))?;
            let name = p.expect(TokenKind::Ident, None)?.text;
            let type_name = p.parse_type_annotation()?;

            let value = if p.check_consume(TokenKind::Assign) {
                Some(Box::new(p.parse_expression()?))
            } else {
                None
            };

            Ok(Node::VarDecl(VarDecl {
                name,
                type_name,
                value,
            }))
        })
    }

    fn parse_const_decl(&mut self) -> ParserResult<Node> {
        self.located(|p| {
            p.expect(TokenKind::Keyword, Some("const"))?;
            let name = p.expect(TokenKind::Ident, None)?.text;
            let type_name = p.parse_type_annotation()?;
            p.expect(TokenKind::Assign, None)?;
            let value = Box::new(p.parse_expression()?);

            Ok(Node::ConstDecl(ConstDecl {
                name,
                type_name,
                value,
            }))
        })
    }

    fn parse_function_def(&mut self) -> ParserResult<Node> {
        self.located(|p| {
            p.expect(TokenKind::Keyword, Some("def"))?;
            let name = p.expect(TokenKind::Ident, None)?.text;
            p.expect(TokenKind::LParen, None)?;
            let params = p.parse_param_list()?;
            p.expect(TokenKind::RParen, None)?;

            let return_type = if p.check_consume(TokenKind::Arrow) {
                Some(p.parse_type()?)
            } else {
                None
            };
            let body = p.parse_block()?;

            Ok(Node::FunctionDef(FunctionDef {
                name,
                params,
                return_type,
                body,
            }))
        })
    }

    fn parse_param_list(&mut self) -> ParserResult<Vec<Param>> {
        self.located(|p| {
            let mut params = vec![];
            if p.check(TokenKind::RParen) {
                return Ok(params);
            }

            loop {
                params.push(p.parse_param()?);
                if !p.check_consume(TokenKind::Comma) {
                    break;
                }
            }

            Ok(params)
        })
    }

    fn parse_param(&mut self) -> ParserResult<Param> {
        self.located(|p| {
            let name = p.expect(TokenKind::Ident, None)?.text;
            let type_name = p.parse_type_annotation()?;
            let default = if p.check_consume(TokenKind::Assign) {
                Some(Box::new(p.parse_expression()?))
            } else {
                None
            };

            Ok(Param {
                name,
                type_name,
                default,
            })
        })
    }

    fn parse_block(&mut self) -> ParserResult<Block> {
        self.located(|p| {
            p.expect(TokenKind::LBrace, None)?;

            let mut statements = vec![];
            while p.peek().is_some() && !p.check(TokenKind::RBrace) {
                statements.push(p.parse_statement()?);
            }
            p.expect(TokenKind::RBrace, None)?;

            Ok(Block { statements })
        })
    }

    fn parse_print_call(&mut self) -> ParserResult<Node> {
        self.located(|p| {
            p.expect(TokenKind::Keyword, Some("print"))?;
            p.expect(TokenKind::LParen, None)?;

            let mut args = vec![];
            if !p.check(TokenKind::RParen) {
                loop {
                    args.push(p.parse_expression()?);
                    if !p.check_consume(TokenKind::Comma) {
                        break;
                    }
                }
            }
            p.expect(TokenKind::RParen, None)?;

            Ok(Node::FunctionCall(FunctionCall {
                name: "print".to_owned(),
                args,
            }))
        })
    }

    /// Parses an optional `: TYPE` suffix.
    fn parse_type_annotation(&mut self) -> ParserResult<Option<String>> {
        if self.check_consume(TokenKind::Colon) {
            Ok(Some(self.parse_type()?))
        } else {
            Ok(None)
        }
    }

    /// Built-in type names lex as keywords, user-defined ones as identifiers.
    fn parse_type(&mut self) -> ParserResult<String> {
        self.located(|p| {
            let token = p.peek().cloned();
            match token {
                Some(t) if matches!(t.kind, TokenKind::Keyword | TokenKind::Ident) => {
                    p.advance();
                    Ok(t.text)
                }
                got => Err(ParserError::Unlocated(ParserErrorType::ExpectedToken {
                    expected: "type name".to_owned(),
                    got,
                })),
            }
        })
    }

    fn parse_expression(&mut self) -> ParserResult<Node> {
        self.located(|p| {
            let token = p.peek().cloned();
            match token {
                Some(t) if matches!(t.kind, TokenKind::Number | TokenKind::String) => {
                    p.advance();
                    Ok(Node::literal(t.text))
                }
                Some(t) if t.kind == TokenKind::Ident => {
                    p.advance();
                    Ok(Node::identifier(t.text))
                }
                other => Err(ParserError::Unlocated(ParserErrorType::ExpectedExpr(other))),
            }
        })
    }
}
