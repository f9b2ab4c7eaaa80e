use super::token::Token;
use thiserror::Error;

/// Separates the line number from the quoted source line in diagnostics.
pub const GUTTER: &str = " | ";

/// Number of spaces in front of the caret that points at `column`.
pub fn caret_offset(line: usize, column: usize) -> usize {
    line.to_string().len() + GUTTER.len() + column.saturating_sub(1)
}

/// Renders the quoted source line with a caret under `column`.
pub fn render_snippet(line: &usize, column: &usize, source_line: &str) -> String {
    format!(
        "{}{}{}\n{}^",
        line,
        GUTTER,
        source_line,
        " ".repeat(caret_offset(*line, *column))
    )
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error(
    "Unexpected character '{character}' on line {line}, column {column}:\n{}",
    render_snippet(.line, .column, .source_line)
)]
pub struct LexicalError {
    pub character: char,
    pub line: usize,
    pub column: usize,
    pub source_line: String,
}

/// Syntax diagnostic carrying the full location context.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error(
    "{filename}:{line}:{column}: {message}\n{}",
    render_snippet(.line, .column, .source_line)
)]
pub struct SyntaxError {
    pub filename: String,
    pub line: usize,
    pub column: usize,
    pub source_line: String,
    pub caret_offset: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn at(filename: &str, line: usize, column: usize, source_line: &str, message: String) -> Self {
        SyntaxError {
            filename: filename.to_owned(),
            line,
            column,
            source_line: source_line.to_owned(),
            caret_offset: caret_offset(line, column),
            message,
        }
    }
}

/// What went wrong while parsing, before a location is attached.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParserErrorType {
    ExpectedToken {
        expected: String,
        got: Option<Token>,
    },
    ExpectedExpr(Option<Token>),
    NotImplemented(&'static str),
}

impl ParserErrorType {
    pub fn message(&self) -> String {
        match self {
            ParserErrorType::ExpectedToken { expected, got } => match got {
                Some(token) => format!("Expected {}, got {}", expected, token),
                None => format!("Expected {}, got end of input", expected),
            },
            ParserErrorType::ExpectedExpr(got) => match got {
                Some(token) => format!("Unexpected token in expression: {}", token),
                None => "Unexpected end of input: expected expression".to_owned(),
            },
            ParserErrorType::NotImplemented(keyword) => {
                format!("'{}' statements are not yet implemented", keyword)
            }
        }
    }
}

/// A parse failure travels upward unlocated until a production attaches
/// position context; once located it is never rewritten.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParserError {
    Unlocated(ParserErrorType),
    Located(SyntaxError),
}

pub type ParserResult<T> = Result<T, ParserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_lines_up_with_column() {
        let rendered = render_snippet(&1, &9, "var x = $");
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "1 | var x = $");
        assert_eq!(lines[1].find('^'), lines[0].find('$'));
    }

    #[test]
    fn test_caret_accounts_for_wide_line_numbers() {
        assert_eq!(caret_offset(7, 1), 4);
        assert_eq!(caret_offset(120, 5), 10);
    }

    #[test]
    fn test_syntax_error_display() {
        let error = SyntaxError::at(
            "test.hdy",
            2,
            5,
            "    print(\"Hello\"",
            "Expected RPAREN, got end of input".to_owned(),
        );
        let message = error.to_string();

        assert!(message.starts_with("test.hdy:2:5: Expected RPAREN"));
        assert!(message.contains("2 |     print(\"Hello\""));
        assert!(message.ends_with('^'));
    }
}
