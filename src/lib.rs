//! Front-end and tree-walking evaluator for the Handy scripting language.

pub mod handy_frontend;
pub mod treewalk_interpreter;

use handy_frontend::grammar::Program;
use handy_frontend::token::Token;
use handy_frontend::{tokenize, LexicalError, Parser, SyntaxError};
use treewalk_interpreter::{Interpreter, RuntimeError};

use std::io::Write;
use thiserror::Error;

/// Any failure of the tokenize → parse → evaluate pipeline.
#[derive(Debug, Error)]
pub enum HandyError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub type HandyResult<T> = Result<T, HandyError>;

pub fn tokenize_source(source: &str) -> HandyResult<Vec<Token>> {
    Ok(tokenize(source)?)
}

/// Tokenizes and parses a source file.
pub fn parse_source(source: &str, filename: &str) -> HandyResult<Program> {
    let tokens = tokenize_source(source)?;
    Ok(Parser::new(tokens, filename).parse()?)
}

/// Runs a source file to completion on the given interpreter.
pub fn run_source<W: Write>(
    interpreter: &mut Interpreter<W>,
    source: &str,
    filename: &str,
) -> HandyResult<()> {
    let program = parse_source(source, filename)?;
    interpreter.run(&program)?;
    Ok(())
}
