pub mod errors;
pub mod grammar;
pub mod lexer;
pub mod parser;
mod printer;
pub mod token;

pub use errors::{LexicalError, SyntaxError};
pub use lexer::{tokenize, Lexer, LexerResult};
pub use parser::Parser;
