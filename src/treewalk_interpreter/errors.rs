use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Variable '{0}' not defined")]
    NameResolution(String),
    #[error("Constant '{0}' already defined")]
    DefinitionConflict(String),
    #[error("Unsupported construct: {0} is not implemented yet")]
    UnsupportedConstruct(String),
    #[error("Cannot determine a default value for '{0}' without a type or initializer")]
    UntypedDeclaration(String),
    #[error("No default value defined for type '{0}'")]
    NoDefaultValue(String),
    #[error("Invalid literal '{0}'")]
    InvalidLiteral(String),
    #[error("Failed to write program output: {0}")]
    Output(#[from] io::Error),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
