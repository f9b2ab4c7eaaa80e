mod environment;
mod errors;
mod interpreter;
mod value;

pub use environment::Environment;
pub use errors::{RuntimeError, RuntimeResult};
pub use interpreter::Interpreter;
pub use value::Value;
