pub mod ast;
pub mod callable;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod value;

use log::trace;
use thiserror::Error;

pub use interpreter::{Interpreter, RuntimeError};
pub use parser::ParseError;
pub use value::Value;

/// Failure of a whole `run`: either the source did not parse, or evaluation
/// stopped at the first runtime error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parser errors:{}", parse_messages(.0))]
    Parse(Vec<ParseError>),
    #[error("ERROR: {0}")]
    Runtime(#[from] RuntimeError),
}

fn parse_messages(errors: &[ParseError]) -> String {
    errors.iter().map(|e| format!("\n\t{}", e)).collect()
}

/// Parses `source` and evaluates it against the interpreter's global scope.
pub fn run(source: &str, interpreter: &mut Interpreter) -> Result<Value, Error> {
    trace!("Parsing {} bytes", source.len());
    let program = parser::parse(source).map_err(Error::Parse)?;
    trace!("Evaluating {}", program);
    Ok(interpreter.interpret(&program)?)
}
