mod interpreter;
mod parser;
mod repl;
mod reporter;
mod resolver;
mod scanner;

pub use interpreter::{ExecutionError, Interpreter, RuntimeError};
pub use repl::repl;
pub use reporter::Reporter;

/// Lox-level helpers compiled in front of every program.
pub const PRELUDE: &str = include_str!("../builtins/prelude.lox");
