use crate::interpreter::RuntimeError;
use crate::scanner::{Token, TokenDiscriminant};
use std::io::Write;

/// Collects diagnostics from every stage of the pipeline.
///
/// The parser and the resolver record compile errors, the interpreter records
/// runtime errors; the driver inspects the flags to decide whether execution
/// may begin and which exit code to use.
pub struct Reporter<'a> {
    sink: Box<dyn Write + 'a>,
    had_compile_error: bool,
    had_runtime_error: bool,
}

impl<'a> Reporter<'a> {
    pub fn new<Sink>(sink: Sink) -> Self
    where
        Sink: Write + 'a,
    {
        Self {
            sink: Box::new(sink),
            had_compile_error: false,
            had_runtime_error: false,
        }
    }

    pub fn stderr() -> Reporter<'static> {
        Reporter::new(std::io::stderr())
    }

    /// Report a compile error that cannot be attributed to a specific token.
    pub fn error(&mut self, line: u64, message: &str) {
        self.had_compile_error = true;
        let _ = writeln!(self.sink, "[line {line}] Error: {message}");
    }

    /// Report a compile error at the given token.
    pub fn error_at(&mut self, token: &Token, message: &str) {
        self.had_compile_error = true;
        let line = token.line();
        let _ = if token.discriminant() == TokenDiscriminant::Eof {
            writeln!(self.sink, "[line {line}] Error at end: {message}")
        } else {
            writeln!(
                self.sink,
                "[line {line}] Error at '{}': {message}",
                token.lexeme()
            )
        };
    }

    /// Report an error raised during evaluation.
    pub fn runtime_error(&mut self, error: &RuntimeError) {
        self.had_runtime_error = true;
        let _ = match error.line() {
            Some(line) => writeln!(self.sink, "{error}\n[line {line}]"),
            None => writeln!(self.sink, "{error}"),
        };
    }

    pub fn had_compile_error(&self) -> bool {
        self.had_compile_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Forget recorded errors. The REPL calls this between lines so that a
    /// mistyped line does not poison the rest of the session.
    pub fn reset(&mut self) {
        self.had_compile_error = false;
        self.had_runtime_error = false;
    }
}
