use crate::{Interpreter, PRELUDE};
use anyhow::Context;
use std::io::{stdout, Write};

/// Read-print-evaluation loop.
/// It prompts the user to enter lox code and then interprets it on the fly.
///
/// State persists across lines: variables, functions and classes defined
/// earlier stay visible. Error flags are cleared after every line so a typo
/// does not poison the session.
pub fn repl() -> Result<(), anyhow::Error> {
    let mut interpreter = Interpreter::new(stdout());
    // The prelude is loaded once; its definitions behave like globals.
    let _ = interpreter.run(PRELUDE);
    interpreter.clear_error_flags();
    loop {
        print!("> ");
        stdout().flush().context("Failed to flush the prompt")?;
        let mut input = String::new();
        let n_bytes_read = std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read a line from stdin")?;
        if n_bytes_read == 0 {
            break Ok(());
        }
        // Errors have already been reported on stderr at this point.
        let _ = interpreter.run(input.trim());
        interpreter.clear_error_flags();
    }
}
