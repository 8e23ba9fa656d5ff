use anyhow::Context;
use rlox::{repl, ExecutionError, Interpreter, PRELUDE};
use std::io::stdout;
use std::path::PathBuf;

fn main() -> Result<(), anyhow::Error> {
    let args: Vec<String> = std::env::args().collect();
    // The first element in the arguments list is the name of the binary.
    // Then the actual binary arguments, flags and options.
    if args.len() == 1 {
        repl()?;
    } else if args.len() == 2 {
        let filepath = PathBuf::from(&args[1]);
        let user_source = std::fs::read_to_string(&filepath)
            .with_context(|| format!("Failed to read {}", filepath.display()))?;
        // The prelude and the user program are compiled and executed as a
        // single source buffer.
        let source = format!("{PRELUDE}\n{user_source}");
        let mut interpreter = Interpreter::new(stdout());
        match interpreter.run(&source) {
            Ok(()) => {}
            // Diagnostics have already been written to stderr; all that is
            // left to communicate is the exit code.
            Err(ExecutionError::Compile) => std::process::exit(65),
            Err(ExecutionError::Runtime(_)) => std::process::exit(70),
        }
    } else {
        eprintln!("Usage: rlox [script]");
        // Why 64, you ask?
        //
        // If you run (on a Linux machine):
        // ```
        // grep 64 /usr/include/sysexits.h
        // ```
        //
        // You'll find:
        // ```
        // #define EX__BASE        64      /* base value for error messages */
        // #define EX_USAGE        64      /* command line usage error */
        // ```
        std::process::exit(64);
    }
    Ok(())
}
