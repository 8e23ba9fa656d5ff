use rlox::Interpreter;

/// Execute the provided lox source code.
/// It returns the program's output stream.
pub fn execute(source: &str) -> String {
    let (output, _) = execute_with_diagnostics(source);
    output
}

/// Execute the provided lox source code.
/// It returns the program's output stream and its diagnostics stream.
pub fn execute_with_diagnostics(source: &str) -> (String, String) {
    let mut output = Vec::new();
    let mut diagnostics = Vec::new();
    {
        let mut interpreter = Interpreter::with_streams(&mut output, &mut diagnostics);
        let _ = interpreter.run(source);
    }
    (
        String::from_utf8(output).unwrap(),
        String::from_utf8(diagnostics).unwrap(),
    )
}
