use crate::helpers::execute;
use insta::assert_snapshot;
use rlox::PRELUDE;

fn execute_with_prelude(source: &str) -> String {
    execute(&format!("{PRELUDE}\n{source}"))
}

#[test]
fn the_prelude_compiles_cleanly() {
    let (output, diagnostics) = crate::helpers::execute_with_diagnostics(PRELUDE);
    assert!(output.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn the_prelude_helpers_are_available_to_user_code() {
    let output = execute_with_prelude(
        r#"print abs(-3);
print max(1, 2);
print min(1, 2);
print clamp(5, 0, 3);"#,
    );
    assert_snapshot!(output, @r###"
    3
    2
    1
    3
    "###);
}

#[test]
fn user_code_may_shadow_a_prelude_helper() {
    let output = execute_with_prelude(
        r#"fun abs(n) {
  return "shadowed";
}
print abs(-3);"#,
    );
    assert_snapshot!(output, @r###"
    shadowed
    "###);
}
