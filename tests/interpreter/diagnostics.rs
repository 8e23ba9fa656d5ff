use crate::helpers::execute_with_diagnostics;
use insta::assert_snapshot;

#[test]
fn nothing_executes_when_a_compile_error_was_reported() {
    let (output, diagnostics) = execute_with_diagnostics(
        r#"print "before";
1 +;"#,
    );
    assert!(output.is_empty());
    assert_snapshot!(diagnostics, @r###"
    [line 2] Error at ';': Expect expression.
    "###);
}

#[test]
fn an_unexpected_character_is_reported_where_it_is_used() {
    let (_, diagnostics) = execute_with_diagnostics("var a = @;");
    assert_snapshot!(diagnostics, @r###"
    [line 1] Error at '@': Unexpected character.
    "###);
}

#[test]
fn adding_a_number_to_a_string_is_a_runtime_error() {
    let (output, diagnostics) = execute_with_diagnostics(r#"print 1 + "x";"#);
    assert!(output.is_empty());
    assert_snapshot!(diagnostics, @r###"
    Operands must be two numbers or two strings.
    [line 1]
    "###);
}

#[test]
fn negating_a_string_is_a_runtime_error() {
    let (_, diagnostics) = execute_with_diagnostics(r#"print -"muffin";"#);
    assert_snapshot!(diagnostics, @r###"
    Operand must be a number.
    [line 1]
    "###);
}

#[test]
fn reading_an_undefined_variable_is_a_runtime_error() {
    let (_, diagnostics) = execute_with_diagnostics("print missing;");
    assert_snapshot!(diagnostics, @r###"
    Undefined variable 'missing'.
    [line 1]
    "###);
}

#[test]
fn assigning_to_an_undeclared_global_is_a_runtime_error() {
    let (_, diagnostics) = execute_with_diagnostics("missing = 1;");
    assert_snapshot!(diagnostics, @r###"
    Undefined variable 'missing'.
    [line 1]
    "###);
}

#[test]
fn calling_a_non_callable_is_a_runtime_error() {
    let (_, diagnostics) = execute_with_diagnostics(r#""not a function"();"#);
    assert_snapshot!(diagnostics, @r###"
    Can only call functions and classes.
    [line 1]
    "###);
}

#[test]
fn an_arity_mismatch_is_a_runtime_error() {
    let (_, diagnostics) = execute_with_diagnostics(
        r#"fun add(a, b) { return a + b; }
add(1);"#,
    );
    assert_snapshot!(diagnostics, @r###"
    Expected 2 arguments but got 1.
    [line 2]
    "###);
}

#[test]
fn reading_a_property_off_a_number_is_a_runtime_error() {
    let (_, diagnostics) = execute_with_diagnostics("print 3.value;");
    assert_snapshot!(diagnostics, @r###"
    Only instances have properties.
    [line 1]
    "###);
}

#[test]
fn reading_a_missing_property_is_a_runtime_error() {
    let (_, diagnostics) = execute_with_diagnostics(
        r#"class Empty { }
print Empty().missing;"#,
    );
    assert_snapshot!(diagnostics, @r###"
    Undefined property 'missing'.
    [line 2]
    "###);
}

#[test]
fn calling_a_missing_super_method_is_a_runtime_error() {
    let (_, diagnostics) = execute_with_diagnostics(
        r#"class A { }
class B < A {
  test() {
    super.missing();
  }
}
B().test();"#,
    );
    assert_snapshot!(diagnostics, @r###"
    Undefined property 'missing'.
    [line 4]
    "###);
}

#[test]
fn inheriting_from_a_non_class_is_a_runtime_error() {
    let (_, diagnostics) = execute_with_diagnostics(
        r#"var NotAClass = "so not a class";
class Sub < NotAClass { }"#,
    );
    assert_snapshot!(diagnostics, @r###"
    Superclass must be a class.
    [line 2]
    "###);
}

#[test]
fn execution_stops_at_the_first_runtime_error() {
    let (output, diagnostics) = execute_with_diagnostics(
        r#"print "first";
print 1 + "x";
print "never";"#,
    );
    assert_snapshot!(output, @r###"
    first
    "###);
    assert_snapshot!(diagnostics, @r###"
    Operands must be two numbers or two strings.
    [line 2]
    "###);
}

#[test]
fn several_compile_errors_are_reported_in_one_run() {
    let (output, diagnostics) = execute_with_diagnostics(
        r#"1 +;
2 +;"#,
    );
    assert!(output.is_empty());
    assert_snapshot!(diagnostics, @r###"
    [line 1] Error at ';': Expect expression.
    [line 2] Error at ';': Expect expression.
    "###);
}
