use crate::helpers::execute;
use insta::assert_snapshot;

#[test]
fn declare_and_invoke_function() {
    let source = r#"fun sayHi(first, last) {
  print "Hi, " + first + " " + last + "!";
}

sayHi("Dear", "Reader");"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    Hi, Dear Reader!
    "###);
}

#[test]
fn a_function_without_a_return_statement_yields_nil() {
    let source = r#"fun noop() { }
print noop();"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    nil
    "###);
}

#[test]
fn recursion_works() {
    let source = r#"fun fib(n) {
  if (n < 2) return n;
  return fib(n - 1) + fib(n - 2);
}
print fib(10);"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    55
    "###);
}

#[test]
fn a_closure_keeps_its_counter_across_calls() {
    let source = r#"fun make() {
  var i = 0;
  fun inc() {
    i = i + 1;
    return i;
  }
  return inc;
}
var c = make();
print c();
print c();
print c();"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    1
    2
    3
    "###);
}

#[test]
fn two_closures_from_the_same_factory_do_not_share_state() {
    let source = r#"fun make() {
  var i = 0;
  fun inc() {
    i = i + 1;
    return i;
  }
  return inc;
}
var first = make();
var second = make();
print first();
print first();
print second();"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    1
    2
    1
    "###);
}

#[test]
fn functions_are_first_class_values() {
    let source = r#"fun twice(f, x) {
  return f(f(x));
}
fun addOne(n) {
  return n + 1;
}
print twice(addOne, 5);"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    7
    "###);
}

#[test]
fn a_function_body_sees_globals_defined_after_it() {
    let source = r#"fun show() {
  print later;
}
var later = "defined later";
show();"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    defined later
    "###);
}

#[test]
fn a_function_prints_with_its_name() {
    let source = r#"fun salute() { }
print salute;"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    <fn salute>
    "###);
}

#[test]
fn the_clock_native_returns_a_number() {
    let output = execute("print clock; print clock() > 0;");
    assert_snapshot!(output, @r###"
    <native fn>
    true
    "###);
}

#[test]
fn return_unwinds_out_of_a_loop_inside_a_function() {
    let source = r#"fun firstAbove(limit) {
  var i = 0;
  while (true) {
    if (i > limit) return i;
    i = i + 1;
  }
}
print firstAbove(3);"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    4
    "###);
}
