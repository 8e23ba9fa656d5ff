use crate::helpers::execute;
use insta::assert_snapshot;

#[test]
fn multiplication_binds_tighter_than_addition() {
    let output = execute("print 1 + 2 * 3;");
    assert_snapshot!(output, @r###"
    7
    "###);
}

#[test]
fn grouping_overrides_precedence() {
    let output = execute("print (1 + 2) * 3;");
    assert_snapshot!(output, @r###"
    9
    "###);
}

#[test]
fn subtraction_associates_to_the_left() {
    let output = execute("print 10 - 4 - 3;");
    assert_snapshot!(output, @r###"
    3
    "###);
}

#[test]
fn strings_concatenate_with_plus() {
    let output = execute(r#"print "foo" + "bar";"#);
    assert_snapshot!(output, @r###"
    foobar
    "###);
}

#[test]
fn division_produces_fractional_results() {
    let output = execute("print 7 / 2;");
    assert_snapshot!(output, @r###"
    3.5
    "###);
}

#[test]
fn integer_valued_numbers_print_without_a_fractional_part() {
    let output = execute("print 3.0; print 2.5 + 0.5;");
    assert_snapshot!(output, @r###"
    3
    3
    "###);
}

#[test]
fn unary_minus_negates_and_bang_inverts_truthiness() {
    let output = execute("print -3; print !nil; print !0;");
    assert_snapshot!(output, @r###"
    -3
    true
    false
    "###);
}

#[test]
fn nil_is_only_equal_to_itself() {
    let output = execute("print nil == nil; print nil == false; print nil == 0;");
    assert_snapshot!(output, @r###"
    true
    false
    false
    "###);
}

#[test]
fn values_of_different_types_are_never_equal() {
    let output = execute(r#"print 1 == "1"; print "a" == "a"; print 2 != 3;"#);
    assert_snapshot!(output, @r###"
    false
    true
    true
    "###);
}

#[test]
fn nan_is_not_equal_to_itself() {
    let output = execute("print (0 / 0) == (0 / 0);");
    assert_snapshot!(output, @r###"
    false
    "###);
}

#[test]
fn comparisons_require_numbers_and_order_them() {
    let output = execute("print 1 < 2; print 2 <= 2; print 3 > 4; print 4 >= 4;");
    assert_snapshot!(output, @r###"
    true
    true
    false
    true
    "###);
}

#[test]
fn an_assignment_evaluates_to_the_assigned_value() {
    let output = execute("var a = 1; var b = 2; a = b = 3; print a; print b;");
    assert_snapshot!(output, @r###"
    3
    3
    "###);
}

#[test]
fn everything_but_false_and_nil_is_truthy() {
    let output = execute(r#"if (0) print "zero"; if ("") print "empty";"#);
    assert_snapshot!(output, @r###"
    zero
    empty
    "###);
}
