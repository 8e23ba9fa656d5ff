use crate::helpers::execute;
use insta::assert_snapshot;

#[test]
fn two_branch_conditional_works() {
    let source = r#"if (3 > 5) {
    print true;
} else {
    print false;
}"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    false
    "###);
}

#[test]
fn single_branch_conditional_works() {
    let source = r#"if (5 > 2) {
    print true;
}"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    true
    "###);
}

#[test]
fn a_while_loop_runs_until_its_condition_turns_falsy() {
    let source = r#"var i = 0;
while (i < 3) {
    print i;
    i = i + 1;
}"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    0
    1
    2
    "###);
}

#[test]
fn a_for_loop_counts_like_its_while_equivalent() {
    let output = execute("for (var i = 0; i < 3; i = i + 1) print i;");
    assert_snapshot!(output, @r###"
    0
    1
    2
    "###);
}

#[test]
fn break_terminates_the_enclosing_while_loop() {
    let source = r#"var i = 0;
while (true) {
    i = i + 1;
    if (i == 3) break;
}
print i;"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    3
    "###);
}

#[test]
fn break_terminates_the_enclosing_for_loop() {
    let source = r#"for (var i = 0; i < 10; i = i + 1) {
    if (i == 2) break;
    print i;
}"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    0
    1
    "###);
}

#[test]
fn break_only_unwinds_the_innermost_loop() {
    let source = r#"for (var i = 0; i < 2; i = i + 1) {
    for (var j = 0; j < 10; j = j + 1) {
        if (j == 1) break;
        print i + j;
    }
}"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    0
    1
    "###);
}

#[test]
fn or_short_circuits_and_returns_the_deciding_operand() {
    let source = r#"var called = "no";
fun mark() {
    called = "yes";
    return true;
}
print "hi" or mark();
print called;"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    hi
    no
    "###);
}

#[test]
fn and_short_circuits_and_returns_the_deciding_operand() {
    let source = r#"var called = "no";
fun mark() {
    called = "yes";
    return true;
}
print nil and mark();
print called;"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    nil
    no
    "###);
}

#[test]
fn the_right_operand_is_evaluated_when_needed() {
    let output = execute(r#"print false or "fallback"; print true and "value";"#);
    assert_snapshot!(output, @r###"
    fallback
    value
    "###);
}
