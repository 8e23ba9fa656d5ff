use crate::helpers::execute;
use insta::assert_snapshot;

#[test]
fn methods_are_invoked_on_instances() {
    let source = r#"class Greeter {
  greet() {
    print "hello";
  }
}
Greeter().greet();"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    hello
    "###);
}

#[test]
fn fields_are_created_on_first_assignment() {
    let source = r#"class Bag { }
var bag = Bag();
bag.content = "apples";
print bag.content;"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    apples
    "###);
}

#[test]
fn a_field_shadows_a_method_with_the_same_name() {
    let source = r#"class Widget {
  label() {
    print "method";
  }
}
var w = Widget();
w.label = "field";
print w.label;"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    field
    "###);
}

#[test]
fn the_initializer_runs_on_construction() {
    let source = r#"class Point {
  init(x, y) {
    this.x = x;
    this.y = y;
  }
}
var p = Point(1, 2);
print p.x + p.y;"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    3
    "###);
}

#[test]
fn an_initializer_returns_its_instance_even_on_a_bare_return() {
    let source = r#"class Point {
  init(x) {
    this.x = x;
    return;
  }
}
var p = Point(7);
print p.init(9) == p;
print p.x;"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    true
    9
    "###);
}

#[test]
fn a_method_returning_this_returns_its_own_instance() {
    let source = r#"class Chain {
  itself() {
    return this;
  }
}
var c = Chain();
print c.itself() == c;"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    true
    "###);
}

#[test]
fn a_bound_method_remembers_its_instance() {
    let source = r#"class Person {
  init(name) {
    this.name = name;
  }
  sayName() {
    print this.name;
  }
}
var method = Person("Jane").sayName;
method();"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    Jane
    "###);
}

#[test]
fn methods_are_inherited_from_the_superclass() {
    let source = r#"class Doughnut {
  cook() {
    print "Fry until golden brown.";
  }
}
class BostonCream < Doughnut { }
BostonCream().cook();"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    Fry until golden brown.
    "###);
}

#[test]
fn super_invokes_the_overridden_method() {
    let source = r#"class A {
  hi() {
    print "A";
  }
}
class B < A {
  hi() {
    super.hi();
    print "B";
  }
}
B().hi();"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    A
    B
    "###);
}

#[test]
fn super_binds_to_the_declaring_class_not_the_receiver() {
    let source = r#"class A {
  method() {
    print "A.method";
  }
}
class B < A {
  method() {
    print "B.method";
  }
  test() {
    super.method();
  }
}
class C < B { }
C().test();"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    A.method
    "###);
}

#[test]
fn an_inherited_initializer_constructs_the_subclass() {
    let source = r#"class Named {
  init(name) {
    this.name = name;
  }
}
class Dog < Named { }
print Dog("Rex").name;"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    Rex
    "###);
}

#[test]
fn classes_and_instances_print_by_name() {
    let source = r#"class Circle { }
print Circle;
print Circle();"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    Circle
    Circle instance
    "###);
}

#[test]
fn a_method_body_can_refer_to_its_own_class() {
    let source = r#"class Counter {
  fresh() {
    return Counter();
  }
}
print Counter().fresh();"#;
    let output = execute(source);
    assert_snapshot!(output, @r###"
    Counter instance
    "###);
}
