use super::scopes::{BindingStatus, ScopeStack};
use super::ResolutionMap;
use crate::parser::ast::{
    ClassDeclarationStatement, ExprId, Expression, FunctionDeclaration, ReturnStatement, Statement,
};
use crate::reporter::Reporter;
use crate::scanner::Token;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionKind {
    None,
    Function,
    Method,
    Initializer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassKind {
    None,
    Class,
    Subclass,
}

/// The static resolution pass.
///
/// It walks the tree once before execution, computing for every variable,
/// assignment, `this` and `super` reference the number of enclosing scopes
/// to skip at runtime. References that belong to no lexical scope get no
/// entry and fall back to the global environment.
///
/// It also enforces the static rules that do not need runtime information:
/// every violation is reported through the [`Reporter`] and traversal keeps
/// going so a single run surfaces them all.
pub struct Resolver<'r, 'sink> {
    scopes: ScopeStack,
    resolutions: ResolutionMap,
    current_function: FunctionKind,
    current_class: ClassKind,
    reporter: &'r mut Reporter<'sink>,
}

impl<'r, 'sink> Resolver<'r, 'sink> {
    pub fn new(reporter: &'r mut Reporter<'sink>) -> Self {
        Self {
            scopes: ScopeStack::new(),
            resolutions: HashMap::new(),
            current_function: FunctionKind::None,
            current_class: ClassKind::None,
            reporter,
        }
    }

    pub fn resolve(mut self, statements: &[Statement]) -> ResolutionMap {
        self.resolve_statements(statements);
        self.resolutions
    }

    fn resolve_statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.resolve_statement(statement);
        }
    }

    fn resolve_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Expression(e) => self.resolve_expression(&e.0),
            Statement::Print(p) => self.resolve_expression(&p.0),
            Statement::VariableDeclaration(v) => {
                self.declare(&v.identifier);
                if let Some(initializer) = &v.initializer {
                    self.resolve_expression(initializer);
                }
                self.scopes.define(v.identifier.lexeme());
            }
            Statement::FunctionDeclaration(f) => {
                // The function name is usable inside its own body, which is
                // what makes recursion work.
                self.declare(&f.name);
                self.scopes.define(f.name.lexeme());
                self.resolve_function(f, FunctionKind::Function);
            }
            Statement::ClassDeclaration(c) => self.resolve_class(c),
            Statement::Block(b) => {
                let guard = self.scopes.enter_scope();
                self.resolve_statements(&b.0);
                self.scopes.exit_scope(guard);
            }
            Statement::IfElse(ifelse) => {
                self.resolve_expression(&ifelse.condition);
                self.resolve_statement(&ifelse.if_branch);
                if let Some(else_branch) = &ifelse.else_branch {
                    self.resolve_statement(else_branch);
                }
            }
            Statement::While(w) => {
                self.resolve_expression(&w.condition);
                self.resolve_statement(&w.body);
            }
            Statement::Break => {}
            Statement::Return(ReturnStatement { keyword, value }) => {
                if self.current_function == FunctionKind::None {
                    self.reporter
                        .error_at(keyword, "Can't return from top-level code.");
                }
                if let Some(value) = value {
                    if self.current_function == FunctionKind::Initializer {
                        self.reporter
                            .error_at(keyword, "Can't return a value from an initializer.");
                    }
                    self.resolve_expression(value);
                }
            }
        }
    }

    fn resolve_class(&mut self, class: &ClassDeclarationStatement) {
        let enclosing_class = std::mem::replace(&mut self.current_class, ClassKind::Class);

        self.declare(&class.name);
        self.scopes.define(class.name.lexeme());

        if let Some(superclass) = &class.superclass {
            if superclass.identifier.lexeme() == class.name.lexeme() {
                self.reporter
                    .error_at(&superclass.identifier, "A class can't inherit from itself.");
            }
            self.current_class = ClassKind::Subclass;
            self.resolve_local(superclass.id, &superclass.identifier);
        }

        // Methods close over two synthetic scopes: one holding `super` (only
        // when there is a superclass) and one holding `this`. Their layout
        // mirrors the environments the interpreter builds when it defines the
        // class and binds a method.
        let super_guard = class.superclass.as_ref().map(|_| {
            let guard = self.scopes.enter_scope();
            self.scopes.define("super");
            guard
        });
        let this_guard = self.scopes.enter_scope();
        self.scopes.define("this");

        for method in &class.methods {
            let kind = if method.name.lexeme() == "init" {
                FunctionKind::Initializer
            } else {
                FunctionKind::Method
            };
            self.resolve_function(method, kind);
        }

        self.scopes.exit_scope(this_guard);
        if let Some(guard) = super_guard {
            self.scopes.exit_scope(guard);
        }
        self.current_class = enclosing_class;
    }

    fn resolve_function(&mut self, declaration: &FunctionDeclaration, kind: FunctionKind) {
        let enclosing_function = std::mem::replace(&mut self.current_function, kind);
        let guard = self.scopes.enter_scope();
        for parameter in &declaration.parameters {
            self.declare(parameter);
            self.scopes.define(parameter.lexeme());
        }
        self.resolve_statements(&declaration.body);
        self.scopes.exit_scope(guard);
        self.current_function = enclosing_function;
    }

    fn resolve_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Binary(b) => {
                self.resolve_expression(&b.left);
                self.resolve_expression(&b.right);
            }
            Expression::Logical(l) => {
                self.resolve_expression(&l.left);
                self.resolve_expression(&l.right);
            }
            Expression::Unary(u) => self.resolve_expression(&u.operand),
            Expression::Literal(_) => {}
            Expression::Grouping(g) => self.resolve_expression(&g.0),
            Expression::VariableReference(v) => {
                if self.scopes.innermost_status(v.identifier.lexeme())
                    == Some(BindingStatus::Declared)
                {
                    self.reporter.error_at(
                        &v.identifier,
                        "Can't read local variable in its own initializer.",
                    );
                }
                self.resolve_local(v.id, &v.identifier);
            }
            Expression::VariableAssignment(a) => {
                self.resolve_expression(&a.value);
                self.resolve_local(a.id, &a.identifier);
            }
            Expression::Call(c) => {
                self.resolve_expression(&c.callee);
                for argument in &c.arguments {
                    self.resolve_expression(argument);
                }
            }
            // Properties are looked up dynamically; only the object
            // expression needs resolving.
            Expression::PropertyGet(g) => self.resolve_expression(&g.object),
            Expression::PropertySet(s) => {
                self.resolve_expression(&s.value);
                self.resolve_expression(&s.object);
            }
            Expression::This(t) => {
                if self.current_class == ClassKind::None {
                    self.reporter
                        .error_at(&t.keyword, "Can't use 'this' outside of a class.");
                    return;
                }
                self.resolve_local(t.id, &t.keyword);
            }
            Expression::Super(s) => {
                match self.current_class {
                    ClassKind::None => {
                        self.reporter
                            .error_at(&s.keyword, "Can't use 'super' outside of a class.");
                        return;
                    }
                    ClassKind::Class => {
                        self.reporter.error_at(
                            &s.keyword,
                            "Can't use 'super' in a class with no superclass.",
                        );
                        return;
                    }
                    ClassKind::Subclass => {}
                }
                self.resolve_local(s.id, &s.keyword);
            }
        }
    }

    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        if let Some(depth) = self.scopes.depth_of(name.lexeme()) {
            self.resolutions.insert(id, depth);
        }
    }

    fn declare(&mut self, name: &Token) {
        if self.scopes.declare(name.lexeme()).is_err() {
            self.reporter
                .error_at(name, "Already a variable with this name in this scope.");
        }
    }
}
