use super::environment::Environment;
use super::lox_callable::{clock, LoxCallable, LoxFunction};
use super::lox_class::{LoxClass, LoxInstance};
use super::lox_value::LoxValue;
use crate::parser::ast::{
    BlockStatement, ClassDeclarationStatement, Expression, ExpressionStatement, ExprId,
    IfElseStatement, LiteralExpression, PrintStatement, Statement, SuperExpression,
    VariableDeclarationStatement, WhileStatement,
};
use crate::parser::Parser;
use crate::reporter::Reporter;
use crate::resolver::{ResolutionMap, Resolver};
use crate::scanner::{Scanner, Token, TokenDiscriminant};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub struct Interpreter<'a> {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    resolutions: ResolutionMap,
    output_stream: Box<dyn Write + 'a>,
    reporter: Reporter<'a>,
}

impl<'a> Interpreter<'a> {
    pub fn new<OutputStream>(output: OutputStream) -> Self
    where
        OutputStream: Write + 'a,
    {
        Self::with_streams(output, std::io::stderr())
    }

    /// Route diagnostics to a custom sink instead of stderr.
    /// Tests drive the interpreter over in-memory buffers for both streams.
    pub fn with_streams<OutputStream, DiagnosticsStream>(
        output: OutputStream,
        diagnostics: DiagnosticsStream,
    ) -> Self
    where
        OutputStream: Write + 'a,
        DiagnosticsStream: Write + 'a,
    {
        let globals = Environment::global();
        let clock = clock();
        globals
            .borrow_mut()
            .define(clock.name.to_owned(), LoxValue::NativeFunction(Rc::new(clock)));
        Self {
            environment: Rc::clone(&globals),
            globals,
            resolutions: HashMap::new(),
            output_stream: Box::new(output),
            reporter: Reporter::new(diagnostics),
        }
    }

    /// Scan, parse, resolve and then execute a Lox program.
    ///
    /// All diagnostics flow through the interpreter's [`Reporter`]; the
    /// returned error only tells the caller which stage failed, which is what
    /// the exit-code logic in the driver needs. Nothing is executed if any
    /// compile error was recorded.
    pub fn run(&mut self, source: &str) -> Result<(), ExecutionError> {
        let statements = Parser::parse(Scanner::new(source), &mut self.reporter);
        if self.reporter.had_compile_error() {
            return Err(ExecutionError::Compile);
        }
        let resolutions = Resolver::new(&mut self.reporter).resolve(&statements);
        if self.reporter.had_compile_error() {
            return Err(ExecutionError::Compile);
        }
        // Extend rather than replace: closures created by earlier runs (in a
        // REPL session) keep their entries, since node ids never collide.
        self.resolutions.extend(resolutions);
        match self.interpret(&statements) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.reporter.runtime_error(&e);
                Err(ExecutionError::Runtime(e))
            }
        }
    }

    /// Execute a series of statements.
    /// It exits as soon as a runtime error is encountered.
    pub fn interpret(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
        for statement in statements {
            self.execute(statement).map_err(|unwind| match unwind {
                Unwind::Failure(e) => e,
                Unwind::Return(_) => RuntimeError::stray_signal("return"),
                Unwind::Break => RuntimeError::stray_signal("break"),
            })?;
        }
        Ok(())
    }

    /// Forget recorded errors; the REPL calls this between lines.
    pub fn clear_error_flags(&mut self) {
        self.reporter.reset();
    }

    fn execute(&mut self, statement: &Statement) -> Result<(), Unwind> {
        match statement {
            Statement::Expression(ExpressionStatement(e)) => {
                self.eval(e)?;
            }
            Statement::Print(PrintStatement(e)) => {
                let value = self.eval(e)?;
                writeln!(self.output_stream, "{value}").map_err(RuntimeError::failed_to_print)?;
                self.output_stream
                    .flush()
                    .map_err(RuntimeError::failed_to_flush)?;
            }
            Statement::VariableDeclaration(VariableDeclarationStatement {
                initializer,
                identifier,
            }) => {
                let value = match initializer {
                    Some(initializer) => self.eval(initializer)?,
                    None => LoxValue::Null,
                };
                self.environment
                    .borrow_mut()
                    .define(identifier.lexeme().to_owned(), value);
            }
            Statement::FunctionDeclaration(declaration) => {
                let function = LoxFunction::new(
                    Rc::clone(declaration),
                    Rc::clone(&self.environment),
                    false,
                );
                self.environment.borrow_mut().define(
                    declaration.name.lexeme().to_owned(),
                    LoxValue::Function(Rc::new(function)),
                );
            }
            Statement::ClassDeclaration(class) => {
                self.execute_class_declaration(class)?;
            }
            Statement::Block(BlockStatement(statements)) => {
                let environment = Environment::nested(&self.environment);
                self.execute_block(statements, environment)?;
            }
            Statement::IfElse(IfElseStatement {
                condition,
                if_branch,
                else_branch,
            }) => {
                if self.eval(condition)?.is_truthy() {
                    self.execute(if_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)?;
                }
            }
            Statement::While(WhileStatement { condition, body }) => {
                while self.eval(condition)?.is_truthy() {
                    match self.execute(body) {
                        // `break` unwinds exactly this far.
                        Err(Unwind::Break) => break,
                        outcome => outcome?,
                    }
                }
            }
            Statement::Break => {
                return Err(Unwind::Break);
            }
            Statement::Return(r) => {
                let value = match &r.value {
                    Some(value) => self.eval(value)?,
                    None => LoxValue::Null,
                };
                return Err(Unwind::Return(value));
            }
        }
        Ok(())
    }

    fn execute_class_declaration(
        &mut self,
        class: &ClassDeclarationStatement,
    ) -> Result<(), Unwind> {
        let superclass = match &class.superclass {
            Some(reference) => match self.look_up(&reference.identifier, reference.id)? {
                LoxValue::Class(superclass) => Some(superclass),
                _ => {
                    return Err(RuntimeError::new(
                        reference.identifier.clone(),
                        "Superclass must be a class.",
                    )
                    .into())
                }
            },
            None => None,
        };

        // The class name is visible (as nil) while the methods are being
        // built, so that method bodies may refer to the class itself.
        self.environment
            .borrow_mut()
            .define(class.name.lexeme().to_owned(), LoxValue::Null);

        // Methods of a subclass close over an extra frame holding `super`.
        let method_closure = match &superclass {
            Some(superclass) => {
                let environment = Environment::nested(&self.environment);
                environment
                    .borrow_mut()
                    .define("super".to_owned(), LoxValue::Class(Rc::clone(superclass)));
                environment
            }
            None => Rc::clone(&self.environment),
        };

        let mut methods = HashMap::new();
        for method in &class.methods {
            let is_initializer = method.name.lexeme() == "init";
            let function =
                LoxFunction::new(Rc::clone(method), Rc::clone(&method_closure), is_initializer);
            methods.insert(method.name.lexeme().to_owned(), Rc::new(function));
        }

        let class_value = LoxValue::Class(Rc::new(LoxClass {
            name: class.name.lexeme().to_owned(),
            superclass,
            methods,
        }));
        self.environment
            .borrow_mut()
            .assign(&class.name, class_value)?;
        Ok(())
    }

    /// Execute statements against the given environment, restoring the
    /// previous one on every exit path: normal completion, runtime error,
    /// `return` and `break` alike.
    pub(super) fn execute_block(
        &mut self,
        statements: &[Statement],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<(), Unwind> {
        let previous = std::mem::replace(&mut self.environment, environment);
        let mut outcome = Ok(());
        for statement in statements {
            outcome = self.execute(statement);
            if outcome.is_err() {
                break;
            }
        }
        self.environment = previous;
        outcome
    }

    fn eval(&mut self, e: &Expression) -> Result<LoxValue, Unwind> {
        match e {
            Expression::Binary(b) => {
                let left = self.eval(&b.left)?;
                let right = self.eval(&b.right)?;
                let operator = &b.operator;
                match operator.discriminant() {
                    TokenDiscriminant::Minus => {
                        num_op(left, right, operator, |l, r| LoxValue::Number(l - r))
                    }
                    TokenDiscriminant::Plus => match (left, right) {
                        (LoxValue::Number(l), LoxValue::Number(r)) => Ok(LoxValue::Number(l + r)),
                        (LoxValue::String(l), LoxValue::String(r)) => Ok(LoxValue::String(l + &r)),
                        (_, _) => Err(RuntimeError::new(
                            operator.clone(),
                            "Operands must be two numbers or two strings.",
                        )
                        .into()),
                    },
                    TokenDiscriminant::Slash => {
                        num_op(left, right, operator, |l, r| LoxValue::Number(l / r))
                    }
                    TokenDiscriminant::Star => {
                        num_op(left, right, operator, |l, r| LoxValue::Number(l * r))
                    }
                    TokenDiscriminant::Greater => {
                        num_op(left, right, operator, |l, r| LoxValue::Boolean(l > r))
                    }
                    TokenDiscriminant::GreaterEqual => {
                        num_op(left, right, operator, |l, r| LoxValue::Boolean(l >= r))
                    }
                    TokenDiscriminant::Less => {
                        num_op(left, right, operator, |l, r| LoxValue::Boolean(l < r))
                    }
                    TokenDiscriminant::LessEqual => {
                        num_op(left, right, operator, |l, r| LoxValue::Boolean(l <= r))
                    }
                    TokenDiscriminant::EqualEqual => Ok(LoxValue::Boolean(left.is_equal(&right))),
                    TokenDiscriminant::BangEqual => Ok(LoxValue::Boolean(!left.is_equal(&right))),
                    _ => Err(RuntimeError::new(
                        operator.clone(),
                        "It is not a valid binary operator.",
                    )
                    .into()),
                }
            }
            Expression::Logical(l) => {
                let left = self.eval(&l.left)?;
                match l.operator.discriminant() {
                    TokenDiscriminant::Or if left.is_truthy() => Ok(left),
                    TokenDiscriminant::And if !left.is_truthy() => Ok(left),
                    // Either operand decides: the result is the operand
                    // itself, not a boolean projection of it.
                    _ => self.eval(&l.right),
                }
            }
            Expression::Unary(u) => {
                let value = self.eval(&u.operand)?;
                match u.operator.discriminant() {
                    TokenDiscriminant::Minus => match value {
                        LoxValue::Number(n) => Ok(LoxValue::Number(-n)),
                        _ => Err(RuntimeError::new(
                            u.operator.clone(),
                            "Operand must be a number.",
                        )
                        .into()),
                    },
                    TokenDiscriminant::Bang => Ok(LoxValue::Boolean(!value.is_truthy())),
                    _ => Err(RuntimeError::new(
                        u.operator.clone(),
                        "`!` and `-` are the only valid unary operators.",
                    )
                    .into()),
                }
            }
            Expression::Literal(l) => Ok(match l {
                LiteralExpression::Boolean(b) => LoxValue::Boolean(*b),
                LiteralExpression::Null => LoxValue::Null,
                LiteralExpression::String(s) => LoxValue::String(s.clone()),
                LiteralExpression::Number(n) => LoxValue::Number(*n),
            }),
            Expression::Grouping(g) => self.eval(&g.0),
            Expression::VariableReference(v) => Ok(self.look_up(&v.identifier, v.id)?),
            Expression::VariableAssignment(a) => {
                let value = self.eval(&a.value)?;
                match self.resolutions.get(&a.id) {
                    Some(distance) => Environment::assign_at(
                        &self.environment,
                        *distance,
                        &a.identifier,
                        value.clone(),
                    ),
                    None => self
                        .globals
                        .borrow_mut()
                        .assign(&a.identifier, value.clone())?,
                }
                Ok(value)
            }
            Expression::Call(c) => {
                let callee = self.eval(&c.callee)?;
                let mut arguments = Vec::with_capacity(c.arguments.len());
                for argument in &c.arguments {
                    arguments.push(self.eval(argument)?);
                }
                let callable: &dyn LoxCallable = match &callee {
                    LoxValue::Function(function) => function.as_ref(),
                    LoxValue::NativeFunction(native) => native.as_ref(),
                    LoxValue::Class(class) => class,
                    LoxValue::Null
                    | LoxValue::Boolean(_)
                    | LoxValue::Number(_)
                    | LoxValue::String(_)
                    | LoxValue::Instance(_) => {
                        return Err(RuntimeError::new(
                            c.closing_parenthesis.clone(),
                            "Can only call functions and classes.",
                        )
                        .into())
                    }
                };
                if callable.arity() != arguments.len() {
                    return Err(RuntimeError::new(
                        c.closing_parenthesis.clone(),
                        format!(
                            "Expected {} arguments but got {}.",
                            callable.arity(),
                            arguments.len()
                        ),
                    )
                    .into());
                }
                callable.call(self, arguments).map_err(Unwind::from)
            }
            Expression::PropertyGet(g) => match self.eval(&g.object)? {
                LoxValue::Instance(instance) => Ok(LoxInstance::get(&instance, &g.name)?),
                _ => Err(
                    RuntimeError::new(g.name.clone(), "Only instances have properties.").into(),
                ),
            },
            Expression::PropertySet(s) => {
                let object = self.eval(&s.object)?;
                let LoxValue::Instance(instance) = object else {
                    return Err(
                        RuntimeError::new(s.name.clone(), "Only instances have fields.").into(),
                    );
                };
                let value = self.eval(&s.value)?;
                instance.borrow_mut().set(&s.name, value.clone());
                Ok(value)
            }
            Expression::This(t) => Ok(self.look_up(&t.keyword, t.id)?),
            Expression::Super(s) => self.eval_super(s),
        }
    }

    fn eval_super(&mut self, s: &SuperExpression) -> Result<LoxValue, Unwind> {
        let distance = *self.resolutions.get(&s.id).expect(
            "A 'super' expression survived resolution without a depth. This is an interpreter bug.",
        );
        let superclass = match Environment::get_at(&self.environment, distance, "super") {
            LoxValue::Class(superclass) => superclass,
            _ => unreachable!("`super` is only ever bound to a class"),
        };
        // `this` always sits one frame below the one holding `super`.
        let instance = Environment::get_at(&self.environment, distance - 1, "this");
        match superclass.find_method(s.method.lexeme()) {
            Some(method) => Ok(LoxValue::Function(Rc::new(method.bind(instance)))),
            None => Err(RuntimeError::new(
                s.method.clone(),
                format!("Undefined property '{}'.", s.method.lexeme()),
            )
            .into()),
        }
    }

    /// Read a variable (or `this`) through its resolved depth, falling back
    /// to the globals for references the resolver left alone.
    fn look_up(&self, name: &Token, id: ExprId) -> Result<LoxValue, RuntimeError> {
        match self.resolutions.get(&id) {
            Some(distance) => Ok(Environment::get_at(
                &self.environment,
                *distance,
                name.lexeme(),
            )),
            None => self.globals.borrow().get(name),
        }
    }
}

/// Short-hand for evaluating numerical operations.
fn num_op<F>(
    left: LoxValue,
    right: LoxValue,
    operator: &Token,
    operation: F,
) -> Result<LoxValue, Unwind>
where
    F: Fn(f64, f64) -> LoxValue,
{
    match (left, right) {
        (LoxValue::Number(l), LoxValue::Number(r)) => Ok(operation(l, r)),
        (_, _) => Err(RuntimeError::operands_must_be_numbers(operator).into()),
    }
}

/// The outcome `Interpreter::run` hands to the driver: which stage failed.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("The source code failed to compile")]
    Compile,
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Everything that unwinds the evaluator.
///
/// `Return` and `Break` are control flow, not failures: each is caught
/// exactly at its target (the enclosing call and the enclosing loop) and is
/// never observable past it. Modelling them as the error arm of `Result`
/// lets `?` do the propagation.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Unwind {
    #[error(transparent)]
    Failure(#[from] RuntimeError),
    #[error("A `return` signal is unwinding to the enclosing call")]
    Return(LoxValue),
    #[error("A `break` signal is unwinding to the enclosing loop")]
    Break,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{msg}")]
pub struct RuntimeError {
    t: Option<Token>,
    msg: String,
}

impl RuntimeError {
    pub(crate) fn new(t: Token, msg: impl Into<String>) -> Self {
        Self {
            t: Some(t),
            msg: msg.into(),
        }
    }

    pub(crate) fn without_token(msg: impl Into<String>) -> Self {
        Self {
            t: None,
            msg: msg.into(),
        }
    }

    pub(crate) fn operands_must_be_numbers(operator: &Token) -> Self {
        Self::new(operator.clone(), "Operands must be numbers.")
    }

    pub(crate) fn undefined_variable(name: &Token) -> Self {
        Self::new(
            name.clone(),
            format!("Undefined variable '{}'.", name.lexeme()),
        )
    }

    pub(crate) fn failed_to_print(e: std::io::Error) -> Self {
        Self::without_token(format!("Failed to execute a print statement.\n{e}"))
    }

    pub(crate) fn failed_to_flush(e: std::io::Error) -> Self {
        Self::without_token(format!("Failed to flush the output stream.\n{e}"))
    }

    pub(crate) fn stray_signal(keyword: &str) -> Self {
        Self::without_token(format!(
            "A '{keyword}' escaped its enclosing construct. This is an interpreter bug."
        ))
    }

    /// The source line of the offending token, when there is one.
    pub fn line(&self) -> Option<u64> {
        self.t.as_ref().map(|t| t.line())
    }
}
