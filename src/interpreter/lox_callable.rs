use super::environment::Environment;
use super::lox_value::LoxValue;
use super::tree_walker::{Interpreter, RuntimeError, Unwind};
use crate::parser::ast::FunctionDeclaration;
use std::cell::RefCell;
use std::fmt::{Debug, Display, Formatter};
use std::iter::zip;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// The call contract shared by user functions, native functions and classes.
pub trait LoxCallable {
    fn arity(&self) -> usize;
    fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<LoxValue>,
    ) -> Result<LoxValue, RuntimeError>;
}

/// A user-defined function or method, paired with the environment it was
/// declared in.
pub struct LoxFunction {
    declaration: Rc<FunctionDeclaration>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl LoxFunction {
    pub(super) fn new(
        declaration: Rc<FunctionDeclaration>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Self {
            declaration,
            closure,
            is_initializer,
        }
    }

    /// Produce a copy of this method whose closure holds `this`, bound to the
    /// given instance. The new frame sits between the method body and the
    /// original closure.
    pub(super) fn bind(&self, instance: LoxValue) -> LoxFunction {
        let environment = Environment::nested(&self.closure);
        environment
            .borrow_mut()
            .define("this".to_owned(), instance);
        LoxFunction {
            declaration: Rc::clone(&self.declaration),
            closure: environment,
            is_initializer: self.is_initializer,
        }
    }

    fn bound_instance(&self) -> LoxValue {
        Environment::get_at(&self.closure, 0, "this")
    }
}

impl LoxCallable for LoxFunction {
    fn arity(&self) -> usize {
        self.declaration.parameters.len()
    }

    fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<LoxValue>,
    ) -> Result<LoxValue, RuntimeError> {
        // Each call gets a fresh frame: simultaneous calls to the same
        // function (recursion included) must not share locals.
        let environment = Environment::nested(&self.closure);
        for (parameter, argument) in zip(self.declaration.parameters.iter(), arguments) {
            environment
                .borrow_mut()
                .define(parameter.lexeme().to_owned(), argument);
        }
        match interpreter.execute_block(&self.declaration.body, environment) {
            Ok(()) => Ok(if self.is_initializer {
                self.bound_instance()
            } else {
                LoxValue::Null
            }),
            // An initializer always hands back its instance, even on an
            // explicit bare `return`.
            Err(Unwind::Return(value)) => Ok(if self.is_initializer {
                self.bound_instance()
            } else {
                value
            }),
            Err(Unwind::Failure(e)) => Err(e),
            Err(Unwind::Break) => Err(RuntimeError::stray_signal("break")),
        }
    }
}

impl Display for LoxFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme())
    }
}

// The closure chain can be cyclic (a function stored in the scope it closes
// over), so the derived representation is off the table.
impl Debug for LoxFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// A function implemented in the host and exposed to Lox programs. It obeys
/// the same arity and call contract as user functions.
pub struct NativeFunction {
    pub(super) name: &'static str,
    arity: usize,
    function: fn(&[LoxValue]) -> Result<LoxValue, RuntimeError>,
}

impl LoxCallable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(
        &self,
        _interpreter: &mut Interpreter,
        arguments: Vec<LoxValue>,
    ) -> Result<LoxValue, RuntimeError> {
        (self.function)(&arguments)
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

/// Seconds elapsed since the Unix epoch, as a double. Good enough for
/// benchmarking Lox programs against each other.
pub(super) fn clock() -> NativeFunction {
    NativeFunction {
        name: "clock",
        arity: 0,
        function: |_arguments| {
            let elapsed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_err(|_| {
                    RuntimeError::without_token("The system clock is set before the Unix epoch.")
                })?;
            Ok(LoxValue::Number(elapsed.as_secs_f64()))
        },
    }
}
