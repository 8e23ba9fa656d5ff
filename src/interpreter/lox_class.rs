use super::lox_callable::{LoxCallable, LoxFunction};
use super::lox_value::LoxValue;
use super::tree_walker::{Interpreter, RuntimeError};
use crate::scanner::Token;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

/// Runtime representation of a class declaration.
/// The class stores the behaviour; instances store the state.
pub struct LoxClass {
    pub(super) name: String,
    pub(super) superclass: Option<Rc<LoxClass>>,
    pub(super) methods: HashMap<String, Rc<LoxFunction>>,
}

impl LoxClass {
    /// Own methods shadow inherited ones; lookup walks the superclass chain.
    pub(super) fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Rc::clone(method));
        }
        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.find_method(name))
    }
}

/// Calling a class constructs an instance and runs its initializer, when one
/// is declared (possibly inherited).
impl LoxCallable for Rc<LoxClass> {
    fn arity(&self) -> usize {
        self.find_method("init")
            .map_or(0, |initializer| initializer.arity())
    }

    fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<LoxValue>,
    ) -> Result<LoxValue, RuntimeError> {
        let instance = Rc::new(RefCell::new(LoxInstance {
            class: Rc::clone(self),
            fields: HashMap::new(),
        }));
        if let Some(initializer) = self.find_method("init") {
            initializer
                .bind(LoxValue::Instance(Rc::clone(&instance)))
                .call(interpreter, arguments)?;
        }
        Ok(LoxValue::Instance(instance))
    }
}

impl Display for LoxClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl Debug for LoxClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

pub struct LoxInstance {
    class: Rc<LoxClass>,
    fields: HashMap<String, LoxValue>,
}

impl LoxInstance {
    /// A property read: fields take precedence, then class methods bound to
    /// this instance.
    pub(super) fn get(
        instance: &Rc<RefCell<LoxInstance>>,
        name: &Token,
    ) -> Result<LoxValue, RuntimeError> {
        if let Some(field) = instance.borrow().fields.get(name.lexeme()) {
            return Ok(field.clone());
        }
        if let Some(method) = instance.borrow().class.find_method(name.lexeme()) {
            let bound = method.bind(LoxValue::Instance(Rc::clone(instance)));
            return Ok(LoxValue::Function(Rc::new(bound)));
        }
        Err(RuntimeError::new(
            name.clone(),
            format!("Undefined property '{}'.", name.lexeme()),
        ))
    }

    // Fields spring into existence on first assignment, so there is nothing
    // to check here.
    pub(super) fn set(&mut self, name: &Token, value: LoxValue) {
        self.fields.insert(name.lexeme().to_owned(), value);
    }
}

impl Display for LoxInstance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} instance", self.class.name)
    }
}

// Instances can hold references back to themselves through their fields, so
// the derived representation is off the table.
impl Debug for LoxInstance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} instance>", self.class.name)
    }
}
