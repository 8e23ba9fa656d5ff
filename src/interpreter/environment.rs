use crate::interpreter::lox_value::LoxValue;
use crate::interpreter::tree_walker::RuntimeError;
use crate::scanner::Token;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A lexical scope frame: named bindings plus a link to the enclosing frame.
///
/// Frames are shared: a closure and the block that spawned it hold the same
/// frame, so an assignment through one is observable through the other. The
/// `Rc` keeps a frame alive for as long as any closure or active block still
/// refers to it.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, LoxValue>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn global() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn nested(enclosing: &Rc<RefCell<Self>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            values: HashMap::new(),
            enclosing: Some(Rc::clone(enclosing)),
        }))
    }

    pub fn define(&mut self, name: String, value: LoxValue) {
        self.values.insert(name, value);
    }

    /// Read a binding by name, walking up the chain of enclosing frames.
    /// Used for references the resolver left unresolved, i.e. globals.
    pub fn get(&self, name: &Token) -> Result<LoxValue, RuntimeError> {
        if let Some(value) = self.values.get(name.lexeme()) {
            return Ok(value.clone());
        }
        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().get(name),
            None => Err(RuntimeError::undefined_variable(name)),
        }
    }

    /// Overwrite an existing binding by name, walking up the chain.
    /// Assigning to a name that was never defined is a runtime error.
    pub fn assign(&mut self, name: &Token, value: LoxValue) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(name.lexeme()) {
            *slot = value;
            return Ok(());
        }
        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value),
            None => Err(RuntimeError::undefined_variable(name)),
        }
    }

    /// Read the binding the resolver located exactly `distance` frames up.
    pub fn get_at(environment: &Rc<RefCell<Self>>, distance: usize, name: &str) -> LoxValue {
        Self::ancestor(environment, distance)
            .borrow()
            .values
            .get(name)
            .unwrap_or_else(|| {
                panic!("Failed to look up '{name}' at its resolved depth. This is an interpreter bug.")
            })
            .clone()
    }

    /// Overwrite the binding the resolver located exactly `distance` frames up.
    pub fn assign_at(
        environment: &Rc<RefCell<Self>>,
        distance: usize,
        name: &Token,
        value: LoxValue,
    ) {
        Self::ancestor(environment, distance)
            .borrow_mut()
            .values
            .insert(name.lexeme().to_owned(), value);
    }

    fn ancestor(environment: &Rc<RefCell<Self>>, distance: usize) -> Rc<RefCell<Self>> {
        let mut environment = Rc::clone(environment);
        for _ in 0..distance {
            let enclosing = environment
                .borrow()
                .enclosing
                .clone()
                .expect("The resolver overcounted the depth of a binding. This is an interpreter bug.");
            environment = enclosing;
        }
        environment
    }
}
