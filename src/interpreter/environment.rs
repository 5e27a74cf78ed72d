use std::{cell::RefCell, collections::HashMap, collections::hash_map::Entry, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// A single lexical scope: a mapping from names to values plus an optional
/// link to the enclosing scope.
///
/// Environments are handed out as `Rc<Environment>` because they are shared:
/// the evaluator holds the current one, and every function value holds the
/// one that was current at its declaration. Chains always point outward,
/// ending at the global frame, so the chain itself is acyclic and plain
/// reference counting reclaims frames once no block or closure needs them.
#[derive(Debug)]
pub struct Environment {
    enclosing: Option<Rc<Environment>>,
    values:    RefCell<HashMap<String, Value>>,
}

impl Environment {
    /// Creates a global frame, the root of every chain.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self { enclosing: None,
                       values:    RefCell::new(HashMap::new()), })
    }

    /// Creates a frame nested inside `enclosing`, as entered on every block
    /// and every function call.
    #[must_use]
    pub fn with_enclosing(enclosing: Rc<Self>) -> Rc<Self> {
        Rc::new(Self { enclosing: Some(enclosing),
                       values:    RefCell::new(HashMap::new()), })
    }

    /// Binds `name` in this frame, shadowing any outer binding of the same
    /// name. Declaring a name twice in the same frame silently overwrites.
    pub fn define(&self, name: &str, value: Value) {
        self.values.borrow_mut().insert(name.to_string(), value);
    }

    /// Looks `name` up in this frame, then outward through the chain.
    pub fn get(&self, name: &str, line: usize) -> EvalResult<Value> {
        if let Some(value) = self.values.borrow().get(name) {
            return Ok(value.clone());
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.get(name, line),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                          line }),
        }
    }

    /// Overwrites the nearest existing binding of `name`. Unlike
    /// [`define`](Self::define), assignment never creates a binding; an
    /// unbound name is a runtime error.
    pub fn assign(&self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        if let Entry::Occupied(mut entry) = self.values.borrow_mut().entry(name.to_string()) {
            entry.insert(value);
            return Ok(());
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.assign(name, value, line),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                          line }),
        }
    }
}
