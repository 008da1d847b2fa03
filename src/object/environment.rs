use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

/// A lexical scope: a mapping of names to values, plus an optional
/// pointer to the enclosing scope. `get` walks outward; `set` always
/// writes to the innermost scope (this env), never an outer one.
///
/// Environments are shared via `Rc` and mutated through an internal
/// `RefCell` so that multiple closures can hold the same captured scope.
/// A recursive closure's captured env ends up holding a binding to the
/// closure itself, an `Rc` cycle accepted as benign for the process's
/// lifetime (see the macro/function tests below).
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Object>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Rc<Environment> {
        Rc::new(Environment { bindings: RefCell::new(HashMap::new()), outer: None })
    }

    /// A child scope whose `outer` is the *captured* environment — the
    /// function's defining scope for a call, not necessarily the
    /// caller's scope. This is what gives Monkey lexical (not dynamic)
    /// scoping.
    pub fn enclosed(outer: &Rc<Environment>) -> Rc<Environment> {
        Rc::new(Environment { bindings: RefCell::new(HashMap::new()), outer: Some(Rc::clone(outer)) })
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Always binds in this scope, never an outer one — a `let`/`set`
    /// inside a nested function body can never mutate an enclosing
    /// binding, only shadow it for the remainder of this scope.
    pub fn set(&self, name: &str, value: Object) -> Object {
        self.bindings.borrow_mut().insert(name.to_string(), value.clone());
        value
    }
}
