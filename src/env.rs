// ABOUTME: Frame chain for variable bindings and lexical scoping

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new root frame with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a child frame of `parent`.
    pub fn new_child(parent: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// Binds `name` in this frame only.
    pub fn set_local(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Looks up `name`, walking outward through parent frames.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// The frame at the end of the parent chain.
    pub fn root(self: &Rc<Self>) -> Rc<Environment> {
        let mut current = Rc::clone(self);
        loop {
            let next = match &current.parent {
                Some(parent) => Rc::clone(parent),
                None => return current,
            };
            current = next;
        }
    }

    /// Binds `name` in the chain's root frame, used by `setglobal`/`defn`.
    pub fn set_root(self: &Rc<Self>, name: String, value: Value) {
        self.root().set_local(name, value);
    }

    /// Collapses this frame's entire parent chain into a single new,
    /// parentless frame, with bindings closer to `self` taking precedence
    /// over outer ones. Used to give a call its own free-standing root, so
    /// that `setglobal`/`defn` (which write to `root()`) land in a frame
    /// scoped to that one call instead of a frame shared across calls.
    pub fn flatten(self: &Rc<Self>) -> Rc<Environment> {
        let mut chain = Vec::new();
        let mut current = Some(Rc::clone(self));
        while let Some(frame) = current {
            current = frame.parent.clone();
            chain.push(frame);
        }

        let flat = Environment::new();
        for frame in chain.into_iter().rev() {
            for (name, value) in frame.bindings.borrow().iter() {
                flat.set_local(name.clone(), value.clone());
            }
        }
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let env = Environment::new();
        env.set_local("x".to_string(), Value::Int(42));
        match env.get("x") {
            Some(Value::Int(n)) => assert_eq!(n, 42),
            _ => panic!("expected Int(42)"),
        }
    }

    #[test]
    fn undefined_symbol() {
        let env = Environment::new();
        assert!(env.get("undefined").is_none());
    }

    #[test]
    fn shadowing() {
        let parent = Environment::new();
        parent.set_local("x".to_string(), Value::Int(1));

        let child = Environment::new_child(&parent);
        child.set_local("x".to_string(), Value::Int(2));

        match child.get("x") {
            Some(Value::Int(n)) => assert_eq!(n, 2),
            _ => panic!("expected Int(2)"),
        }
        match parent.get("x") {
            Some(Value::Int(n)) => assert_eq!(n, 1),
            _ => panic!("expected parent unaffected"),
        }
    }

    #[test]
    fn parent_lookup() {
        let parent = Environment::new();
        parent.set_local("x".to_string(), Value::Int(42));
        let child = Environment::new_child(&parent);
        match child.get("x") {
            Some(Value::Int(n)) => assert_eq!(n, 42),
            _ => panic!("expected Int(42)"),
        }
    }

    #[test]
    fn set_root_reaches_past_nested_children() {
        let root = Environment::new();
        let mid = Environment::new_child(&root);
        let leaf = Environment::new_child(&mid);

        leaf.set_root("g".to_string(), Value::Int(7));

        assert!(matches!(root.get("g"), Some(Value::Int(7))));
        // not visible as a *local* binding on leaf/mid, but lookup still finds it via root
        assert!(matches!(leaf.get("g"), Some(Value::Int(7))));
    }

    #[test]
    fn flatten_merges_the_chain_into_a_parentless_frame() {
        let root = Environment::new();
        root.set_local("x".to_string(), Value::Int(1));
        let child = Environment::new_child(&root);
        child.set_local("y".to_string(), Value::Int(2));
        child.set_local("x".to_string(), Value::Int(99)); // shadows root's x

        let flat = child.flatten();
        assert!(matches!(flat.get("x"), Some(Value::Int(99))));
        assert!(matches!(flat.get("y"), Some(Value::Int(2))));

        // Writing through set_root on the flattened frame stays local to it,
        // it never reaches back into `root`.
        flat.set_root("g".to_string(), Value::Int(7));
        assert!(matches!(flat.get("g"), Some(Value::Int(7))));
        assert!(root.get("g").is_none());
    }
}
