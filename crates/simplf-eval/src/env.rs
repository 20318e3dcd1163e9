//! Lexical environments: a chain of scopes, each an association list.
//!
//! Scopes are shared through `Rc`. A block's scope may outlive the block when
//! a closure created inside it holds on to it, and an assignment through any
//! holder is visible to all of them. Bindings are never removed or
//! overwritten by `define`; a newer binding with the same name sits in front
//! of the older one.

use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use simplf_types::Span;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// One cell of a scope's association list.
struct Binding {
    name: String,
    value: RefCell<Value>,
    next: Option<Rc<Binding>>,
}

/// Iterates an association list from the most recent binding.
struct Bindings<'a> {
    cursor: Option<&'a Rc<Binding>>,
}

impl<'a> Iterator for Bindings<'a> {
    type Item = &'a Binding;

    fn next(&mut self) -> Option<Self::Item> {
        let binding: &'a Binding = self.cursor?;
        self.cursor = binding.next.as_ref();
        Some(binding)
    }
}

/// A scope in the environment chain.
pub struct Environment {
    bindings: RefCell<Option<Rc<Binding>>>,
    enclosing: Option<Rc<Environment>>,
}

impl Environment {
    /// The outermost scope of a program run.
    pub fn global() -> Rc<Self> {
        Rc::new(Self {
            bindings: RefCell::new(None),
            enclosing: None,
        })
    }

    /// An empty scope nested in `enclosing` (block or call entry).
    pub fn with_enclosing(enclosing: Rc<Environment>) -> Rc<Self> {
        Rc::new(Self {
            bindings: RefCell::new(None),
            enclosing: Some(enclosing),
        })
    }

    pub fn enclosing(&self) -> Option<&Rc<Environment>> {
        self.enclosing.as_ref()
    }

    /// Bind `name` in this scope, shadowing any existing local binding.
    ///
    /// The binding is prepended to this scope's list, so every holder of this
    /// scope (closures included) sees it. The returned scope is the new
    /// current-scope identity: it starts from the same list and has `self`
    /// as its parent, so later definitions made through it stay invisible to
    /// holders of `self`.
    pub fn define(self: &Rc<Self>, name: &str, value: Value) -> Rc<Environment> {
        tracing::trace!(name, "define");
        let next = self.bindings.borrow().clone();
        let head = Rc::new(Binding {
            name: name.to_string(),
            value: RefCell::new(value),
            next,
        });
        *self.bindings.borrow_mut() = Some(Rc::clone(&head));
        Rc::new(Environment {
            bindings: RefCell::new(Some(head)),
            enclosing: Some(Rc::clone(self)),
        })
    }

    /// Overwrite the nearest binding of `name`, searching outward.
    pub fn assign(&self, name: &str, value: Value, span: Span) -> EvalResult<()> {
        tracing::trace!(name, "assign");
        self.lookup(name, |binding| *binding.value.borrow_mut() = value)
            .ok_or_else(|| EvalError::UndefinedVariable {
                name: name.to_string(),
                span,
            })
    }

    /// Read the nearest binding of `name`, searching outward.
    pub fn get(&self, name: &str, span: Span) -> EvalResult<Value> {
        self.lookup(name, |b| b.value.borrow().clone())
            .ok_or_else(|| EvalError::UndefinedVariable {
                name: name.to_string(),
                span,
            })
    }

    /// Whether any scope in the chain binds `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name, |_| ()).is_some()
    }

    /// Number of scopes from this one to the global scope, inclusive.
    pub fn depth(&self) -> usize {
        std::iter::successors(Some(self), |env| env.enclosing.as_deref()).count()
    }

    /// Names bound directly in this scope, most recent first.
    pub fn local_names(&self) -> Vec<String> {
        let head = self.bindings.borrow();
        let names = Bindings {
            cursor: head.as_ref(),
        }
        .map(|b| b.name.clone())
        .collect();
        names
    }

    fn lookup<T>(&self, name: &str, found: impl FnOnce(&Binding) -> T) -> Option<T> {
        let mut env = Some(self);
        while let Some(scope) = env {
            let head = scope.bindings.borrow();
            let hit = Bindings {
                cursor: head.as_ref(),
            }
            .find(|binding| binding.name == name);
            if let Some(binding) = hit {
                return Some(found(binding));
            }
            env = scope.enclosing.as_deref();
        }
        None
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("locals", &self.local_names())
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::point(1, 1)
    }

    #[test]
    fn test_define_then_get() {
        let global = Environment::global();
        let current = global.define("a", Value::Number(1.0));
        assert_eq!(current.get("a", span()), Ok(Value::Number(1.0)));
        assert_eq!(global.get("a", span()), Ok(Value::Number(1.0)));
    }

    #[test]
    fn test_get_undefined() {
        let global = Environment::global();
        let err = global.get("missing", Span::point(3, 4)).unwrap_err();
        assert_eq!(
            err,
            EvalError::UndefinedVariable {
                name: "missing".into(),
                span: Span::point(3, 4),
            }
        );
    }

    #[test]
    fn test_define_shadows_without_overwriting() {
        let global = Environment::global();
        let first = global.define("x", Value::Number(1.0));
        let second = first.define("x", Value::Number(2.0));
        assert_eq!(second.get("x", span()), Ok(Value::Number(2.0)));
        assert_eq!(second.local_names(), vec!["x".to_string(), "x".to_string()]);
        // The scope that made the first definition never saw the second.
        assert_eq!(global.get("x", span()), Ok(Value::Number(1.0)));
    }

    #[test]
    fn test_child_shadow_does_not_leak() {
        let global = Environment::global();
        global.define("x", Value::from("outer"));
        let block = Environment::with_enclosing(Rc::clone(&global));
        let block = block.define("x", Value::from("inner"));
        assert_eq!(block.get("x", span()), Ok(Value::from("inner")));
        drop(block);
        assert_eq!(global.get("x", span()), Ok(Value::from("outer")));
    }

    #[test]
    fn test_assign_mutates_nearest_binding() {
        let global = Environment::global();
        global.define("x", Value::Number(1.0));
        let block = Environment::with_enclosing(Rc::clone(&global));
        block.assign("x", Value::Number(5.0), span()).unwrap();
        assert_eq!(global.get("x", span()), Ok(Value::Number(5.0)));
    }

    #[test]
    fn test_assign_prefers_inner_shadow() {
        let global = Environment::global();
        global.define("x", Value::Number(1.0));
        let block = Environment::with_enclosing(Rc::clone(&global));
        block.define("x", Value::Number(2.0));
        block.assign("x", Value::Number(3.0), span()).unwrap();
        assert_eq!(block.get("x", span()), Ok(Value::Number(3.0)));
        assert_eq!(global.get("x", span()), Ok(Value::Number(1.0)));
    }

    #[test]
    fn test_assign_visible_through_every_identity() {
        let global = Environment::global();
        let after_a = global.define("a", Value::Number(1.0));
        let after_b = after_a.define("b", Value::Number(2.0));
        after_b.assign("a", Value::Number(10.0), span()).unwrap();
        assert_eq!(global.get("a", span()), Ok(Value::Number(10.0)));
        assert_eq!(after_a.get("a", span()), Ok(Value::Number(10.0)));
    }

    #[test]
    fn test_assign_undefined() {
        let global = Environment::global();
        let err = global
            .assign("nope", Value::Nil, Span::point(2, 1))
            .unwrap_err();
        assert!(matches!(err, EvalError::UndefinedVariable { ref name, .. } if name == "nope"));
        assert!(!global.contains("nope"));
    }

    #[test]
    fn test_depth() {
        let global = Environment::global();
        assert_eq!(global.depth(), 1);
        let block = Environment::with_enclosing(Rc::clone(&global));
        assert_eq!(block.depth(), 2);
        assert_eq!(block.define("v", Value::Nil).depth(), 3);
        assert!(block.enclosing().is_some());
        assert!(global.enclosing().is_none());
    }
}
