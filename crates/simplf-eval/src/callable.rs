//! Callable values: user-defined closures and host-provided natives.

use crate::env::Environment;
use crate::value::Value;
use simplf_types::ast::{FunctionDecl, Ident, Stmt};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A user-defined function together with the scope it was declared in.
pub struct Function {
    decl: Rc<FunctionDecl>,
    closure: RefCell<Rc<Environment>>,
}

impl Function {
    pub fn new(decl: Rc<FunctionDecl>, closure: Rc<Environment>) -> Self {
        Self {
            decl,
            closure: RefCell::new(closure),
        }
    }

    pub fn name(&self) -> &str {
        &self.decl.name.name
    }

    pub fn arity(&self) -> usize {
        self.decl.params.len()
    }

    pub fn params(&self) -> &[Ident] {
        &self.decl.params
    }

    pub fn body(&self) -> &[Stmt] {
        &self.decl.body
    }

    pub fn closure(&self) -> Rc<Environment> {
        self.closure.borrow().clone()
    }

    /// Point the function at a different defining scope.
    ///
    /// Only for hosts wiring up self- or mutual reference after the fact,
    /// e.g. giving an earlier declaration sight of a later one.
    pub fn rebind_closure(&self, env: Rc<Environment>) {
        *self.closure.borrow_mut() = env;
    }
}

type NativeFn = dyn Fn(&[Value]) -> Result<Value, String>;

/// A function implemented by the host.
pub struct NativeFunction {
    name: String,
    arity: usize,
    func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<String>,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value, String> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Box::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn invoke(&self, args: &[Value]) -> Result<Value, String> {
        (self.func)(args)
    }
}

/// The callable half of [`Value`]. Cloning shares the underlying function.
#[derive(Clone)]
pub enum Callable {
    Function(Rc<Function>),
    Native(Rc<NativeFunction>),
}

impl Callable {
    pub fn name(&self) -> &str {
        match self {
            Callable::Function(f) => f.name(),
            Callable::Native(n) => n.name(),
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Callable::Function(f) => f.arity(),
            Callable::Native(n) => n.arity(),
        }
    }
}

/// Identity comparison: two values are equal only if they are the same function.
impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Function(a), Callable::Function(b)) => Rc::ptr_eq(a, b),
            (Callable::Native(a), Callable::Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Function(func) => write!(f, "<fn {}>", func.name()),
            Callable::Native(native) => write!(f, "<native fn {}>", native.name()),
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}/{}", self.arity())
    }
}
