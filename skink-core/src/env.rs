// skink-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with lexical scoping.
//!
//! Environments form a chain through parent references. Each frame's
//! bindings live in a [`SkinkMap`] keyed by the bound symbol, so the same
//! hash table backs both map literals and scope frames.

use std::cell::RefCell;
use std::rc::Rc;

use skink_reader::{SkinkMap, SkinkVal, Symbol};

use crate::error::{Error, Result};
use crate::eval::make_native_fn;

/// A lexical environment for variable bindings.
///
/// # Examples
///
/// ```
/// use skink_core::Env;
/// use skink_reader::{SkinkVal, Symbol};
///
/// // Create a root environment
/// let env = Env::new();
///
/// // Define a binding
/// env.define(Symbol::new("x"), SkinkVal::int(42));
///
/// // Look up the binding
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), SkinkVal::int(42));
///
/// // Child environments shadow without mutating the parent
/// let child = env.child();
/// child.define(Symbol::new("x"), SkinkVal::int(100));
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), SkinkVal::int(100));
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), SkinkVal::int(42));
/// ```
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

#[derive(Debug)]
struct EnvInner {
    bindings: SkinkMap,
    outer: Option<Env>,
}

impl Env {
    /// Create a new root environment with no parent.
    #[must_use]
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: SkinkMap::new(),
                outer: None,
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: SkinkMap::new(),
                outer: Some(self.clone()),
            })),
        }
    }

    /// Define a binding in this environment's local frame (never outward).
    pub fn define(&self, sym: Symbol, val: SkinkVal) {
        self.inner
            .borrow_mut()
            .bindings
            .insert(SkinkVal::Symbol(sym), val);
    }

    /// Register a native function under the given name.
    pub fn define_native(
        &self,
        name: &'static str,
        func: impl Fn(&[SkinkVal]) -> Result<SkinkVal> + 'static,
    ) {
        self.define(
            Symbol::new(name),
            SkinkVal::NativeFn(make_native_fn(name, func)),
        );
    }

    /// Find the nearest frame (this one or an ancestor) that binds the
    /// symbol. Uses iterative traversal to avoid stack overflow on deep
    /// environment chains.
    #[must_use]
    pub fn find(&self, sym: &Symbol) -> Option<Env> {
        let key = SkinkVal::Symbol(sym.clone());
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if inner.bindings.contains_key(&key) {
                drop(inner);
                return Some(current);
            }
            let outer = inner.outer.clone();
            drop(inner);
            match outer {
                Some(o) => current = o,
                None => return None,
            }
        }
    }

    /// Look up a symbol in this environment or the parent chain.
    ///
    /// Returns a clone of the bound value, so callers own their result and
    /// the binding itself is never aliased.
    pub fn lookup(&self, sym: &Symbol) -> Result<SkinkVal> {
        let frame = self
            .find(sym)
            .ok_or_else(|| Error::UndefinedSymbol(sym.clone()))?;
        let key = SkinkVal::Symbol(sym.clone());
        let inner = frame.inner.borrow();
        inner
            .bindings
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::Internal(format!("binding for '{}' vanished during lookup", sym)))
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
