// skink-core - AST-walking evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! AST-walking evaluator for Skink expressions.
//!
//! `eval` dispatches on the shape of the value: symbols resolve against the
//! environment, collections evaluate their elements left to right, lists
//! dispatch on their head symbol for special forms and otherwise apply the
//! evaluated head to the evaluated tail. Any sub-evaluation failure aborts
//! the enclosing evaluation.

use std::any::Any;
use std::rc::Rc;

use skink_reader::{SkinkFn, SkinkNativeFn, SkinkVal, Symbol};

use crate::env::Env;
use crate::error::{Error, Result};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[SkinkVal]) -> Result<SkinkVal>;

/// Evaluate a Skink expression in the given environment.
pub fn eval(expr: &SkinkVal, env: &Env) -> Result<SkinkVal> {
    match expr {
        // Self-evaluating forms
        SkinkVal::Nil
        | SkinkVal::Bool(_)
        | SkinkVal::Int(_)
        | SkinkVal::String(_)
        | SkinkVal::Keyword(_)
        | SkinkVal::NativeFn(_)
        | SkinkVal::Fn(_) => Ok(expr.clone()),

        // Symbol lookup; the caller receives its own copy of the binding
        SkinkVal::Symbol(sym) => env.lookup(sym),

        // List - either special form or function call
        SkinkVal::List(items) => {
            let items_vec: Vec<SkinkVal> = items.iter().cloned().collect();
            eval_list(&items_vec, env)
        }

        // Vectors evaluate their elements left to right
        SkinkVal::Vector(items) => {
            let evaluated: Result<Vec<_>> = items.iter().map(|e| eval(e, env)).collect();
            Ok(SkinkVal::vector(evaluated?))
        }

        // Maps evaluate their keys and values, in source order, rebuilding
        // a fresh map (computed keys are allowed)
        SkinkVal::Map(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (k, v) in map.iter().rev() {
                pairs.push((eval(k, env)?, eval(v, env)?));
            }
            Ok(SkinkVal::map(pairs))
        }
    }
}

/// Evaluate a list form (special form or function call).
fn eval_list(items: &[SkinkVal], env: &Env) -> Result<SkinkVal> {
    if items.is_empty() {
        // Empty list evaluates to itself, not a call
        return Ok(SkinkVal::empty_list());
    }

    // Check for special forms
    if let SkinkVal::Symbol(sym) = &items[0] {
        match sym.name() {
            "quote" => return eval_quote(&items[1..]),
            "def!" => return eval_def(&items[1..], env),
            "let*" => return eval_let(&items[1..], env),
            "fn*" => return eval_fn(&items[1..], env),
            _ => {}
        }
    }

    // Regular application - evaluate all elements, then apply
    let mut evaluated = Vec::with_capacity(items.len());
    for item in items {
        evaluated.push(eval(item, env)?);
    }
    apply(&evaluated[0], &evaluated[1..])
}

// ============================================================================
// Special Forms
// ============================================================================

/// (quote form) - return form unevaluated
fn eval_quote(args: &[SkinkVal]) -> Result<SkinkVal> {
    if args.len() != 1 {
        return Err(Error::syntax("quote", "requires exactly 1 argument"));
    }
    Ok(args[0].clone())
}

/// (def! symbol expr) - evaluate expr and bind it in the local frame
fn eval_def(args: &[SkinkVal], env: &Env) -> Result<SkinkVal> {
    if args.len() != 2 {
        return Err(Error::syntax("def!", "requires exactly 2 arguments"));
    }

    let sym = match &args[0] {
        SkinkVal::Symbol(sym) => sym.clone(),
        other => {
            return Err(Error::syntax(
                "def!",
                format!("first argument must be a symbol, got {}", other.type_name()),
            ));
        }
    };

    let val = eval(&args[1], env)?;
    env.define(sym, val.clone());
    Ok(val)
}

/// (let* (bindings...) body) - sequential bindings in a fresh child
/// environment, discarded after the body is evaluated
fn eval_let(args: &[SkinkVal], env: &Env) -> Result<SkinkVal> {
    if args.len() != 2 {
        return Err(Error::syntax(
            "let*",
            "requires a binding list and a body",
        ));
    }

    let bindings: Vec<SkinkVal> = match &args[0] {
        SkinkVal::List(items) | SkinkVal::Vector(items) => items.iter().cloned().collect(),
        other => {
            return Err(Error::syntax(
                "let*",
                format!(
                    "first argument must be a list or vector of bindings, got {}",
                    other.type_name()
                ),
            ));
        }
    };

    if bindings.len() % 2 != 0 {
        return Err(Error::syntax(
            "let*",
            "bindings must have an even number of forms",
        ));
    }

    // Each binding expression sees the bindings established before it
    let let_env = env.child();
    for pair in bindings.chunks(2) {
        let sym = match &pair[0] {
            SkinkVal::Symbol(sym) => sym.clone(),
            other => {
                return Err(Error::syntax(
                    "let*",
                    format!("binding names must be symbols, got {}", other.type_name()),
                ));
            }
        };
        let val = eval(&pair[1], &let_env)?;
        let_env.define(sym, val);
    }

    eval(&args[1], &let_env)
}

/// (fn* (params...) body) - build a closure over the current environment
fn eval_fn(args: &[SkinkVal], env: &Env) -> Result<SkinkVal> {
    if args.len() != 2 {
        return Err(Error::syntax(
            "fn*",
            "requires a parameter list and a body",
        ));
    }

    let params: Vec<Symbol> = match &args[0] {
        SkinkVal::List(items) | SkinkVal::Vector(items) => items
            .iter()
            .map(|p| match p {
                SkinkVal::Symbol(sym) => Ok(sym.clone()),
                other => Err(Error::syntax(
                    "fn*",
                    format!("parameter names must be symbols, got {}", other.type_name()),
                )),
            })
            .collect::<Result<_>>()?,
        other => {
            return Err(Error::syntax(
                "fn*",
                format!(
                    "first argument must be a list or vector of parameters, got {}",
                    other.type_name()
                ),
            ));
        }
    };

    let captured: Rc<dyn Any> = Rc::new(env.clone());
    Ok(SkinkVal::Fn(SkinkFn::new(params, args[1].clone(), captured)))
}

// ============================================================================
// Application
// ============================================================================

/// Apply a callable to already-evaluated arguments.
pub fn apply(func: &SkinkVal, args: &[SkinkVal]) -> Result<SkinkVal> {
    match func {
        SkinkVal::NativeFn(f) => apply_native(f, args),
        SkinkVal::Fn(f) => apply_fn(f, args),
        other => Err(Error::NotCallable(format!("{}", other))),
    }
}

/// Apply a closure: bind parameters in a child of the captured environment
/// and evaluate the body there.
fn apply_fn(func: &SkinkFn, args: &[SkinkVal]) -> Result<SkinkVal> {
    let captured = func
        .env
        .downcast_ref::<Env>()
        .ok_or_else(|| Error::Internal("Closure environment has invalid type".to_string()))?;

    if args.len() != func.params.len() {
        return Err(Error::arity(func.params.len(), args.len()));
    }

    let fn_env = captured.child();
    for (param, arg) in func.params.iter().zip(args) {
        fn_env.define(param.clone(), arg.clone());
    }

    eval(&func.body, &fn_env)
}

/// Apply a native function.
fn apply_native(func: &SkinkNativeFn, args: &[SkinkVal]) -> Result<SkinkVal> {
    // Downcast the type-erased function
    let f = func
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or_else(|| Error::Internal("Native function has invalid type".to_string()))?;
    f(args)
}

/// Create a native function value.
pub fn make_native_fn(
    name: &'static str,
    func: impl Fn(&[SkinkVal]) -> Result<SkinkVal> + 'static,
) -> SkinkNativeFn {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    SkinkNativeFn::new(name, func_any)
}
