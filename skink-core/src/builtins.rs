// skink-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic built-in functions: +, -, *, /
//!
//! All four operate on 64-bit integers only and use checked arithmetic:
//! overflow is an error, not a silent wrap.

use skink_reader::SkinkVal;

use crate::env::Env;
use crate::error::{Error, Result};

/// Extract an integer argument or fail naming the operator.
fn require_int(val: &SkinkVal, op: &'static str) -> Result<i64> {
    match val {
        SkinkVal::Int(n) => Ok(*n),
        other => Err(Error::type_error_in(op, "integer", other.type_name())),
    }
}

/// (+ ...) - sum of zero or more integers
pub(crate) fn builtin_add(args: &[SkinkVal]) -> Result<SkinkVal> {
    let mut sum: i64 = 0;
    for arg in args {
        let n = require_int(arg, "+")?;
        sum = sum
            .checked_add(n)
            .ok_or(Error::IntegerOverflow { operation: "+" })?;
    }
    Ok(SkinkVal::int(sum))
}

/// (- x ...) - negation for one argument, left-fold subtraction otherwise
pub(crate) fn builtin_sub(args: &[SkinkVal]) -> Result<SkinkVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least("-", 1, 0));
    }

    let first = require_int(&args[0], "-")?;
    if args.len() == 1 {
        return Ok(SkinkVal::int(first.checked_neg().ok_or(
            Error::IntegerOverflow { operation: "-" },
        )?));
    }

    let mut result = first;
    for arg in &args[1..] {
        let n = require_int(arg, "-")?;
        result = result
            .checked_sub(n)
            .ok_or(Error::IntegerOverflow { operation: "-" })?;
    }
    Ok(SkinkVal::int(result))
}

/// (* ...) - product of zero or more integers
pub(crate) fn builtin_mul(args: &[SkinkVal]) -> Result<SkinkVal> {
    let mut product: i64 = 1;
    for arg in args {
        let n = require_int(arg, "*")?;
        product = product
            .checked_mul(n)
            .ok_or(Error::IntegerOverflow { operation: "*" })?;
    }
    Ok(SkinkVal::int(product))
}

/// (/ x ...) - reciprocal against the implicit identity for one argument,
/// left-fold integer division otherwise
pub(crate) fn builtin_div(args: &[SkinkVal]) -> Result<SkinkVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least("/", 1, 0));
    }

    let first = require_int(&args[0], "/")?;
    if args.len() == 1 {
        if first == 0 {
            return Err(Error::DivisionByZero);
        }
        return Ok(SkinkVal::int(1 / first));
    }

    let mut result = first;
    for arg in &args[1..] {
        let n = require_int(arg, "/")?;
        if n == 0 {
            return Err(Error::DivisionByZero);
        }
        result = result
            .checked_div(n)
            .ok_or(Error::IntegerOverflow { operation: "/" })?;
    }
    Ok(SkinkVal::int(result))
}

/// Register the arithmetic primitives on an environment.
pub fn register_builtins(env: &Env) {
    env.define_native("+", builtin_add);
    env.define_native("-", builtin_sub);
    env.define_native("*", builtin_mul);
    env.define_native("/", builtin_div);
}
