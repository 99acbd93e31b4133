// skink-core - Runtime and evaluator for the Skink programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # skink-core
//!
//! Runtime and evaluator for the Skink programming language.
//! Provides an AST-walking interpreter for `SkinkVal` expressions and the
//! read-eval-print boundary consumed by the REPL shell.

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;

pub use builtins::register_builtins;
pub use env::Env;
pub use error::{Error, Result};
pub use eval::{apply, eval, make_native_fn};

// Re-export reader types for convenience
pub use skink_reader::{Keyword, Parser, SkinkVal, Symbol, pr_str};

/// Read, evaluate and print one line of input.
///
/// Returns the readable rendering of the result, or `Ok(None)` when the
/// input held no form (an empty line or only a comment), which the shell
/// treats as nothing to evaluate rather than an error.
///
/// # Errors
///
/// Returns an error if the input fails to read or to evaluate. The
/// environment is left as the evaluation reached it; the caller may keep
/// using it for subsequent lines.
pub fn eval_line(input: &str, env: &Env) -> Result<Option<String>> {
    let mut parser = Parser::new(input).map_err(|e| Error::ReadError(e.to_string()))?;
    match parser.parse().map_err(|e| Error::ReadError(e.to_string()))? {
        Some(expr) => {
            let value = eval::eval(&expr, env)?;
            Ok(Some(pr_str(&value, true)))
        }
        None => Ok(None),
    }
}
