// skink-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for Skink integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

// Re-export common types for convenience
pub use skink_core::builtins::register_builtins;
pub use skink_core::env::Env;
pub use skink_core::eval::eval;
#[allow(unused_imports)]
pub use skink_reader::{Keyword, Parser, SkinkVal, Symbol};

/// Evaluate a Skink expression string in a fresh environment with the
/// built-in functions registered.
#[allow(dead_code)]
pub fn eval_str(s: &str) -> Result<SkinkVal, String> {
    let env = new_env();
    eval_str_with_env(s, &env)
}

/// Evaluate a Skink expression string in the given environment.
#[allow(dead_code)]
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<SkinkVal, String> {
    let mut parser = Parser::new(s).map_err(|e| e.to_string())?;
    match parser.parse().map_err(|e| e.to_string())? {
        Some(expr) => eval(&expr, env).map_err(|e| e.to_string()),
        None => Ok(SkinkVal::Nil),
    }
}

/// Evaluate multiple Skink expressions, returning the last result.
///
/// Useful when a test needs to set up definitions before the final
/// expression.
#[allow(dead_code)]
pub fn eval_all(s: &str, env: &Env) -> Result<SkinkVal, String> {
    let mut parser = Parser::new(s).map_err(|e| e.to_string())?;
    let mut result = SkinkVal::Nil;

    while let Some(expr) = parser.parse().map_err(|e| e.to_string())? {
        result = eval(&expr, env).map_err(|e| e.to_string())?;
    }

    Ok(result)
}

/// Create a new environment with builtins registered.
#[allow(dead_code)]
#[must_use]
pub fn new_env() -> Env {
    let env = Env::new();
    register_builtins(&env);
    env
}

/// Assert that evaluating `input` produces the expected value.
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` produces an error.
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}

/// Assert that evaluating `input` in the given environment produces the
/// expected value.
#[macro_export]
macro_rules! assert_eval_with_env {
    ($input:expr, $expected:expr, $env:expr) => {
        let result = $crate::common::eval_str_with_env($input, $env);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}
