// skink-core - Error types for the Skink evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for Skink evaluation.
//!
//! Every failure is a recoverable value surfaced to the caller; a failed
//! evaluation aborts the whole top-level expression but never the process.

use std::fmt;

use skink_reader::Symbol;

/// Result type for Skink evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or evaluating.
#[derive(Debug, Clone)]
pub enum Error {
    /// Lexer or parser failure
    ReadError(String),
    /// Undefined symbol reference
    UndefinedSymbol(Symbol),
    /// Invalid special form syntax
    InvalidSyntax { form: &'static str, message: String },
    /// Attempted to call something that isn't callable
    NotCallable(String),
    /// Wrong number of arguments to a function
    ArityError {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },
    /// Type error - wrong type for an operation
    TypeError {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },
    /// Division by zero
    DivisionByZero,
    /// Integer overflow in checked arithmetic
    IntegerOverflow { operation: &'static str },
    /// Internal error - invariant violation
    Internal(String),
}

/// Specification for expected arity.
#[derive(Debug, Clone)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ReadError(msg) => {
                write!(f, "{}", msg)
            }
            Error::UndefinedSymbol(sym) => {
                write!(f, "Unable to resolve symbol: {}", sym)
            }
            Error::InvalidSyntax { form, message } => {
                write!(f, "Invalid '{}' syntax: {}", form, message)
            }
            Error::NotCallable(val) => {
                write!(f, "Cannot call value: {}", val)
            }
            Error::ArityError {
                expected,
                got,
                name,
            } => {
                if let Some(name) = name {
                    write!(
                        f,
                        "Wrong number of arguments to '{}': expected {}, got {}",
                        name, expected, got
                    )
                } else {
                    write!(
                        f,
                        "Wrong number of arguments: expected {}, got {}",
                        expected, got
                    )
                }
            }
            Error::TypeError {
                expected,
                got,
                context,
            } => {
                if let Some(ctx) = context {
                    write!(f, "{}: expected {}, got {}", ctx, expected, got)
                } else {
                    write!(f, "Type error: expected {}, got {}", expected, got)
                }
            }
            Error::DivisionByZero => {
                write!(f, "Division by zero")
            }
            Error::IntegerOverflow { operation } => {
                write!(f, "Integer overflow in '{}'", operation)
            }
            Error::Internal(msg) => {
                write!(f, "Internal error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Create an arity error for exact arity.
    pub fn arity(expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: None,
        }
    }

    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for minimum arity with function name.
    pub fn arity_at_least(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeError {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            form,
            message: message.into(),
        }
    }
}
