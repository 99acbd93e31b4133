// skink-reader - Lexer and parser for the Skink programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # skink-reader
//!
//! Lexer and parser for the Skink programming language.
//! Produces `SkinkVal` trees from source code strings, and renders them
//! back to text.

pub mod keyword;
pub mod lexer;
pub mod map;
pub mod parser;
pub mod printer;
pub mod symbol;
pub mod value;

pub use im::Vector;
pub use keyword::Keyword;
pub use lexer::{Lexer, LexerError, Token};
pub use map::SkinkMap;
pub use parser::{ParseError, Parser, read, read_all};
pub use printer::pr_str;
pub use symbol::Symbol;
pub use value::{SkinkFn, SkinkNativeFn, SkinkVal};
