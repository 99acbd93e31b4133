// skink-reader - Parser for Skink
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent parser for Skink source code.
//!
//! Converts tokens into `SkinkVal` trees with single-token lookahead.
//! The quote markers and the `^` metadata shorthand are expanded here into
//! their explicit list forms.

use std::fmt;

use crate::keyword::Keyword;
use crate::lexer::{Lexer, LexerError, Token};
use crate::symbol::Symbol;
use crate::value::SkinkVal;

/// Parser error with position information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}

/// The parser converts tokens into `SkinkVal` trees.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code.
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        // Capture position before first token
        let line = lexer.line();
        let column = lexer.column();
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            line,
            column,
        })
    }

    /// Parse a single form from the source.
    /// Returns None if at end of input.
    pub fn parse(&mut self) -> Result<Option<SkinkVal>, ParseError> {
        if matches!(self.current, Token::Eof) {
            return Ok(None);
        }
        let val = self.parse_form()?;
        Ok(Some(val))
    }

    /// Parse all forms from the source.
    pub fn parse_all(&mut self) -> Result<Vec<SkinkVal>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) -> Result<Token, ParseError> {
        let prev = std::mem::replace(&mut self.current, Token::Eof);
        // Capture position of the next token before fetching it
        self.line = self.lexer.line();
        self.column = self.lexer.column();
        self.current = self.lexer.next_token()?;
        Ok(prev)
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        if &self.current == expected {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(format!("Expected {:?}, found {:?}", expected, self.current)))
        }
    }

    fn parse_form(&mut self) -> Result<SkinkVal, ParseError> {
        match &self.current {
            // Literals
            Token::Nil => {
                self.advance()?;
                Ok(SkinkVal::nil())
            }
            Token::True => {
                self.advance()?;
                Ok(SkinkVal::bool(true))
            }
            Token::False => {
                self.advance()?;
                Ok(SkinkVal::bool(false))
            }
            Token::Int(n) => {
                let n = *n;
                self.advance()?;
                Ok(SkinkVal::int(n))
            }
            Token::String(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(SkinkVal::string(s))
            }
            Token::Symbol(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(SkinkVal::symbol(Symbol::new(&s)))
            }
            Token::Keyword(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(SkinkVal::keyword(Keyword::new(&s)))
            }

            // Collections
            Token::LParen => self.parse_list(),
            Token::LBracket => self.parse_vector(),
            Token::LBrace => self.parse_map(),

            // Reader macros
            Token::Quote => self.parse_quote("quote"),
            Token::Quasiquote => self.parse_quote("quasiquote"),
            Token::Unquote => self.parse_quote("unquote"),
            Token::SpliceUnquote => self.parse_quote("splice-unquote"),
            Token::Deref => self.parse_quote("deref"),
            Token::Meta => self.parse_meta(),

            // Unexpected tokens
            Token::RParen => Err(self.error("Unexpected ')'".to_string())),
            Token::RBracket => Err(self.error("Unexpected ']'".to_string())),
            Token::RBrace => Err(self.error("Unexpected '}'".to_string())),
            Token::Eof => Err(self.error("Unexpected end of input".to_string())),
        }
    }

    fn parse_list(&mut self) -> Result<SkinkVal, ParseError> {
        self.advance()?; // consume (
        let mut elements = Vec::new();

        while !matches!(self.current, Token::RParen | Token::Eof) {
            elements.push(self.parse_form()?);
        }

        self.expect(&Token::RParen)?;
        Ok(SkinkVal::list(elements))
    }

    fn parse_vector(&mut self) -> Result<SkinkVal, ParseError> {
        self.advance()?; // consume [
        let mut elements = Vec::new();

        while !matches!(self.current, Token::RBracket | Token::Eof) {
            elements.push(self.parse_form()?);
        }

        self.expect(&Token::RBracket)?;
        Ok(SkinkVal::vector(elements))
    }

    fn parse_map(&mut self) -> Result<SkinkVal, ParseError> {
        self.advance()?; // consume {
        let mut pairs = Vec::new();

        while !matches!(self.current, Token::RBrace | Token::Eof) {
            let key = self.parse_form()?;
            if matches!(self.current, Token::RBrace | Token::Eof) {
                return Err(
                    self.error("Map literal must contain an even number of forms".to_string())
                );
            }
            let value = self.parse_form()?;
            pairs.push((key, value));
        }

        self.expect(&Token::RBrace)?;
        Ok(SkinkVal::map(pairs))
    }

    fn parse_quote(&mut self, name: &str) -> Result<SkinkVal, ParseError> {
        self.advance()?; // consume the quote token
        let form = self.parse_form()?;
        Ok(SkinkVal::list(vec![
            SkinkVal::symbol(Symbol::new(name)),
            form,
        ]))
    }

    fn parse_meta(&mut self) -> Result<SkinkVal, ParseError> {
        self.advance()?; // consume ^
        let raw_meta = self.parse_form()?;

        // Metadata shorthands:
        // ^{...}    => the map itself
        // ^:keyword => {:keyword true}
        // ^Symbol   => {:tag Symbol}
        // ^"String" => {:tag "String"}
        let meta = match raw_meta {
            SkinkVal::Map(_) => raw_meta,
            SkinkVal::Keyword(kw) => {
                SkinkVal::map(vec![(SkinkVal::Keyword(kw), SkinkVal::bool(true))])
            }
            SkinkVal::Symbol(_) | SkinkVal::String(_) => SkinkVal::map(vec![(
                SkinkVal::keyword(Keyword::new("tag")),
                raw_meta,
            )]),
            other => {
                return Err(self.error(format!(
                    "Metadata must be Map, Keyword, Symbol or String, got {}",
                    other.type_name()
                )));
            }
        };

        let form = self.parse_form()?;
        // Expand to (with-meta form meta)
        Ok(SkinkVal::list(vec![
            SkinkVal::symbol(Symbol::new("with-meta")),
            form,
            meta,
        ]))
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Parse a string and return the first form.
pub fn read(source: &str) -> Result<Option<SkinkVal>, ParseError> {
    Parser::new(source)?.parse()
}

/// Parse a string and return all forms.
pub fn read_all(source: &str) -> Result<Vec<SkinkVal>, ParseError> {
    Parser::new(source)?.parse_all()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> SkinkVal {
        read(s).unwrap().unwrap()
    }

    fn parse_opt(s: &str) -> Option<SkinkVal> {
        read(s).unwrap()
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse("nil"), SkinkVal::nil());
        assert_eq!(parse("true"), SkinkVal::bool(true));
        assert_eq!(parse("false"), SkinkVal::bool(false));
        assert_eq!(parse("42"), SkinkVal::int(42));
        assert_eq!(parse(r#""hello""#), SkinkVal::string("hello"));
    }

    #[test]
    fn test_symbols() {
        let val = parse("foo");
        if let SkinkVal::Symbol(sym) = val {
            assert_eq!(sym.name(), "foo");
        } else {
            panic!("Expected symbol");
        }
    }

    #[test]
    fn test_keywords() {
        let val = parse(":foo");
        if let SkinkVal::Keyword(kw) = val {
            assert_eq!(kw.name(), "foo");
        } else {
            panic!("Expected keyword");
        }
    }

    #[test]
    fn test_empty_list() {
        let val = parse("()");
        if let SkinkVal::List(items) = val {
            assert!(items.is_empty());
        } else {
            panic!("Expected list");
        }
    }

    #[test]
    fn test_list() {
        let val = parse("(1 2 3)");
        if let SkinkVal::List(items) = val {
            assert_eq!(items.len(), 3);
            assert_eq!(items[0], SkinkVal::int(1));
            assert_eq!(items[1], SkinkVal::int(2));
            assert_eq!(items[2], SkinkVal::int(3));
        } else {
            panic!("Expected list");
        }
    }

    #[test]
    fn test_vector() {
        let val = parse("[1 2]");
        if let SkinkVal::Vector(items) = val {
            assert_eq!(items.len(), 2);
        } else {
            panic!("Expected vector");
        }
    }

    #[test]
    fn test_map() {
        let val = parse("{:a 1 :b 2}");
        if let SkinkVal::Map(map) = val {
            assert_eq!(map.len(), 2);
            let key = SkinkVal::keyword(Keyword::new("a"));
            assert_eq!(map.get(&key), Some(&SkinkVal::int(1)));
        } else {
            panic!("Expected map");
        }
    }

    #[test]
    fn test_map_odd_forms() {
        assert!(read("{:a 1 :b}").is_err());
        assert!(read("{:a}").is_err());
    }

    #[test]
    fn test_nested() {
        let val = parse("[[1 2] [3 4]]");
        if let SkinkVal::Vector(outer) = val {
            assert_eq!(outer.len(), 2);
            if let SkinkVal::Vector(inner) = &outer[0] {
                assert_eq!(inner.len(), 2);
            } else {
                panic!("Expected inner vector");
            }
        } else {
            panic!("Expected outer vector");
        }
    }

    #[test]
    fn test_quote_forms() {
        for (source, symbol) in [
            ("'foo", "quote"),
            ("`foo", "quasiquote"),
            ("~foo", "unquote"),
            ("~@foo", "splice-unquote"),
            ("@foo", "deref"),
        ] {
            let val = parse(source);
            if let SkinkVal::List(items) = val {
                assert_eq!(items.len(), 2, "wrong arity for {}", source);
                if let SkinkVal::Symbol(sym) = &items[0] {
                    assert_eq!(sym.name(), symbol);
                } else {
                    panic!("Expected {} symbol", symbol);
                }
            } else {
                panic!("Expected list for {}", source);
            }
        }
    }

    #[test]
    fn test_quote_at_eof() {
        assert!(read("'").is_err());
        assert!(read("~@").is_err());
    }

    #[test]
    fn test_unclosed_collections() {
        assert!(read("(1 2").is_err());
        assert!(read("[1 2").is_err());
        assert!(read("{:a 1").is_err());
    }

    #[test]
    fn test_unexpected_closers() {
        assert!(read(")").is_err());
        assert!(read("]").is_err());
        assert!(read("}").is_err());
    }

    #[test]
    fn test_meta_map() {
        // ^{:doc "hi"} x => (with-meta x {:doc "hi"})
        let val = parse(r#"^{:doc "hi"} x"#);
        if let SkinkVal::List(items) = val {
            assert_eq!(items.len(), 3);
            if let SkinkVal::Symbol(sym) = &items[0] {
                assert_eq!(sym.name(), "with-meta");
            } else {
                panic!("Expected with-meta symbol");
            }
            if let SkinkVal::Symbol(sym) = &items[1] {
                assert_eq!(sym.name(), "x");
            } else {
                panic!("Expected target symbol");
            }
            if let SkinkVal::Map(map) = &items[2] {
                let doc_key = SkinkVal::keyword(Keyword::new("doc"));
                assert_eq!(map.get(&doc_key), Some(&SkinkVal::string("hi")));
            } else {
                panic!("Expected map");
            }
        } else {
            panic!("Expected list");
        }
    }

    #[test]
    fn test_meta_keyword() {
        // ^:private x => (with-meta x {:private true})
        let val = parse("^:private x");
        if let SkinkVal::List(items) = val {
            if let SkinkVal::Map(map) = &items[2] {
                let key = SkinkVal::keyword(Keyword::new("private"));
                assert_eq!(map.get(&key), Some(&SkinkVal::bool(true)));
            } else {
                panic!("Expected map");
            }
        } else {
            panic!("Expected list");
        }
    }

    #[test]
    fn test_meta_symbol_and_string() {
        // ^Tag x => (with-meta x {:tag Tag})
        let val = parse("^Tag x");
        if let SkinkVal::List(items) = val {
            if let SkinkVal::Map(map) = &items[2] {
                let key = SkinkVal::keyword(Keyword::new("tag"));
                assert_eq!(map.get(&key), Some(&SkinkVal::symbol(Symbol::new("Tag"))));
            } else {
                panic!("Expected map");
            }
        } else {
            panic!("Expected list");
        }

        let val = parse(r#"^"Tag" x"#);
        if let SkinkVal::List(items) = val {
            if let SkinkVal::Map(map) = &items[2] {
                let key = SkinkVal::keyword(Keyword::new("tag"));
                assert_eq!(map.get(&key), Some(&SkinkVal::string("Tag")));
            } else {
                panic!("Expected map");
            }
        } else {
            panic!("Expected list");
        }
    }

    #[test]
    fn test_meta_invalid() {
        assert!(read("^123 x").is_err());
        assert!(read("^").is_err());
        assert!(read("^:private").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_opt("").is_none());
        assert!(parse_opt("   ").is_none());
        assert!(parse_opt("; comment").is_none());
    }

    #[test]
    fn test_multiple_forms() {
        let forms = read_all("1 2 3").unwrap();
        assert_eq!(forms.len(), 3);
        assert_eq!(forms[0], SkinkVal::int(1));
        assert_eq!(forms[1], SkinkVal::int(2));
        assert_eq!(forms[2], SkinkVal::int(3));
    }
}
