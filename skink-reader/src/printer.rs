// skink-reader - Printer for Skink values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Renders a `SkinkVal` back to source-like text.
//!
//! Two modes: readable (string contents escaped, suitable for the REPL and
//! for re-reading) and raw (string contents verbatim, used as the canonical
//! key form for map lookups and for `str`-style output).

use crate::value::SkinkVal;

/// Render a value to text. `readable` escapes string contents.
#[must_use]
pub fn pr_str(val: &SkinkVal, readable: bool) -> String {
    let mut out = String::new();
    write_form(&mut out, val, readable);
    out
}

fn write_form(out: &mut String, val: &SkinkVal, readable: bool) {
    match val {
        SkinkVal::Nil => out.push_str("nil"),
        SkinkVal::Bool(true) => out.push_str("true"),
        SkinkVal::Bool(false) => out.push_str("false"),
        SkinkVal::Int(n) => out.push_str(&n.to_string()),
        SkinkVal::String(s) => {
            out.push('"');
            if readable {
                for c in s.chars() {
                    match c {
                        '\n' => out.push_str("\\n"),
                        '\t' => out.push_str("\\t"),
                        '\r' => out.push_str("\\r"),
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        _ => out.push(c),
                    }
                }
            } else {
                out.push_str(s);
            }
            out.push('"');
        }
        SkinkVal::Symbol(sym) => out.push_str(sym.name()),
        SkinkVal::Keyword(kw) => {
            out.push(':');
            out.push_str(kw.name());
        }
        SkinkVal::List(items) => {
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_form(out, item, readable);
            }
            out.push(')');
        }
        SkinkVal::Vector(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_form(out, item, readable);
            }
            out.push(']');
        }
        SkinkVal::Map(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_form(out, k, readable);
                out.push(' ');
                write_form(out, v, readable);
            }
            out.push('}');
        }
        SkinkVal::NativeFn(nf) => {
            out.push_str("#<native-fn ");
            out.push_str(nf.name());
            out.push('>');
        }
        SkinkVal::Fn(_) => out.push_str("#<fn>"),
    }
}

// ============================================================================
// Tests
// ============================================================================
