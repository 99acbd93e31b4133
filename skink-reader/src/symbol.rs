// skink-reader - Symbol type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols are the identifiers of Skink programs.
//!
//! # Interning
//!
//! Symbols are interned through a global string interner, so two symbols with
//! the same name share the same underlying storage. Equality is a pointer
//! comparison and hashing uses the pointer address.
//!
//! # Memory Behaviour
//!
//! Interned symbols are never deallocated: the interner holds a strong
//! reference to every name seen during the program's lifetime. Skink
//! programs use a bounded set of symbols, so the overhead is modest.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

/// An interned identifier.
#[derive(Clone)]
pub struct Symbol {
    name: Arc<str>,
}

/// Global symbol interner
static SYMBOL_INTERNER: OnceLock<Mutex<HashMap<String, Arc<str>>>> = OnceLock::new();

fn get_interner() -> &'static Mutex<HashMap<String, Arc<str>>> {
    SYMBOL_INTERNER.get_or_init(|| Mutex::new(HashMap::new()))
}

impl Symbol {
    /// Create a new symbol, reusing storage if the name is already interned.
    pub fn new(name: &str) -> Self {
        let mut interner = get_interner().lock().expect(
            "Symbol interner mutex poisoned: another thread panicked while holding the lock",
        );
        if let Some(interned) = interner.get(name) {
            Symbol {
                name: Arc::clone(interned),
            }
        } else {
            let interned: Arc<str> = Arc::from(name);
            interner.insert(name.to_string(), Arc::clone(&interned));
            Symbol { name: interned }
        }
    }

    /// Get the symbol's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        // Due to interning, pointer comparison is sufficient
        Arc::ptr_eq(&self.name, &other.name)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Use pointer hash for interned symbols
        Arc::as_ptr(&self.name).hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
