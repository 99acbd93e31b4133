// skink-reader - Keyword type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Keywords are self-evaluating identifiers written with a leading colon.
//!
//! Like symbols, keywords are interned: two keywords with the same name share
//! the same underlying storage, making equality a pointer comparison.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

/// An interned keyword. The stored name excludes the leading colon.
#[derive(Clone)]
pub struct Keyword {
    name: Arc<str>,
}

/// Global keyword interner, separate from the symbol interner so that a
/// keyword and a symbol with the same name remain distinct values.
static KEYWORD_INTERNER: OnceLock<Mutex<HashMap<String, Arc<str>>>> = OnceLock::new();

fn get_interner() -> &'static Mutex<HashMap<String, Arc<str>>> {
    KEYWORD_INTERNER.get_or_init(|| Mutex::new(HashMap::new()))
}

impl Keyword {
    /// Create a new keyword from its name (without the leading colon).
    pub fn new(name: &str) -> Self {
        let mut interner = get_interner().lock().expect(
            "Keyword interner mutex poisoned: another thread panicked while holding the lock",
        );
        if let Some(interned) = interner.get(name) {
            Keyword {
                name: Arc::clone(interned),
            }
        } else {
            let interned: Arc<str> = Arc::from(name);
            interner.insert(name.to_string(), Arc::clone(&interned));
            Keyword { name: interned }
        }
    }

    /// Get the keyword's name, without the leading colon.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword({})", self)
    }
}

impl PartialEq for Keyword {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.name, &other.name)
    }
}

impl Eq for Keyword {}

impl Hash for Keyword {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.name).hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
